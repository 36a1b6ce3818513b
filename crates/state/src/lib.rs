//! `storefront-state`: observable state containers.
//!
//! Every store in the storefront is built from a [`StateCell`]: a current value,
//! a list of subscribers, and a synchronous publish that fans the new value out to
//! all of them before returning.

pub mod cell;
pub mod notify;
pub mod subscription;

pub use cell::StateCell;
pub use notify::{Notifier, Toast, ToastId, ToastKind};
pub use subscription::Subscription;
