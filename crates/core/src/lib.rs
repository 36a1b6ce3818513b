//! `storefront-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no IO).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{OrderId, ProductId};
pub use value_object::{Money, ValueObject};
