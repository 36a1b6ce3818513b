//! Checkout: form validation, the payment collaborator contract and order
//! placement.
//!
//! The payment widget itself is external; it is reached through the
//! [`PaymentGateway`] trait and reports exactly one [`PaymentOutcome`].

pub mod form;
pub mod payment;
pub mod service;

pub use form::CheckoutForm;
pub use payment::{CustomField, PaymentGateway, PaymentOutcome, PaymentReceipt, PaymentRequest};
pub use service::{CheckoutError, CheckoutOutcome, CheckoutService};
