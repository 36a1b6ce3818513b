//! Cart domain module.
//!
//! The cart is an ordered list of product lines with derived totals, held in an
//! observable store and persisted after every mutation.

pub mod cart;
pub mod store;

pub use cart::{Cart, CartItem};
pub use store::CartStore;
