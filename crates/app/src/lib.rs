//! `storefront-app`
//!
//! Configuration, the theme preference and the composition root that wires the
//! storefront stores together over one persistence medium.

pub mod config;
pub mod theme;
pub mod wiring;

pub use config::AppConfig;
pub use theme::{Theme, ThemeStore};
pub use wiring::Storefront;
