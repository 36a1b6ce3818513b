//! Products domain module.
//!
//! This crate contains the catalogue side of the storefront:
//! - the immutable [`Product`] record and its JSON wire format
//! - [`CatalogueStore`], the observable product list with its load state machine
//! - [`ProductSource`] implementations the catalogue is fetched from
//! - the pure filter/sort pipeline behind the catalogue page

pub mod catalogue;
pub mod filter;
pub mod product;
pub mod source;

pub use catalogue::{CatalogueStore, LOAD_FAILED_MESSAGE, LoadState};
pub use filter::{FilterCriteria, PriceRange, SortBy, SortOrder, apply_filters, categories, price_range};
pub use product::{NewProduct, Product};
#[cfg(feature = "http")]
pub use source::HttpSource;
pub use source::{JsonFileSource, ProductSource, SourceError, parse_catalogue};
