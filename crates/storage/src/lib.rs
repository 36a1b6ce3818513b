//! `storefront-storage`
//!
//! **Responsibility:** fail-soft persistence of small JSON documents.
//!
//! - [`StorageMedium`]: raw string-keyed medium (in-memory or on disk)
//! - [`KeyValueStore`]: JSON (de)serialisation on top of a medium; every failure is
//!   logged and degrades to "absent" / no-op
//!
//! Persistence is a convenience: the storefront keeps working with an empty cart
//! and catalogue when the medium is unavailable.

pub mod error;
pub mod file;
pub mod keys;
pub mod kv;
pub mod medium;
pub mod memory;

pub use error::StorageError;
pub use file::FileMedium;
pub use keys::StorageKey;
pub use kv::KeyValueStore;
pub use medium::StorageMedium;
pub use memory::MemoryMedium;
