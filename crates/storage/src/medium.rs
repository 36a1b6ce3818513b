use std::sync::Arc;

use crate::error::StorageError;

/// Durable string-keyed medium (the browser-storage-like layer).
///
/// Implementations report failures; [`KeyValueStore`](crate::KeyValueStore) is
/// the layer that swallows them.
pub trait StorageMedium: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
    /// Remove every stored item.
    fn clear(&self) -> Result<(), StorageError>;
}

impl<S> StorageMedium for Arc<S>
where
    S: StorageMedium + ?Sized,
{
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}
