use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StorageError;
use crate::medium::StorageMedium;

/// In-memory medium for tests/dev.
///
/// Can be configured with a byte quota (key + value lengths) or made entirely
/// unavailable, to exercise the fail-soft paths.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    inner: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
    unavailable: bool,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes that would push total usage above `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Every operation fails (e.g. storage disabled by the host).
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl StorageMedium for MemoryMedium {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        let map = self.inner.read().map_err(|_| StorageError::Unavailable)?;
        Ok(map.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        let mut map = self.inner.write().map_err(|_| StorageError::Unavailable)?;

        if let Some(quota) = self.quota {
            let others: usize = map
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        let mut map = self.inner.write().map_err(|_| StorageError::Unavailable)?;
        map.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.check_available()?;
        let mut map = self.inner.write().map_err(|_| StorageError::Unavailable)?;
        map.clear();
        Ok(())
    }
}
