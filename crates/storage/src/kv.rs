//! Fail-soft JSON key-value store.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::keys::StorageKey;
use crate::medium::StorageMedium;
use crate::memory::MemoryMedium;

/// JSON documents over a [`StorageMedium`].
///
/// No operation returns an error: medium failures are logged at `error`,
/// undecodable documents at `warn`, and the call degrades to `None` / no-op.
/// Cloning is cheap and shares the medium.
#[derive(Clone)]
pub struct KeyValueStore {
    medium: Arc<dyn StorageMedium>,
}

impl core::fmt::Debug for KeyValueStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyValueStore").finish_non_exhaustive()
    }
}

impl KeyValueStore {
    pub fn new(medium: impl StorageMedium + 'static) -> Self {
        Self {
            medium: Arc::new(medium),
        }
    }

    pub fn from_arc(medium: Arc<dyn StorageMedium>) -> Self {
        Self { medium }
    }

    /// Store backed by a fresh [`MemoryMedium`].
    pub fn in_memory() -> Self {
        Self::new(MemoryMedium::new())
    }

    pub fn medium(&self) -> &Arc<dyn StorageMedium> {
        &self.medium
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(key = %key, "failed to serialize value for storage: {err}");
                return;
            }
        };

        if let Err(err) = self.medium.set_item(key.as_str(), &json) {
            tracing::error!(key = %key, "failed to save to storage: {err}");
        }
    }

    /// `None` when the key is absent, empty, unreadable or not decodable as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        let raw = match self.medium.get_item(key.as_str()) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return None,
            Err(err) => {
                tracing::error!(key = %key, "failed to retrieve from storage: {err}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key = %key, "discarding undecodable stored value: {err}");
                None
            }
        }
    }

    pub fn remove(&self, key: StorageKey) {
        if let Err(err) = self.medium.remove_item(key.as_str()) {
            tracing::error!(key = %key, "failed to remove from storage: {err}");
        }
    }

    pub fn clear(&self) {
        if let Err(err) = self.medium.clear() {
            tracing::error!("failed to clear storage: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        id: u64,
        quantity: u32,
    }

    #[test]
    fn set_then_get_returns_the_value() {
        let kv = KeyValueStore::in_memory();
        let lines = vec![Line { id: 1, quantity: 2 }];
        kv.set(StorageKey::Cart, &lines);

        assert_eq!(kv.get::<Vec<Line>>(StorageKey::Cart), Some(lines));
        assert_eq!(kv.get::<Vec<Line>>(StorageKey::Products), None);
    }

    #[test]
    fn corrupt_and_incompatible_values_read_as_absent() {
        let medium = Arc::new(MemoryMedium::new());
        let kv = KeyValueStore::from_arc(medium.clone());

        medium.set_item("cart", "{not json").unwrap();
        assert_eq!(kv.get::<Vec<Line>>(StorageKey::Cart), None);

        medium.set_item("cart", r#"{"id":"one"}"#).unwrap();
        assert_eq!(kv.get::<Vec<Line>>(StorageKey::Cart), None);

        medium.set_item("cart", "").unwrap();
        assert_eq!(kv.get::<Vec<Line>>(StorageKey::Cart), None);
    }

    #[test]
    fn unavailable_medium_degrades_to_no_op() {
        let kv = KeyValueStore::new(MemoryMedium::unavailable());
        kv.set(StorageKey::Theme, "dark");
        kv.remove(StorageKey::Theme);
        kv.clear();
        assert_eq!(kv.get::<String>(StorageKey::Theme), None);
    }

    #[test]
    fn quota_failure_keeps_previous_document() {
        let medium = Arc::new(MemoryMedium::with_quota(24));
        let kv = KeyValueStore::from_arc(medium.clone());

        kv.set(StorageKey::Theme, "dark");
        kv.set(StorageKey::Theme, &"x".repeat(64));

        assert_eq!(kv.get::<String>(StorageKey::Theme).as_deref(), Some("dark"));
    }

    #[test]
    fn remove_and_clear() {
        let kv = KeyValueStore::in_memory();
        kv.set(StorageKey::Theme, "light");
        kv.set(StorageKey::LastOrderId, "ORD-1-ABCDEFGHI");

        kv.remove(StorageKey::Theme);
        assert_eq!(kv.get::<String>(StorageKey::Theme), None);
        assert!(kv.get::<String>(StorageKey::LastOrderId).is_some());

        kv.clear();
        for key in StorageKey::ALL {
            assert_eq!(kv.get::<serde_json::Value>(key), None);
        }
    }
}
