//! Persisted state layout.

/// Keys of the documents the storefront persists.
///
/// Each key is independent; values carry no schema version, so a structurally
/// incompatible document simply fails to decode and is treated as absent.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Cart line items.
    Cart,
    /// Cached product catalogue.
    Products,
    /// Selected colour theme.
    Theme,
    /// Identifier of the most recently placed order.
    LastOrderId,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::Cart,
        StorageKey::Products,
        StorageKey::Theme,
        StorageKey::LastOrderId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Cart => "cart",
            StorageKey::Products => "products",
            StorageKey::Theme => "theme",
            StorageKey::LastOrderId => "last_order_id",
        }
    }
}

impl core::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
