//! Strongly-typed identifiers used across the storefront.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a catalogue product.
///
/// Numeric, assigned by the catalogue data source.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::invalid_id(format!("ProductId: {e}")))?;
        Ok(Self(id))
    }
}

const ORDER_PREFIX: &str = "ORD-";
const ORDER_SUFFIX_LEN: usize = 9;

/// Identifier of a placed order: `ORD-<unix millis>-<9 uppercase alphanumerics>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Generate a fresh order id stamped with `now`.
    ///
    /// The suffix is taken from the random tail of a UUIDv7.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let hex = Uuid::now_v7().simple().to_string().to_uppercase();
        let suffix = &hex[hex.len() - ORDER_SUFFIX_LEN..];
        Self(format!("{ORDER_PREFIX}{}-{suffix}", now.timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for OrderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(ORDER_PREFIX)
            .ok_or_else(|| DomainError::invalid_id(format!("OrderId: missing {ORDER_PREFIX} prefix")))?;
        let (millis, suffix) = rest
            .split_once('-')
            .ok_or_else(|| DomainError::invalid_id("OrderId: missing suffix"))?;

        if millis.is_empty() || !millis.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_id("OrderId: timestamp must be numeric"));
        }
        if suffix.len() != ORDER_SUFFIX_LEN
            || !suffix.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
        {
            return Err(DomainError::invalid_id(
                "OrderId: suffix must be 9 uppercase alphanumerics",
            ));
        }

        Ok(Self(s.to_string()))
    }
}
