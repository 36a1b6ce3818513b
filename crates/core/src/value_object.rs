//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. Two value objects with the same values are equal.

use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// - **Value Object**: `Money(19998)`, a cart total
/// - **Entity**: a `Product`, identified by its `ProductId`
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Non-negative monetary amount in minor currency units (e.g. kobo, cents).
///
/// On the wire the catalogue carries prices as decimal major-unit numbers
/// (`99.99`); they are converted to minor units by rounding `value * 100`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Convert a decimal major-unit amount into minor units.
    pub fn from_major(major: f64) -> Result<Self, DomainError> {
        if !major.is_finite() {
            return Err(DomainError::invalid_amount("amount must be a finite number"));
        }
        if major < 0.0 {
            return Err(DomainError::invalid_amount("amount cannot be negative"));
        }
        let minor = (major * 100.0).round();
        if minor > u64::MAX as f64 {
            return Err(DomainError::invalid_amount("amount is too large"));
        }
        Ok(Self(minor as u64))
    }

    pub const fn minor(self) -> u64 {
        self.0
    }

    pub fn as_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Line amount for `quantity` units; saturates instead of overflowing.
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_major())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let major = f64::deserialize(deserializer)?;
        Money::from_major(major).map_err(serde::de::Error::custom)
    }
}
