//! Domain error model.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Deterministic domain failures: bad input records, amounts and identifiers.
///
/// Storage and network failures are owned by the crates that do the IO.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A record or form failed validation (e.g. a required checkout field is empty).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A monetary amount is unusable (negative, non-finite, zero where a charge is needed).
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
