//! Payment collaborator contract.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, Money};

/// Free-form metadata field shown alongside the payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub display_name: String,
    pub variable_name: String,
    pub value: String,
}

impl CustomField {
    pub fn new(display_name: &str, variable_name: &str, value: impl Into<String>) -> Self {
        Self {
            display_name: display_name.to_string(),
            variable_name: variable_name.to_string(),
            value: value.into(),
        }
    }
}

/// What the payment widget is opened with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    amount: Money,
    currency: String,
    email: String,
    custom_fields: Vec<CustomField>,
}

impl PaymentRequest {
    /// The amount must be positive; the collaborator is never asked for zero.
    pub fn new(
        amount: Money,
        currency: impl Into<String>,
        email: impl Into<String>,
        custom_fields: Vec<CustomField>,
    ) -> Result<Self, DomainError> {
        if amount.is_zero() {
            return Err(DomainError::invalid_amount("payment amount must be positive"));
        }
        Ok(Self {
            amount,
            currency: currency.into(),
            email: email.into(),
            custom_fields,
        })
    }

    /// Amount in minor currency units.
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn custom_fields(&self) -> &[CustomField] {
        &self.custom_fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub reference: String,
    pub status: String,
}

/// The single result of opening the payment widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Success(PaymentReceipt),
    /// Widget closed without paying. Not an error.
    Cancelled,
}

/// External payment widget.
///
/// Resolves once, with either a receipt or a cancellation.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn collect(&self, request: PaymentRequest) -> PaymentOutcome;
}

#[async_trait]
impl<G> PaymentGateway for Arc<G>
where
    G: PaymentGateway + ?Sized,
{
    async fn collect(&self, request: PaymentRequest) -> PaymentOutcome {
        (**self).collect(request).await
    }
}
