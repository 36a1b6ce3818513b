use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult};

/// Buyer details collected on the checkout page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub country: Option<String>,
}

impl CheckoutForm {
    /// Every required field must be non-blank and the email well-formed.
    pub fn validate(&self) -> DomainResult<()> {
        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("zipCode", &self.zip_code),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        if !is_email(self.email.trim()) {
            return Err(DomainError::validation("email is not a valid address"));
        }
        Ok(())
    }

    pub fn customer_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}
