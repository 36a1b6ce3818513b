//! Environment-driven configuration for the storefront binary.

use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "STOREFRONT_DATA_DIR";
pub const PRODUCTS_FILE_VAR: &str = "STOREFRONT_PRODUCTS_FILE";
pub const PRODUCTS_URL_VAR: &str = "STOREFRONT_PRODUCTS_URL";
pub const CURRENCY_VAR: &str = "STOREFRONT_CURRENCY";
pub const PREFERS_DARK_VAR: &str = "STOREFRONT_PREFERS_DARK";

pub const DEFAULT_PRODUCTS_FILE: &str = "assets/data/products.json";
pub const DEFAULT_CURRENCY: &str = "NGN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the persisted cart, catalogue cache, theme and last order id.
    pub data_dir: PathBuf,
    pub products_file: PathBuf,
    /// Remote catalogue; wins over `products_file` when the `http` feature is enabled.
    pub products_url: Option<String>,
    pub currency: String,
    /// Platform "prefers dark" hint used when no theme has been saved yet.
    pub prefers_dark: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data_dir = var(DATA_DIR_VAR).map(PathBuf::from).unwrap_or_else(|| {
            let dir = default_data_dir();
            tracing::warn!(dir = %dir.display(), "{DATA_DIR_VAR} not set; using default data directory");
            dir
        });

        let products_file = var(PRODUCTS_FILE_VAR).map(PathBuf::from).unwrap_or_else(|| {
            tracing::debug!("{PRODUCTS_FILE_VAR} not set; using {DEFAULT_PRODUCTS_FILE}");
            PathBuf::from(DEFAULT_PRODUCTS_FILE)
        });

        let currency = var(CURRENCY_VAR)
            .map(|c| c.trim().to_ascii_uppercase())
            .unwrap_or_else(|| {
                tracing::debug!("{CURRENCY_VAR} not set; using {DEFAULT_CURRENCY}");
                DEFAULT_CURRENCY.to_string()
            });

        let prefers_dark = var(PREFERS_DARK_VAR)
            .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"));

        Self {
            data_dir,
            products_file,
            products_url: var(PRODUCTS_URL_VAR),
            currency,
            prefers_dark,
        }
    }

    /// Defaults rooted at `data_dir`; handy for tests and embedding.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            products_file: PathBuf::from(DEFAULT_PRODUCTS_FILE),
            products_url: None,
            currency: DEFAULT_CURRENCY.to_string(),
            prefers_dark: false,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("storefront"))
        .unwrap_or_else(|| PathBuf::from(".storefront"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[]));

        assert_eq!(config.products_file, PathBuf::from(DEFAULT_PRODUCTS_FILE));
        assert_eq!(config.products_url, None);
        assert_eq!(config.currency, "NGN");
        assert!(!config.prefers_dark);
        assert!(config.data_dir.ends_with("storefront") || config.data_dir.ends_with(".storefront"));
    }

    #[test]
    fn variables_override_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            (DATA_DIR_VAR, "/var/lib/shop"),
            (PRODUCTS_FILE_VAR, "fixtures/products.json"),
            (PRODUCTS_URL_VAR, "https://shop.example/products.json"),
            (CURRENCY_VAR, " usd "),
            (PREFERS_DARK_VAR, "true"),
        ]));

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/shop"));
        assert_eq!(config.products_file, PathBuf::from("fixtures/products.json"));
        assert_eq!(config.products_url.as_deref(), Some("https://shop.example/products.json"));
        assert_eq!(config.currency, "USD");
        assert!(config.prefers_dark);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = AppConfig::from_lookup(lookup(&[(PRODUCTS_URL_VAR, "  "), (CURRENCY_VAR, "")]));

        assert_eq!(config.products_url, None);
        assert_eq!(config.currency, DEFAULT_CURRENCY);
    }
}
