//! Where the canonical product list comes from.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::product::Product;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read catalogue file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalogue payload is not a product list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalogue request failed: {0}")]
    Network(String),

    #[error("catalogue endpoint returned HTTP {0}")]
    Status(u16),
}

/// Read-only source of the full product list (no pagination, no auth).
///
/// One call, one attempt: no retries, timeouts or cancellation are layered on
/// top, so a hung source leaves the catalogue in `Loading`.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>, SourceError>;
}

#[async_trait]
impl<S> ProductSource for Arc<S>
where
    S: ProductSource + ?Sized,
{
    async fn fetch_products(&self) -> Result<Vec<Product>, SourceError> {
        (**self).fetch_products().await
    }
}

/// Decode a catalogue payload: a JSON array of product records.
///
/// A payload that is not an array fails as a whole. Individual records that
/// fail to decode or validate are skipped with a warning, so one bad record
/// does not hide the rest of the catalogue.
pub fn parse_catalogue(raw: &str) -> Result<Vec<Product>, SourceError> {
    let records: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let total = records.len();

    let products: Vec<Product> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Product>(record) {
            Ok(product) => Some(product),
            Err(err) => {
                tracing::warn!(index, "skipping invalid product record: {err}");
                None
            }
        })
        .collect();

    if products.len() < total {
        tracing::warn!(skipped = total - products.len(), total, "catalogue contained invalid records");
    }
    Ok(products)
}

/// Static JSON asset on disk (e.g. `assets/data/products.json`).
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProductSource for JsonFileSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, SourceError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        let products = parse_catalogue(&raw)?;
        tracing::debug!(path = ?self.path, count = products.len(), "catalogue file read");
        Ok(products)
    }
}

/// Remote JSON endpoint.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl ProductSource for HttpSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, SourceError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status().as_u16()));
        }

        let body = resp.text().await.map_err(|e| SourceError::Network(e.to_string()))?;
        parse_catalogue(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_file(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        std::env::temp_dir().join(format!("storefront-{name}-{}-{nanos}.json", std::process::id()))
    }

    #[tokio::test]
    async fn reads_products_from_file() {
        let path = scratch_file("source-ok");
        std::fs::write(
            &path,
            r#"[{"id":1,"name":"Desk Lamp","slug":"desk-lamp","price":25.5,"inStock":true}]"#,
        )
        .unwrap();

        let products = JsonFileSource::new(&path).fetch_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].slug(), "desk-lamp");

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = JsonFileSource::new(scratch_file("source-missing"))
            .fetch_products()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn malformed_payload_is_a_parse_error() {
        let path = scratch_file("source-bad");
        std::fs::write(&path, r#"{"products": []}"#).unwrap();

        let err = JsonFileSource::new(&path).fetch_products().await.unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn invalid_records_are_skipped_not_fatal() {
        let raw = r#"[
            {"id":1,"name":"Desk Lamp","slug":"desk-lamp","price":25.5,"inStock":true},
            {"id":2,"name":"Chair Deluxe","slug":"Chair Deluxe","price":120,"inStock":true},
            {"id":3,"name":"Mug","slug":"mug","price":4,"inStock":false,"rating":7.5},
            {"id":4,"name":"Rug","slug":"rug","price":60,"inStock":true}
        ]"#;

        let products = parse_catalogue(raw).unwrap();

        let slugs: Vec<_> = products.iter().map(|p| p.slug()).collect();
        assert_eq!(slugs, ["desk-lamp", "rug"]);
    }
}
