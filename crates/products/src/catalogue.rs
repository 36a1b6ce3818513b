//! Observable product catalogue.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use storefront_state::{StateCell, Subscription};
use storefront_storage::{KeyValueStore, StorageKey};

use crate::product::Product;
use crate::source::ProductSource;

/// User-facing message published when the catalogue cannot be fetched.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products. Please try again later.";

/// Catalogue lifecycle: `Idle → Loading → {Loaded | Failed}`.
///
/// A cache hit goes straight from `Idle` to `Loaded`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Product catalogue store.
///
/// Publishes the product list, the loading flag and the error message as
/// separate observable cells. Subscribers never observe an undefined list: it
/// starts empty and falls back to empty on failure.
#[derive(Debug)]
pub struct CatalogueStore {
    kv: KeyValueStore,
    started: AtomicBool,
    state: StateCell<LoadState>,
    products: StateCell<Vec<Product>>,
    loading: StateCell<bool>,
    error: StateCell<Option<String>>,
}

impl CatalogueStore {
    pub fn new(kv: KeyValueStore) -> Self {
        Self {
            kv,
            started: AtomicBool::new(false),
            state: StateCell::new(LoadState::Idle),
            products: StateCell::new(Vec::new()),
            loading: StateCell::new(false),
            error: StateCell::new(None),
        }
    }

    /// Hydrate from the cached list, or fetch from `source` when the cache is
    /// missing or empty.
    ///
    /// Runs once per store; later calls return the current state without
    /// touching the cache or the source. A failed load is only recovered by
    /// building a new store.
    pub async fn load<S>(&self, source: &S) -> LoadState
    where
        S: ProductSource + ?Sized,
    {
        if self.started.swap(true, Ordering::SeqCst) {
            tracing::debug!(state = ?self.state(), "catalogue load already started");
            return self.state();
        }

        let cached = self
            .kv
            .get::<Vec<Product>>(StorageKey::Products)
            .filter(|products| !products.is_empty());
        if let Some(products) = cached {
            tracing::info!(count = products.len(), "catalogue served from cache");
            self.products.set(products);
            self.state.set(LoadState::Loaded);
            return LoadState::Loaded;
        }

        self.state.set(LoadState::Loading);
        self.loading.set(true);
        self.error.set(None);

        let outcome = match source.fetch_products().await {
            Ok(products) => {
                tracing::info!(count = products.len(), "catalogue fetched");
                self.kv.set(StorageKey::Products, &products);
                self.products.set(products);
                LoadState::Loaded
            }
            Err(err) => {
                tracing::error!("failed to load products: {err}");
                self.error.set(Some(LOAD_FAILED_MESSAGE.to_string()));
                self.products.set(Vec::new());
                LoadState::Failed
            }
        };

        self.state.set(outcome);
        self.loading.set(false);
        outcome
    }

    pub fn state(&self) -> LoadState {
        self.state.get()
    }

    pub fn subscribe_state(&self) -> Subscription<LoadState> {
        self.state.subscribe()
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.get()
    }

    /// Borrow the current list without cloning it.
    pub fn with_products<R>(&self, f: impl FnOnce(&[Product]) -> R) -> R {
        self.products.with(|products| f(products))
    }

    pub fn subscribe_products(&self) -> Subscription<Vec<Product>> {
        self.products.subscribe()
    }

    /// True only while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn subscribe_loading(&self) -> Subscription<bool> {
        self.loading.subscribe()
    }

    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    pub fn subscribe_error(&self) -> Subscription<Option<String>> {
        self.error.subscribe()
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<Product> {
        self.products
            .with(|products| products.iter().find(|p| p.slug() == slug).cloned())
    }

    pub fn get_by_category(&self, category: &str) -> Vec<Product> {
        self.products.with(|products| {
            products
                .iter()
                .filter(|p| p.category() == category)
                .cloned()
                .collect()
        })
    }

    /// Case-insensitive substring match on name or description.
    pub fn search(&self, query: &str) -> Vec<Product> {
        let query = query.to_lowercase();
        self.products.with(|products| {
            products
                .iter()
                .filter(|p| {
                    p.name().to_lowercase().contains(&query)
                        || p.description().to_lowercase().contains(&query)
                })
                .cloned()
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use storefront_core::Money;
    use storefront_storage::{MemoryMedium, StorageMedium};

    use crate::product::NewProduct;
    use crate::source::SourceError;

    fn mock_products() -> Vec<Product> {
        vec![
            NewProduct::new(1, "Test Product 1", Money::from_minor(9999))
                .description("Test Description 1")
                .category("Electronics")
                .rating(4.5)
                .reviews(10)
                .build()
                .unwrap(),
            NewProduct::new(2, "Test Product 2", Money::from_minor(14999))
                .description("Soft cotton")
                .category("Clothing")
                .in_stock(false)
                .rating(4.0)
                .reviews(5)
                .build()
                .unwrap(),
        ]
    }

    /// Source that counts calls and returns a fixed result.
    struct CountingSource {
        calls: AtomicUsize,
        result: Option<Vec<Product>>,
    }

    impl CountingSource {
        fn ok(products: Vec<Product>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: Some(products),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: None,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProductSource for CountingSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .clone()
                .ok_or_else(|| SourceError::Network("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn serves_cached_products_without_fetching() {
        let kv = KeyValueStore::in_memory();
        kv.set(StorageKey::Products, &mock_products());
        let source = CountingSource::ok(vec![]);

        let store = CatalogueStore::new(kv);
        let loading = store.subscribe_loading();

        assert_eq!(store.load(&source).await, LoadState::Loaded);
        assert_eq!(source.calls(), 0);
        assert_eq!(store.products(), mock_products());
        assert_eq!(loading.drain(), vec![false]);
    }

    #[tokio::test]
    async fn fetches_and_caches_when_cache_is_empty() {
        let medium = Arc::new(MemoryMedium::new());
        let kv = KeyValueStore::from_arc(medium.clone());
        kv.set(StorageKey::Products, &Vec::<Product>::new());
        let source = CountingSource::ok(mock_products());

        let store = CatalogueStore::new(kv.clone());
        let loading = store.subscribe_loading();
        let states = store.subscribe_state();

        assert_eq!(store.load(&source).await, LoadState::Loaded);
        assert_eq!(source.calls(), 1);
        assert_eq!(store.products(), mock_products());
        assert_eq!(kv.get::<Vec<Product>>(StorageKey::Products), Some(mock_products()));
        assert!(medium.get_item("products").unwrap().is_some());

        assert_eq!(loading.drain(), vec![false, true, false]);
        assert_eq!(
            states.drain(),
            vec![LoadState::Idle, LoadState::Loading, LoadState::Loaded]
        );
        assert!(!store.is_loading());
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn fetch_failure_publishes_empty_list_and_message_once() {
        let store = CatalogueStore::new(KeyValueStore::in_memory());
        let products = store.subscribe_products();
        let errors = store.subscribe_error();

        assert_eq!(store.load(&CountingSource::failing()).await, LoadState::Failed);

        let product_history = products.drain();
        assert_eq!(product_history.last(), Some(&Vec::new()));

        let messages: Vec<_> = errors.drain().into_iter().flatten().collect();
        assert_eq!(messages, vec![LOAD_FAILED_MESSAGE.to_string()]);

        assert_eq!(store.state(), LoadState::Failed);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn load_runs_only_once() {
        let source = CountingSource::failing();
        let store = CatalogueStore::new(KeyValueStore::in_memory());

        store.load(&source).await;
        assert_eq!(store.load(&source).await, LoadState::Failed);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn unreadable_cache_falls_back_to_fetch() {
        let medium = Arc::new(MemoryMedium::new());
        medium.set_item("products", "[{\"broken\": true}]").unwrap();
        let source = CountingSource::ok(mock_products());

        let store = CatalogueStore::new(KeyValueStore::from_arc(medium));
        assert_eq!(store.load(&source).await, LoadState::Loaded);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn lookup_accessors() {
        let kv = KeyValueStore::in_memory();
        kv.set(StorageKey::Products, &mock_products());
        let store = CatalogueStore::new(kv);
        store.load(&CountingSource::failing()).await;

        assert_eq!(store.get_by_slug("test-product-1").map(|p| p.reviews()), Some(10));
        assert!(store.get_by_slug("non-existent").is_none());

        let clothing = store.get_by_category("Clothing");
        assert_eq!(clothing.len(), 1);
        assert_eq!(clothing[0].name(), "Test Product 2");
        assert!(store.get_by_category("clothing").is_empty());

        assert_eq!(store.search("COTTON").len(), 1);
        assert_eq!(store.search("test product").len(), 2);
        // Category is not part of the store-level search.
        assert!(store.search("electronics").is_empty());
    }
}
