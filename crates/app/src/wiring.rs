//! Composition root.

use std::sync::Arc;

use storefront_cart::CartStore;
use storefront_checkout::CheckoutService;
use storefront_products::{
    CatalogueStore, FilterCriteria, JsonFileSource, LoadState, Product, ProductSource, apply_filters,
};
use storefront_state::Notifier;
use storefront_storage::{FileMedium, KeyValueStore};

use crate::config::AppConfig;
use crate::theme::ThemeStore;

/// Every storefront store, built once and shared by reference.
///
/// All stores persist through the same [`KeyValueStore`]; nothing here is
/// global, so several storefronts can coexist (e.g. in tests).
#[derive(Debug)]
pub struct Storefront {
    pub config: AppConfig,
    pub kv: KeyValueStore,
    pub catalogue: Arc<CatalogueStore>,
    pub cart: Arc<CartStore>,
    pub theme: ThemeStore,
    pub notifier: Arc<Notifier>,
    pub checkout: CheckoutService,
}

impl Storefront {
    /// Wire against a file medium rooted at `config.data_dir`.
    pub fn wire(config: AppConfig) -> Self {
        let kv = KeyValueStore::new(FileMedium::new(&config.data_dir));
        Self::wire_with(config, kv)
    }

    /// Wire against a caller-provided store.
    pub fn wire_with(config: AppConfig, kv: KeyValueStore) -> Self {
        let catalogue = Arc::new(CatalogueStore::new(kv.clone()));
        let cart = Arc::new(CartStore::new(kv.clone()));
        let theme = ThemeStore::new(kv.clone(), config.prefers_dark);
        let notifier = Arc::new(Notifier::new());
        let checkout =
            CheckoutService::new(cart.clone(), kv.clone(), notifier.clone(), config.currency.clone());

        tracing::info!(
            data_dir = %config.data_dir.display(),
            cart_lines = cart.cart().items().len(),
            theme = %theme.theme(),
            "storefront wired"
        );

        Self {
            config,
            kv,
            catalogue,
            cart,
            theme,
            notifier,
            checkout,
        }
    }

    /// The configured catalogue source.
    pub fn product_source(&self) -> Arc<dyn ProductSource> {
        if let Some(url) = &self.config.products_url {
            #[cfg(feature = "http")]
            {
                tracing::debug!(%url, "using remote catalogue");
                return Arc::new(storefront_products::HttpSource::new(url.clone()));
            }
            #[cfg(not(feature = "http"))]
            tracing::warn!(%url, "remote catalogue configured but the http feature is disabled; reading the file instead");
        }
        Arc::new(JsonFileSource::new(&self.config.products_file))
    }

    /// Load the catalogue from the configured source (or the cache).
    pub async fn load_catalogue(&self) -> LoadState {
        let source = self.product_source();
        self.catalogue.load(source.as_ref()).await
    }

    /// The current catalogue run through the filter/sort pipeline.
    pub fn browse(&self, criteria: &FilterCriteria) -> Vec<Product> {
        self.catalogue.with_products(|products| apply_filters(products, criteria))
    }
}
