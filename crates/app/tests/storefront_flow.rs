//! End-to-end flows through the wired storefront, on a scratch data directory.

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use storefront_app::{AppConfig, Storefront, Theme};
use storefront_checkout::{
    CheckoutForm, CheckoutOutcome, PaymentGateway, PaymentOutcome, PaymentReceipt, PaymentRequest,
};
use storefront_core::{Money, ProductId};
use storefront_products::{FilterCriteria, LoadState};

const CATALOGUE: &str = r#"[
  {"id": 1, "name": "Wireless Headphones", "slug": "wireless-headphones", "description": "Noise cancelling",
   "price": 99.99, "category": "Electronics", "inStock": true, "rating": 4.5, "reviews": 10, "features": []},
  {"id": 2, "name": "Smart Watch", "slug": "smart-watch", "description": "Fitness tracking",
   "price": 149.5, "category": "Electronics", "inStock": false, "rating": 4.2, "reviews": 3, "features": []},
  {"id": 3, "name": "Coffee Mug", "slug": "coffee-mug", "description": "Stoneware",
   "price": 12.25, "category": "Home", "inStock": true, "rating": 4.1, "reviews": 7, "features": []}
]"#;

struct Scratch {
    root: PathBuf,
}

impl Scratch {
    fn new(name: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let root = std::env::temp_dir().join(format!("storefront-app-{name}-{}-{nanos}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("products.json"), CATALOGUE).unwrap();
        Self { root }
    }

    fn config(&self) -> AppConfig {
        AppConfig {
            products_file: self.root.join("products.json"),
            ..AppConfig::with_data_dir(self.root.join("data"))
        }
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

struct ApprovingGateway {
    amounts: Mutex<Vec<Money>>,
}

#[async_trait]
impl PaymentGateway for ApprovingGateway {
    async fn collect(&self, request: PaymentRequest) -> PaymentOutcome {
        self.amounts.lock().unwrap().push(request.amount());
        PaymentOutcome::Success(PaymentReceipt {
            reference: "T-0001".to_string(),
            status: "success".to_string(),
        })
    }
}

fn checkout_form() -> CheckoutForm {
    CheckoutForm {
        first_name: "Ada".to_string(),
        last_name: "Obi".to_string(),
        email: "ada@example.com".to_string(),
        phone: Some("08030000000".to_string()),
        address: "12 Marina Road".to_string(),
        city: "Lagos".to_string(),
        zip_code: "100001".to_string(),
        country: None,
    }
}

#[tokio::test]
async fn catalogue_loads_from_file_and_is_cached_for_the_next_start() {
    let scratch = Scratch::new("cache");

    let first = Storefront::wire(scratch.config());
    assert_eq!(first.load_catalogue().await, LoadState::Loaded);
    assert_eq!(first.catalogue.products().len(), 3);
    assert!(scratch.root.join("data").join("products.json").exists());

    // The asset is gone; the second start must be served from the cache.
    std::fs::remove_file(scratch.root.join("products.json")).unwrap();
    let second = Storefront::wire(scratch.config());
    assert_eq!(second.load_catalogue().await, LoadState::Loaded);
    assert_eq!(second.catalogue.products(), first.catalogue.products());
}

#[tokio::test]
async fn missing_catalogue_reports_a_single_error() {
    let scratch = Scratch::new("missing");
    let config = AppConfig {
        products_file: scratch.root.join("nope.json"),
        ..scratch.config()
    };

    let storefront = Storefront::wire(config);
    let errors = storefront.catalogue.subscribe_error();

    assert_eq!(storefront.load_catalogue().await, LoadState::Failed);
    assert!(storefront.catalogue.products().is_empty());
    let shown: Vec<_> = errors.drain().into_iter().flatten().collect();
    assert_eq!(shown.len(), 1);
}

#[tokio::test]
async fn browse_applies_query_parameters() {
    let scratch = Scratch::new("browse");
    let storefront = Storefront::wire(scratch.config());
    storefront.load_catalogue().await;

    let criteria = FilterCriteria::from_query_pairs([
        ("category", "Electronics"),
        ("sortBy", "price"),
        ("sortOrder", "desc"),
    ]);
    let names: Vec<_> = storefront
        .browse(&criteria)
        .iter()
        .map(|p| p.name().to_string())
        .collect();
    assert_eq!(names, ["Smart Watch", "Wireless Headphones"]);

    let in_stock = FilterCriteria::from_query_pairs([("inStock", "true"), ("maxPrice", "100")]);
    let ids: Vec<_> = storefront.browse(&in_stock).iter().map(|p| p.id_typed()).collect();
    assert_eq!(ids, [ProductId::new(3), ProductId::new(1)]);
}

#[tokio::test]
async fn cart_and_theme_survive_a_restart() {
    let scratch = Scratch::new("restart");
    {
        let storefront = Storefront::wire(scratch.config());
        storefront.load_catalogue().await;
        let headphones = storefront.catalogue.get_by_slug("wireless-headphones").unwrap();
        storefront.cart.add_to_cart(&headphones, 2);
        storefront.theme.set_theme(Theme::Dark);
    }

    let storefront = Storefront::wire(scratch.config());
    let cart = storefront.cart.cart();
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.total(), Money::from_minor(19998));
    assert_eq!(cart.total().to_string(), "199.98");
    assert_eq!(storefront.theme.theme(), Theme::Dark);
}

#[tokio::test]
async fn checkout_clears_the_persisted_cart() {
    let scratch = Scratch::new("checkout");
    let storefront = Storefront::wire(scratch.config());
    storefront.load_catalogue().await;
    let mug = storefront.catalogue.get_by_slug("coffee-mug").unwrap();
    storefront.cart.add_to_cart(&mug, 4);

    let gateway = ApprovingGateway {
        amounts: Mutex::new(Vec::new()),
    };
    let outcome = storefront
        .checkout
        .place_order(&checkout_form(), &gateway)
        .await
        .unwrap();

    let CheckoutOutcome::Completed { order_id, .. } = outcome else {
        panic!("expected a completed checkout");
    };
    assert_eq!(*gateway.amounts.lock().unwrap(), [Money::from_minor(4900)]);
    assert!(order_id.as_str().starts_with("ORD-"));

    let reopened = Storefront::wire(scratch.config());
    assert!(reopened.cart.cart().is_empty());
    assert_eq!(reopened.checkout.last_order_id(), Some(order_id));
}
