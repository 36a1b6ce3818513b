use anyhow::{Context, bail};
use storefront_app::{AppConfig, Storefront};
use storefront_products::{FilterCriteria, LOAD_FAILED_MESSAGE, LoadState, categories, price_range};

/// Split `key=value` arguments into query pairs.
fn query_pairs(args: impl IntoIterator<Item = String>) -> anyhow::Result<Vec<(String, String)>> {
    args.into_iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .with_context(|| format!("expected key=value, got {arg:?}"))
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let pairs = query_pairs(std::env::args().skip(1))?;
    let criteria = FilterCriteria::from_query_pairs(pairs);

    let storefront = Storefront::wire(AppConfig::from_env());
    if storefront.load_catalogue().await == LoadState::Failed {
        let message = storefront
            .catalogue
            .error()
            .unwrap_or_else(|| LOAD_FAILED_MESSAGE.to_string());
        bail!(message);
    }

    let all = storefront.catalogue.products();
    let range = price_range(&all);
    let shown = storefront.browse(&criteria);
    tracing::info!(total = all.len(), shown = shown.len(), query = ?criteria.to_query_pairs(), "catalogue filtered");

    println!(
        "{} of {} products | categories: {} | prices {}..{} {}",
        shown.len(),
        all.len(),
        categories(&all).join(", "),
        range.min,
        range.max,
        storefront.config.currency,
    );
    for product in &shown {
        println!(
            "{:>5}  {:<36} {:>10}  {:<14} {}",
            product.id_typed().to_string(),
            product.name(),
            product.price().to_string(),
            product.category(),
            if product.in_stock() { "in stock" } else { "sold out" },
        );
    }

    Ok(())
}
