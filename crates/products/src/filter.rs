//! Catalogue filter/sort pipeline.
//!
//! [`apply_filters`] is pure: it never touches the source list and always
//! returns a new derived list. The criteria mirror the catalogue page's query
//! parameters (`search, category, minPrice, maxPrice, sortBy, sortOrder,
//! inStock`).

use std::cmp::Ordering;
use std::collections::BTreeSet;

use storefront_core::Money;

use crate::product::Product;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    Name,
    Price,
    Rating,
    Reviews,
}

impl SortBy {
    /// Unknown values fall back to `Name`.
    pub fn from_param(value: &str) -> Self {
        match value {
            "name" => SortBy::Name,
            "price" => SortBy::Price,
            "rating" => SortBy::Rating,
            "reviews" => SortBy::Reviews,
            other => {
                tracing::debug!(sort_by = other, "unknown sort key, using name");
                SortBy::Name
            }
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::Price => "price",
            SortBy::Rating => "rating",
            SortBy::Reviews => "reviews",
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything other than `desc` sorts ascending.
    pub fn from_param(value: &str) -> Self {
        if value == "desc" { SortOrder::Desc } else { SortOrder::Asc }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Filter criteria supplied by the catalogue page.
///
/// Price bounds are inclusive. A bound of zero is treated exactly like an
/// absent bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub category: String,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub in_stock: bool,
}

impl FilterCriteria {
    /// Read criteria from query parameters; later duplicates win.
    ///
    /// Absent parameters keep their defaults (`sortBy=name`, `sortOrder=asc`,
    /// `inStock=false`). Prices are decimal major units; unparsable or negative
    /// prices are ignored, leaving that bound open. `inStock` is only set by the
    /// literal `true`.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut criteria = FilterCriteria::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "search" => criteria.search = value.to_string(),
                "category" => criteria.category = value.to_string(),
                "minPrice" => criteria.min_price = parse_price("minPrice", value),
                "maxPrice" => criteria.max_price = parse_price("maxPrice", value),
                "sortBy" => criteria.sort_by = SortBy::from_param(value),
                "sortOrder" => criteria.sort_order = SortOrder::from_param(value),
                "inStock" => criteria.in_stock = value == "true",
                _ => {}
            }
        }
        criteria
    }

    /// Query parameters for these criteria, omitting every default value.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        if !self.category.is_empty() {
            pairs.push(("category", self.category.clone()));
        }
        if let Some(min) = active_bound(self.min_price) {
            pairs.push(("minPrice", format_price(min)));
        }
        if let Some(max) = active_bound(self.max_price) {
            pairs.push(("maxPrice", format_price(max)));
        }
        if self.sort_by != SortBy::Name {
            pairs.push(("sortBy", self.sort_by.as_param().to_string()));
        }
        if self.sort_order != SortOrder::Asc {
            pairs.push(("sortOrder", self.sort_order.as_param().to_string()));
        }
        if self.in_stock {
            pairs.push(("inStock", "true".to_string()));
        }
        pairs
    }
}

fn parse_price(param: &str, value: &str) -> Option<Money> {
    let parsed = value.trim().parse::<f64>().ok().and_then(|v| Money::from_major(v).ok());
    if parsed.is_none() && !value.is_empty() {
        tracing::debug!(param, value, "ignoring unparsable price bound");
    }
    parsed
}

fn format_price(price: Money) -> String {
    if price.minor() % 100 == 0 {
        (price.minor() / 100).to_string()
    } else {
        price.to_string()
    }
}

// Zero bounds are indistinguishable from unset ones.
fn active_bound(bound: Option<Money>) -> Option<Money> {
    bound.filter(|b| !b.is_zero())
}

/// Filter then stable-sort `products` by `criteria`.
///
/// Predicates, all of which must pass:
/// 1. search: case-insensitive substring of name, description or category
/// 2. category: exact match
/// 3. min/max price: inclusive bounds
/// 4. in stock: only when requested
///
/// Descending order negates the comparator, so equal keys keep their source
/// order in both directions.
pub fn apply_filters(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let query = criteria.search.trim().to_lowercase();
    let min = active_bound(criteria.min_price);
    let max = active_bound(criteria.max_price);

    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|p| query.is_empty() || matches_search(p, &query))
        .filter(|p| criteria.category.is_empty() || p.category() == criteria.category)
        .filter(|p| min.is_none_or(|min| p.price() >= min))
        .filter(|p| max.is_none_or(|max| p.price() <= max))
        .filter(|p| !criteria.in_stock || p.in_stock())
        .cloned()
        .collect();

    let sort_by = criteria.sort_by;
    match criteria.sort_order {
        SortOrder::Asc => filtered.sort_by(|a, b| compare(a, b, sort_by)),
        SortOrder::Desc => filtered.sort_by(|a, b| compare(a, b, sort_by).reverse()),
    }
    filtered
}

fn matches_search(product: &Product, query: &str) -> bool {
    product.name().to_lowercase().contains(query)
        || product.description().to_lowercase().contains(query)
        || product.category().to_lowercase().contains(query)
}

fn compare(a: &Product, b: &Product, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
        SortBy::Price => a.price().cmp(&b.price()),
        SortBy::Rating => a.rating().partial_cmp(&b.rating()).unwrap_or(Ordering::Equal),
        SortBy::Reviews => a.reviews().cmp(&b.reviews()),
    }
}

/// Distinct categories, sorted.
pub fn categories(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.category().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Cheapest and most expensive price in a product list.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

/// Zero range for an empty list.
pub fn price_range(products: &[Product]) -> PriceRange {
    let mut prices = products.iter().map(Product::price);
    let Some(first) = prices.next() else {
        return PriceRange::default();
    };
    prices.fold(PriceRange { min: first, max: first }, |range, price| PriceRange {
        min: range.min.min(price),
        max: range.max.max(price),
    })
}
