use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, Entity, Money, ProductId};

/// Catalogue product.
///
/// Immutable once loaded: the catalogue hands out clones and nothing mutates
/// them. Decoding validates the record (see [`NewProduct::build`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "NewProduct")]
pub struct Product {
    id: ProductId,
    name: String,
    slug: String,
    description: String,
    price: Money,
    image: String,
    category: String,
    in_stock: bool,
    rating: f64,
    reviews: u32,
    features: Vec<String>,
}

impl Product {
    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    /// Average rating, 0 to 5.
    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn reviews(&self) -> u32 {
        self.reviews
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Unvalidated product record, as produced by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    pub in_stock: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub features: Vec<String>,
}

impl NewProduct {
    /// In-stock, unrated product whose slug is derived from `name`.
    pub fn new(id: u64, name: impl Into<String>, price: Money) -> Self {
        let name = name.into();
        Self {
            id: ProductId::new(id),
            slug: slugify(&name),
            name,
            description: String::new(),
            price,
            image: String::new(),
            category: String::new(),
            in_stock: true,
            rating: 0.0,
            reviews: 0,
            features: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn reviews(mut self, reviews: u32) -> Self {
        self.reviews = reviews;
        self
    }

    pub fn features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Validate into a [`Product`].
    ///
    /// - name must not be blank
    /// - slug must be non-empty and URL-safe (ASCII alphanumerics, `-`, `_`)
    /// - rating must be a finite number within 0..=5
    pub fn build(self) -> Result<Product, DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(format!("product {}: name cannot be empty", self.id)));
        }

        let slug_ok = !self.slug.is_empty()
            && self
                .slug
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !slug_ok {
            return Err(DomainError::validation(format!(
                "product {}: slug {:?} is not URL-safe",
                self.id, self.slug
            )));
        }

        if !self.rating.is_finite() || !(0.0..=5.0).contains(&self.rating) {
            return Err(DomainError::validation(format!(
                "product {}: rating {} is outside 0..=5",
                self.id, self.rating
            )));
        }

        Ok(Product {
            id: self.id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            price: self.price,
            image: self.image,
            category: self.category,
            in_stock: self.in_stock,
            rating: self.rating,
            reviews: self.reviews,
            features: self.features,
        })
    }
}

impl TryFrom<NewProduct> for Product {
    type Error = DomainError;

    fn try_from(value: NewProduct) -> Result<Self, Self::Error> {
        value.build()
    }
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
