use serde::{Deserialize, Serialize};

use storefront_core::{Entity, Money, ProductId, ValueObject};
use storefront_products::Product;

/// Cart line: a product and how many of it.
///
/// `quantity >= 1`; the store turns a zero/negative update into a removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn product_id(&self) -> ProductId {
        *self.product.id()
    }

    /// `price * quantity`.
    pub fn line_total(&self) -> Money {
        self.product.price().times(self.quantity)
    }
}

/// Cart snapshot with totals derived from its lines.
///
/// Always rebuilt in full from the item list, never patched. There is no tax or
/// discount logic, so `total == subtotal`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    subtotal: Money,
    total: Money,
    item_count: u32,
}

impl ValueObject for Cart {}

impl Cart {
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let subtotal: Money = items.iter().map(CartItem::line_total).sum();
        let item_count = items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity));

        Self {
            items,
            subtotal,
            total: subtotal,
            item_count,
        }
    }

    /// Lines in the order they were first added.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_products::NewProduct;

    fn product(id: u64, price_minor: u64) -> Product {
        NewProduct::new(id, format!("Product {id}"), Money::from_minor(price_minor))
            .build()
            .unwrap()
    }

    #[test]
    fn empty_cart_has_zero_totals() {
        let cart = Cart::from_items(Vec::new());
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn totals_are_derived_from_lines() {
        let cart = Cart::from_items(vec![
            CartItem { product: product(1, 9999), quantity: 2 },
            CartItem { product: product(2, 500), quantity: 3 },
        ]);

        assert_eq!(cart.subtotal(), Money::from_minor(19998 + 1500));
        assert_eq!(cart.total(), cart.subtotal());
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.get(ProductId::new(2)).map(|i| i.quantity), Some(3));
        assert!(cart.get(ProductId::new(3)).is_none());
    }

    #[test]
    fn items_persist_with_full_product_records() {
        let item = CartItem { product: product(7, 1250), quantity: 1 };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["quantity"], 1);
        assert_eq!(json["product"]["price"], serde_json::json!(12.5));
        assert_eq!(json["product"]["slug"], "product-7");
    }
}
