//! Observable, persisted cart.

use storefront_core::{Entity, ProductId};
use storefront_products::Product;
use storefront_state::{StateCell, Subscription};
use storefront_storage::{KeyValueStore, StorageKey};

use crate::cart::{Cart, CartItem};

/// Cart store.
///
/// Every mutation rebuilds the [`Cart`] from its new item list, writes the items
/// to the key-value store and then publishes the snapshot, so subscribers only
/// ever see state whose persistence has already been attempted.
#[derive(Debug)]
pub struct CartStore {
    kv: KeyValueStore,
    cart: StateCell<Cart>,
}

impl CartStore {
    /// Hydrate from the persisted item list (or start empty).
    ///
    /// Storage is read once, here; later changes to the medium are not picked up.
    pub fn new(kv: KeyValueStore) -> Self {
        let items = kv
            .get::<Vec<CartItem>>(StorageKey::Cart)
            .map(normalize)
            .unwrap_or_default();
        tracing::debug!(lines = items.len(), "cart hydrated");

        Self {
            kv,
            cart: StateCell::new(Cart::from_items(items)),
        }
    }

    pub fn cart(&self) -> Cart {
        self.cart.get()
    }

    pub fn subscribe(&self) -> Subscription<Cart> {
        self.cart.subscribe()
    }

    /// Quantity of `product_id` in the cart, 0 if absent.
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.cart
            .with(|cart| cart.get(product_id).map_or(0, |item| item.quantity))
    }

    /// Add `quantity` units, merging into the existing line for the product.
    ///
    /// Callers pass a positive quantity; zero is ignored.
    pub fn add_to_cart(&self, product: &Product, quantity: u32) {
        if quantity == 0 {
            tracing::warn!(product_id = %product.id(), "ignoring add_to_cart with zero quantity");
            return;
        }

        self.mutate(|mut items| {
            match items.iter_mut().find(|item| item.product_id() == *product.id()) {
                Some(item) => item.quantity = item.quantity.saturating_add(quantity),
                None => items.push(CartItem {
                    product: product.clone(),
                    quantity,
                }),
            }
            items
        });
    }

    /// Set the quantity of an existing line, keeping its position.
    ///
    /// `quantity <= 0` removes the line.
    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.mutate(|mut items| {
            if let Some(item) = items.iter_mut().find(|item| item.product_id() == product_id) {
                item.quantity = quantity;
            }
            items
        });
    }

    pub fn remove_from_cart(&self, product_id: ProductId) {
        self.mutate(|mut items| {
            items.retain(|item| item.product_id() != product_id);
            items
        });
    }

    pub fn clear_cart(&self) {
        self.mutate(|_| Vec::new());
    }

    fn mutate(&self, f: impl FnOnce(Vec<CartItem>) -> Vec<CartItem>) {
        self.cart.update(|cart| {
            let items = f(std::mem::take(cart).into_items());
            self.kv.set(StorageKey::Cart, &items);
            *cart = Cart::from_items(items);
        });
    }
}

/// Restore the cart invariants on persisted data: drop zero-quantity lines and
/// merge duplicate products into their first line.
fn normalize(items: Vec<CartItem>) -> Vec<CartItem> {
    let mut out: Vec<CartItem> = Vec::with_capacity(items.len());
    for item in items {
        if item.quantity == 0 {
            tracing::warn!(product_id = %item.product_id(), "dropping persisted cart line with zero quantity");
            continue;
        }
        match out.iter_mut().find(|existing| existing.product_id() == item.product_id()) {
            Some(existing) => {
                tracing::warn!(product_id = %item.product_id(), "merging duplicate persisted cart line");
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => out.push(item),
        }
    }
    out
}
