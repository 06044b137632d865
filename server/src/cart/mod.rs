//! Cart Store
//!
//! Per-session shopping carts, held in process memory only. A cart maps
//! item id to a line snapshot (name/price taken from the menu at add time).
//! All lines of a cart belong to one restaurant; adding an item from a
//! second restaurant is rejected at mutation time, so checkout never sees a
//! mixed cart through this store.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use shared::models::Item;
use std::collections::BTreeMap;
use thiserror::Error;

/// Largest quantity a single line may hold.
const MAX_QUANTITY: i64 = 9999;

/// Cart error types
#[derive(Debug, Error)]
pub enum CartError {
    #[error("Cart already holds items from restaurant {existing}, cannot add from restaurant {offered}")]
    RestaurantMismatch { existing: i64, offered: i64 },

    #[error("Item {0} is not in the cart")]
    ItemNotInCart(i64),

    #[error("Quantity must be between 1 and 9999, got {0}")]
    InvalidQuantity(i64),
}

/// One cart line: a menu-price snapshot taken when the item was added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub restaurant_id: i64,
}

/// A session's cart. Lines are keyed by item id; adding the same item again
/// accumulates quantity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: BTreeMap<i64, CartLine>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    /// The single restaurant this cart buys from, if any lines exist.
    pub fn restaurant_id(&self) -> Option<i64> {
        self.lines.values().next().map(|l| l.restaurant_id)
    }

    /// Subtotal as raw f64 sum; the settlement engine redoes this in Decimal.
    pub fn subtotal(&self) -> f64 {
        self.lines
            .values()
            .map(|l| l.price * l.quantity as f64)
            .sum()
    }

    fn add(&mut self, item: &Item, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 || quantity > MAX_QUANTITY {
            return Err(CartError::InvalidQuantity(quantity));
        }
        if let Some(existing) = self.restaurant_id()
            && existing != item.restaurant_id
        {
            return Err(CartError::RestaurantMismatch {
                existing,
                offered: item.restaurant_id,
            });
        }
        let line = self.lines.entry(item.id).or_insert_with(|| CartLine {
            item_id: item.id,
            name: item.name.clone(),
            price: item.price,
            quantity: 0,
            restaurant_id: item.restaurant_id,
        });
        line.quantity = (line.quantity + quantity).min(MAX_QUANTITY);
        Ok(())
    }

    fn set_quantity(&mut self, item_id: i64, quantity: i64) -> Result<(), CartError> {
        if quantity < 0 || quantity > MAX_QUANTITY {
            return Err(CartError::InvalidQuantity(quantity));
        }
        if quantity == 0 {
            return self.remove(item_id);
        }
        let line = self
            .lines
            .get_mut(&item_id)
            .ok_or(CartError::ItemNotInCart(item_id))?;
        line.quantity = quantity;
        Ok(())
    }

    fn remove(&mut self, item_id: i64) -> Result<(), CartError> {
        self.lines
            .remove(&item_id)
            .map(|_| ())
            .ok_or(CartError::ItemNotInCart(item_id))
    }
}

/// Process-wide cart store, keyed by session (the authenticated user id —
/// one active cart per customer).
#[derive(Debug, Default)]
pub struct CartStore {
    carts: DashMap<i64, Cart>,
}

impl CartStore {
    pub fn new() -> Self {
        Self {
            carts: DashMap::new(),
        }
    }

    /// Snapshot of the session's cart (empty cart if none exists).
    pub fn get(&self, session: i64) -> Cart {
        self.carts
            .get(&session)
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Add `quantity` of `item`, snapshotting its current name and price.
    pub fn add_item(&self, session: i64, item: &Item, quantity: i64) -> Result<Cart, CartError> {
        let mut cart = self.carts.entry(session).or_default();
        cart.add(item, quantity)?;
        Ok(cart.clone())
    }

    /// Overwrite a line's quantity; 0 removes the line.
    pub fn set_quantity(
        &self,
        session: i64,
        item_id: i64,
        quantity: i64,
    ) -> Result<Cart, CartError> {
        let mut cart = self
            .carts
            .get_mut(&session)
            .ok_or(CartError::ItemNotInCart(item_id))?;
        cart.set_quantity(item_id, quantity)?;
        Ok(cart.clone())
    }

    pub fn remove_item(&self, session: i64, item_id: i64) -> Result<Cart, CartError> {
        let mut cart = self
            .carts
            .get_mut(&session)
            .ok_or(CartError::ItemNotInCart(item_id))?;
        cart.remove(item_id)?;
        Ok(cart.clone())
    }

    pub fn clear(&self, session: i64) {
        self.carts.remove(&session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item(id: i64, restaurant_id: i64, price: f64) -> Item {
        Item {
            id,
            restaurant_id,
            category_id: 1,
            name: format!("Item {id}"),
            description: None,
            price,
            created_at: 0,
        }
    }

    #[test]
    fn add_accumulates_quantity() {
        let store = CartStore::new();
        let item = test_item(10, 1, 4.5);
        store.add_item(7, &item, 1).unwrap();
        let cart = store.add_item(7, &item, 2).unwrap();
        assert_eq!(cart.lines().count(), 1);
        assert_eq!(cart.lines().next().unwrap().quantity, 3);
        assert_eq!(cart.subtotal(), 13.5);
    }

    #[test]
    fn rejects_second_restaurant() {
        let store = CartStore::new();
        store.add_item(7, &test_item(10, 1, 4.5), 1).unwrap();
        let err = store.add_item(7, &test_item(20, 2, 3.0), 1).unwrap_err();
        assert!(matches!(
            err,
            CartError::RestaurantMismatch {
                existing: 1,
                offered: 2
            }
        ));
        // The cart is unchanged.
        assert_eq!(store.get(7).lines().count(), 1);
    }

    #[test]
    fn same_restaurant_multiple_items() {
        let store = CartStore::new();
        store.add_item(7, &test_item(10, 1, 10.0), 2).unwrap();
        let cart = store.add_item(7, &test_item(11, 1, 5.0), 1).unwrap();
        assert_eq!(cart.lines().count(), 2);
        assert_eq!(cart.subtotal(), 25.0);
        assert_eq!(cart.restaurant_id(), Some(1));
    }

    #[test]
    fn price_is_snapshotted_at_add_time() {
        let store = CartStore::new();
        let mut item = test_item(10, 1, 4.5);
        store.add_item(7, &item, 1).unwrap();
        // Menu price changes after the item is in the cart.
        item.price = 9.0;
        let cart = store.get(7);
        assert_eq!(cart.lines().next().unwrap().price, 4.5);
    }

    #[test]
    fn set_quantity_zero_removes_line() {
        let store = CartStore::new();
        store.add_item(7, &test_item(10, 1, 4.5), 2).unwrap();
        let cart = store.set_quantity(7, 10, 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_unknown_item_fails() {
        let store = CartStore::new();
        store.add_item(7, &test_item(10, 1, 4.5), 1).unwrap();
        assert!(matches!(
            store.set_quantity(7, 99, 2),
            Err(CartError::ItemNotInCart(99))
        ));
    }

    #[test]
    fn invalid_quantities_rejected() {
        let store = CartStore::new();
        let item = test_item(10, 1, 4.5);
        assert!(matches!(
            store.add_item(7, &item, 0),
            Err(CartError::InvalidQuantity(0))
        ));
        assert!(matches!(
            store.add_item(7, &item, -3),
            Err(CartError::InvalidQuantity(-3))
        ));
        assert!(matches!(
            store.add_item(7, &item, 10_000),
            Err(CartError::InvalidQuantity(10_000))
        ));
    }

    #[test]
    fn sessions_are_isolated() {
        let store = CartStore::new();
        store.add_item(7, &test_item(10, 1, 4.5), 1).unwrap();
        store.add_item(8, &test_item(20, 2, 3.0), 1).unwrap();
        assert_eq!(store.get(7).restaurant_id(), Some(1));
        assert_eq!(store.get(8).restaurant_id(), Some(2));
        store.clear(7);
        assert!(store.get(7).is_empty());
        assert!(!store.get(8).is_empty());
    }
}
