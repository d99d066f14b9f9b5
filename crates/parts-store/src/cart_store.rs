//! The customer's cart, persisted after every change.

use crate::{KvStore, Persisted, StoreError};
use parts_commerce::cart::{Cart, CartEvent, CartProduct, CartTotals};
use parts_commerce::checkout::DeliveryMethod;
use parts_commerce::ProductId;
use std::sync::Arc;

const CART_KEY: &str = "cart";

/// Cart service handed to whatever needs to read or change the cart.
pub struct CartStore {
    state: Persisted<Cart>,
}

impl CartStore {
    /// Hydrate the cart from `store`.
    pub fn open(store: Arc<dyn KvStore>) -> Result<Self, StoreError> {
        Ok(Self {
            state: Persisted::hydrate(store, CART_KEY)?,
        })
    }

    pub fn cart(&self) -> &Cart {
        self.state.get()
    }

    /// Add one unit of a product.
    pub fn add(&mut self, product: &CartProduct) -> Result<CartEvent, StoreError> {
        let event = self.state.update(|cart| cart.add_item(product))?;
        tracing::debug!(product_id = %product.id, "{}", event.message());
        Ok(event)
    }

    /// Remove a product's line. Returns `false` if it was not in the cart.
    pub fn remove(&mut self, product_id: ProductId) -> Result<bool, StoreError> {
        if self.cart().get_line(product_id).is_none() {
            return Ok(false);
        }
        self.state.update(|cart| cart.remove_item(product_id))
    }

    /// Shift a line's quantity by `delta`, never below 1.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        delta: i64,
    ) -> Result<Option<i64>, StoreError> {
        if self.cart().get_line(product_id).is_none() {
            return Ok(None);
        }
        self.state
            .update(|cart| cart.update_quantity(product_id, delta))
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        if self.cart().is_empty() {
            return Ok(());
        }
        self.state.update(Cart::clear)
    }

    pub fn totals(&self, delivery: DeliveryMethod) -> Result<CartTotals, StoreError> {
        Ok(self.cart().totals(delivery)?)
    }
}
