//! Cart and cart line types.

use crate::cart::{compute_totals, total_quantity, CartTotals};
use crate::checkout::DeliveryMethod;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// The product fields a cart line is built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartProduct {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub unit_price: Money,
    pub image_url: Option<String>,
}

/// A line in the cart. There is at most one line per product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product this line is for.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Product category.
    pub category: String,
    /// Unit price captured when the line was created.
    pub unit_price: Money,
    /// Quantity, always at least 1.
    pub quantity: i64,
    /// Product image URL.
    pub image_url: Option<String>,
}

impl CartLine {
    fn from_product(product: &CartProduct) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            unit_price: product.unit_price,
            quantity: 1,
            image_url: product.image_url.clone(),
        }
    }

    /// Unit price times quantity, `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.try_multiply(self.quantity)
    }
}

/// Notification emitted by [`Cart::add_item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartEvent {
    /// A new line was appended with quantity 1.
    Added { product_id: ProductId, name: String },
    /// An existing line's quantity went up by one.
    Increased {
        product_id: ProductId,
        name: String,
        quantity: i64,
    },
}

impl CartEvent {
    /// Human-readable notification text.
    pub fn message(&self) -> String {
        match self {
            CartEvent::Added { name, .. } => format!("{} added to cart", name),
            CartEvent::Increased { name, quantity, .. } => {
                format!("{} quantity increased to {}", name, quantity)
            }
        }
    }
}

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    /// Cart currency.
    pub currency: Currency,
    /// Unix timestamp of last mutation.
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart in the default currency.
    pub fn new() -> Self {
        Self::with_currency(Currency::default())
    }

    /// Create an empty cart in a specific currency.
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
            updated_at: current_timestamp(),
        }
    }

    /// Add one unit of a product.
    ///
    /// Merges by product id: a second add for the same product bumps the
    /// existing line instead of appending another one.
    pub fn add_item(&mut self, product: &CartProduct) -> CartEvent {
        self.updated_at = current_timestamp();

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return CartEvent::Increased {
                product_id: line.product_id,
                name: line.name.clone(),
                quantity: line.quantity,
            };
        }

        self.lines.push(CartLine::from_product(product));
        CartEvent::Added {
            product_id: product.id,
            name: product.name.clone(),
        }
    }

    /// Remove the line for a product. Absent ids are a no-op.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        let removed = self.lines.len() < len_before;
        if removed {
            self.updated_at = current_timestamp();
        }
        removed
    }

    /// Shift a line's quantity by `delta`, flooring at 1.
    ///
    /// Returns the new quantity, or `None` when no line matches. Removal is
    /// only possible through [`Cart::remove_item`].
    pub fn update_quantity(&mut self, product_id: ProductId, delta: i64) -> Option<i64> {
        let line = self.lines.iter_mut().find(|l| l.product_id == product_id)?;
        line.quantity = line.quantity.saturating_add(delta).max(1);
        self.updated_at = current_timestamp();
        Some(line.quantity)
    }

    /// Clear all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.updated_at = current_timestamp();
    }

    /// Cart lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a product.
    pub fn get_line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Get total item count (sum of quantities), saturating at `i64::MAX`.
    pub fn item_count(&self) -> i64 {
        total_quantity(&self.lines).unwrap_or(i64::MAX)
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Calculate subtotal, shipping and total for a delivery method.
    pub fn totals(&self, delivery: DeliveryMethod) -> Result<CartTotals, CommerceError> {
        compute_totals(&self.lines, delivery, self.currency)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, pesos: f64) -> CartProduct {
        CartProduct {
            id: ProductId::new(id),
            name: name.to_string(),
            category: "Engine".to_string(),
            unit_price: Money::from_decimal(pesos, Currency::PHP),
            image_url: None,
        }
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.currency, Currency::PHP);
    }

    #[test]
    fn test_add_item_emits_added_then_increased() {
        let mut cart = Cart::new();
        let oil_filter = product(1, "Oil Filter", 350.0);

        let first = cart.add_item(&oil_filter);
        assert_eq!(
            first,
            CartEvent::Added {
                product_id: ProductId::new(1),
                name: "Oil Filter".to_string()
            }
        );

        let second = cart.add_item(&oil_filter);
        assert_eq!(
            second,
            CartEvent::Increased {
                product_id: ProductId::new(1),
                name: "Oil Filter".to_string(),
                quantity: 2
            }
        );
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_event_messages() {
        let added = CartEvent::Added {
            product_id: ProductId::new(1),
            name: "Spark Plug".to_string(),
        };
        assert_eq!(added.message(), "Spark Plug added to cart");

        let increased = CartEvent::Increased {
            product_id: ProductId::new(1),
            name: "Spark Plug".to_string(),
            quantity: 3,
        };
        assert_eq!(increased.message(), "Spark Plug quantity increased to 3");
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Radiator Cap", 200.0));

        assert!(cart.remove_item(ProductId::new(1)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Radiator Cap", 200.0));
        let before = cart.lines().to_vec();

        assert!(!cart.remove_item(ProductId::new(99)));
        assert_eq!(cart.lines(), before.as_slice());
    }

    #[test]
    fn test_update_quantity_floors_at_one() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Wiper Blade", 450.0));

        assert_eq!(cart.update_quantity(ProductId::new(1), 4), Some(5));
        assert_eq!(cart.update_quantity(ProductId::new(1), -1), Some(4));
        assert_eq!(cart.update_quantity(ProductId::new(1), -100), Some(1));
        assert_eq!(cart.update_quantity(ProductId::new(1), i64::MIN), Some(1));
    }

    #[test]
    fn test_update_quantity_leaves_other_lines() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Wiper Blade", 450.0));
        cart.add_item(&product(2, "Headlight Bulb", 300.0));

        cart.update_quantity(ProductId::new(1), 2);

        assert_eq!(cart.get_line(ProductId::new(1)).map(|l| l.quantity), Some(3));
        assert_eq!(cart.get_line(ProductId::new(2)).map(|l| l.quantity), Some(1));
        assert_eq!(cart.update_quantity(ProductId::new(3), 1), None);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Fan Belt", 600.0));
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_serialization_keeps_lines() {
        let mut cart = Cart::new();
        cart.add_item(&product(5, "Air Filter", 420.0));

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_huge_quantities_do_not_panic() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Wiper Blade", 0.0));
        cart.add_item(&product(2, "Cabin Filter", 0.0));
        cart.update_quantity(ProductId::new(1), i64::MAX);
        cart.update_quantity(ProductId::new(2), i64::MAX);

        assert_eq!(cart.get_line(ProductId::new(1)).unwrap().quantity, i64::MAX);
        assert_eq!(cart.item_count(), i64::MAX);
        assert_eq!(
            cart.totals(DeliveryMethod::Standard).unwrap_err(),
            CommerceError::Overflow
        );
    }
}
