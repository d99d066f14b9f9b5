//! Order types.

use crate::cart::Cart;
use crate::checkout::{ContactInfo, DeliveryMethod, PaymentMethod, ShippingAddress, ValidatedCheckout};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order confirmed and processing.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered or picked up.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }


    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Check if order can be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

impl FromStr for OrderStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            _ => Err(CommerceError::unknown("order status", s)),
        }
    }
}

/// A line of an order, priced at the moment of purchase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i64,
    /// Unit price copied from the cart line.
    pub price_at_purchase: Money,
}

/// An order ready to be written to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDraft {
    /// Human-readable order number.
    pub order_number: String,
    pub contact: ContactInfo,
    pub delivery: DeliveryMethod,
    pub address: Option<ShippingAddress>,
    pub payment: PaymentMethod,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl OrderDraft {
    /// Build an order from a validated checkout and the current cart.
    ///
    /// Totals are recomputed from the cart rather than trusted from the
    /// checkout screen.
    pub fn from_checkout(checkout: &ValidatedCheckout, cart: &Cart) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let totals = cart.totals(checkout.delivery)?;
        let lines = cart
            .lines()
            .iter()
            .map(|line| OrderLine {
                product_id: line.product_id,
                name: line.name.clone(),
                quantity: line.quantity,
                price_at_purchase: line.unit_price,
            })
            .collect();

        Ok(Self {
            order_number: generate_order_number(),
            contact: checkout.contact.clone(),
            delivery: checkout.delivery,
            address: checkout.address.clone(),
            payment: checkout.payment,
            notes: checkout.notes.clone(),
            status: OrderStatus::Pending,
            lines,
            subtotal: totals.subtotal,
            shipping: totals.shipping,
            total: totals.total,
            created_at: chrono::Utc::now().timestamp(),
        })
    }

    /// Get total item count, saturating at `i64::MAX`.
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .try_fold(0_i64, |count, line| count.checked_add(line.quantity))
            .unwrap_or(i64::MAX)
    }
}

/// Result of a successfully written order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacedOrder {
    pub id: OrderId,
    pub order_number: String,
    pub total: Money,
    pub item_count: i64,
}

/// Generate a new order number, e.g. `ORD-20250314-093512`.
pub fn generate_order_number() -> String {
    chrono::Utc::now().format("ORD-%Y%m%d-%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartProduct;
    use crate::ids::StoreId;
    use crate::money::Currency;

    fn checkout(delivery: DeliveryMethod) -> ValidatedCheckout {
        ValidatedCheckout {
            contact: ContactInfo {
                first_name: "Ana".to_string(),
                last_name: "Reyes".to_string(),
                email: "ana@example.ph".to_string(),
                phone: "09181234567".to_string(),
            },
            delivery,
            address: None,
            payment: PaymentMethod::CashOnDelivery,
            notes: None,
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        let shock = CartProduct {
            id: ProductId::new(7),
            name: "Rear Shock Absorber".to_string(),
            category: "Suspension".to_string(),
            unit_price: Money::new(250_000, Currency::PHP),
            image_url: None,
        };
        cart.add_item(&shock);
        cart.add_item(&shock);
        cart
    }

    #[test]
    fn test_order_status_can_cancel() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::Processing.can_cancel());
        assert!(!OrderStatus::Shipped.can_cancel());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert_eq!("canceled".parse(), Ok(OrderStatus::Cancelled));
        assert!("refunded".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_draft_from_checkout() {
        let draft = OrderDraft::from_checkout(&checkout(DeliveryMethod::Standard), &cart()).unwrap();

        assert_eq!(draft.lines.len(), 1);
        assert_eq!(draft.lines[0].quantity, 2);
        assert_eq!(draft.lines[0].price_at_purchase, Money::new(250_000, Currency::PHP));
        assert_eq!(draft.subtotal, Money::new(500_000, Currency::PHP));
        assert_eq!(draft.total, Money::new(515_000, Currency::PHP));
        assert_eq!(draft.item_count(), 2);
        assert_eq!(draft.status, OrderStatus::Pending);
    }

    #[test]
    fn test_pickup_draft_has_no_shipping() {
        let pickup = DeliveryMethod::Pickup {
            store_id: StoreId::new(1),
        };
        let draft = OrderDraft::from_checkout(&checkout(pickup), &cart()).unwrap();
        assert!(draft.shipping.is_zero());
        assert_eq!(draft.total, draft.subtotal);
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let err = OrderDraft::from_checkout(&checkout(DeliveryMethod::Standard), &Cart::new())
            .unwrap_err();
        assert_eq!(err, CommerceError::EmptyCart);
    }

    #[test]
    fn test_order_number_format() {
        let number = generate_order_number();
        assert!(number.starts_with("ORD-"));
        assert_eq!(number.len(), "ORD-20250314-093512".len());
    }
}
