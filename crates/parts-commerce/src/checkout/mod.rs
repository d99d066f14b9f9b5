//! Checkout module.
//!
//! Contains the checkout step flow, customer/shipping details, delivery and
//! payment choices, and the order draft written to the backend.

mod address;
mod flow;
mod order;
mod shipping;

pub use address::{ContactInfo, ShippingAddress};
pub use flow::{CheckoutFlow, CheckoutStep, ValidatedCheckout};
pub use order::{OrderDraft, OrderLine, OrderStatus, PlacedOrder};
pub use shipping::{DeliveryMethod, PaymentMethod};
