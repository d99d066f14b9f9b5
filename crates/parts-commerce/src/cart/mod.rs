//! Shopping cart module.
//!
//! Contains the cart, its lines, and the totals calculation.

mod cart;
mod pricing;

pub use cart::{Cart, CartEvent, CartLine, CartProduct};
pub use pricing::{compute_totals, total_quantity, CartTotals, LineTotal, STANDARD_SHIPPING_FEE};
