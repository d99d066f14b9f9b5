//! Cart totals calculation.

use crate::cart::CartLine;
use crate::checkout::DeliveryMethod;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Flat fee for standard shipping, in whole pesos.
pub const STANDARD_SHIPPING_FEE: i64 = 150;

/// Totals for a cart under a given delivery method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of unit price times quantity.
    pub subtotal: Money,
    /// Shipping fee.
    pub shipping: Money,
    /// subtotal + shipping.
    pub total: Money,
    /// Sum of quantities.
    pub item_count: i64,
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LineTotal>,
}

/// Total for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineTotal {
    pub product_id: ProductId,
    pub unit_price: Money,
    pub quantity: i64,
    pub total: Money,
}

/// Compute subtotal, shipping and total.
///
/// Shipping is charged only for standard delivery of a non-empty cart;
/// store pickup is free. The result does not depend on line order.
pub fn compute_totals(
    lines: &[CartLine],
    delivery: DeliveryMethod,
    currency: Currency,
) -> Result<CartTotals, CommerceError> {
    let line_totals = lines
        .iter()
        .map(|line| {
            if line.unit_price.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: line.unit_price.currency.code().to_string(),
                });
            }
            let total = line.line_total().ok_or(CommerceError::Overflow)?;
            Ok(LineTotal {
                product_id: line.product_id,
                unit_price: line.unit_price,
                quantity: line.quantity,
                total,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let subtotal =
        Money::try_sum(line_totals.iter().map(|l| &l.total), currency).ok_or(CommerceError::Overflow)?;

    let shipping = if lines.is_empty() {
        Money::zero(currency)
    } else {
        delivery.fee(currency)
    };

    let total = subtotal.try_add(&shipping).ok_or(CommerceError::Overflow)?;

    Ok(CartTotals {
        subtotal,
        shipping,
        total,
        item_count: total_quantity(lines).ok_or(CommerceError::Overflow)?,
        lines: line_totals,
    })
}

/// Sum of line quantities, `None` on overflow.
pub fn total_quantity(lines: &[CartLine]) -> Option<i64> {
    lines
        .iter()
        .try_fold(0_i64, |count, line| count.checked_add(line.quantity))
}
