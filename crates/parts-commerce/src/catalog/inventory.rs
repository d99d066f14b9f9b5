//! Inventory tracking types.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Quantity at or below which stock is reported as low.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Inventory level for a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryLevel {
    /// Total quantity in stock.
    pub quantity: i64,
    /// Low stock threshold for alerts.
    pub low_stock_threshold: i64,
}

impl InventoryLevel {
    pub fn new(quantity: i64) -> Self {
        Self {
            quantity,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: i64) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    /// Check if stock is low but not gone.
    pub fn is_low_stock(&self) -> bool {
        self.quantity > 0 && self.quantity <= self.low_stock_threshold
    }

    /// Check if out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity <= 0
    }

    /// Work out the effect of an adjustment without applying it.
    ///
    /// The resulting quantity never goes below zero, so a large negative
    /// delta records only the units that were actually on hand.
    pub fn plan_adjustment(&self, delta: i64, reason: AdjustmentReason) -> AdjustmentPlan {
        let new_quantity = self.quantity.saturating_add(delta).max(0);
        AdjustmentPlan {
            previous_quantity: self.quantity,
            new_quantity,
            quantity_change: new_quantity - self.quantity,
            in_stock: new_quantity > 0,
            reason,
        }
    }

    /// Apply an adjustment in place.
    pub fn adjust(&mut self, delta: i64) {
        self.quantity = self.quantity.saturating_add(delta).max(0);
    }
}

impl Default for InventoryLevel {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Reason for an inventory adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentReason {
    /// Restocked from supplier.
    Restock,
    /// Sold to customer.
    Sale,
    /// Returned by customer.
    Return,
    /// Manual correction after a count.
    Correction,
    /// Damaged or lost.
    Damaged,
}

impl AdjustmentReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentReason::Restock => "restock",
            AdjustmentReason::Sale => "sale",
            AdjustmentReason::Return => "return",
            AdjustmentReason::Correction => "correction",
            AdjustmentReason::Damaged => "damaged",
        }
    }
}

impl FromStr for AdjustmentReason {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "restock" => Ok(AdjustmentReason::Restock),
            "sale" => Ok(AdjustmentReason::Sale),
            "return" => Ok(AdjustmentReason::Return),
            "correction" => Ok(AdjustmentReason::Correction),
            "damaged" | "damage" => Ok(AdjustmentReason::Damaged),
            _ => Err(CommerceError::unknown("adjustment reason", s)),
        }
    }
}

/// The computed outcome of an adjustment, applied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdjustmentPlan {
    pub previous_quantity: i64,
    pub new_quantity: i64,
    /// Effective change after flooring (may differ from the requested delta).
    pub quantity_change: i64,
    /// Stock flag to write alongside the new quantity.
    pub in_stock: bool,
    pub reason: AdjustmentReason,
}

impl AdjustmentPlan {
    /// Check if the plan changes nothing.
    pub fn is_noop(&self) -> bool {
        self.quantity_change == 0
    }
}
