//! Product catalog module.
//!
//! Contains types for products, categories, and inventory.

mod category;
mod inventory;
mod product;

pub use category::{categories_from, CategorySummary, ALL_CATEGORIES};
pub use inventory::{AdjustmentPlan, AdjustmentReason, InventoryLevel, DEFAULT_LOW_STOCK_THRESHOLD};
pub use product::Product;
