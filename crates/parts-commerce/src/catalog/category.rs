//! Category summaries derived from the product list.
//!
//! Categories are plain strings on each product row; there is no category
//! table. The storefront sidebar is built by counting products per name.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pseudo-category that selects every product.
pub const ALL_CATEGORIES: &str = "All";

/// A category and how many products it holds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySummary {
    /// Category name.
    pub name: String,
    /// Number of products in this category.
    pub product_count: usize,
}

impl CategorySummary {
    /// Check if this is the "All" pseudo-category.
    pub fn is_all(&self) -> bool {
        self.name == ALL_CATEGORIES
    }

    /// Check whether a product belongs here.
    pub fn contains(&self, product: &Product) -> bool {
        self.is_all() || product.category.eq_ignore_ascii_case(&self.name)
    }
}

/// Distinct categories sorted by name, led by "All".
///
/// Blank category names are skipped.
pub fn categories_from(products: &[Product]) -> Vec<CategorySummary> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for product in products {
        let name = product.category.trim();
        if name.is_empty() {
            continue;
        }
        *counts.entry(name).or_default() += 1;
    }

    let mut summaries = Vec::with_capacity(counts.len() + 1);
    summaries.push(CategorySummary {
        name: ALL_CATEGORIES.to_string(),
        product_count: products.len(),
    });
    summaries.extend(counts.into_iter().map(|(name, product_count)| CategorySummary {
        name: name.to_string(),
        product_count,
    }));
    summaries
}
