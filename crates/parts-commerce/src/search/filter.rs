//! Search filter types.

use crate::catalog::{Product, ALL_CATEGORIES};
use crate::ids::VehicleId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Filter by category name. "All" matches everything.
    Category(String),
    /// Case-insensitive search in name, brand, part number and description.
    Text(String),
    /// Only show in-stock items.
    InStock,
    /// Filter by price range (inclusive).
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    /// Only parts that fit the vehicle.
    FitsVehicle(VehicleId),
}

impl Filter {
    /// Create a category filter.
    pub fn category(name: impl Into<String>) -> Self {
        Filter::Category(name.into())
    }

    /// Create a price range filter.
    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Create an in-stock filter.
    pub fn in_stock() -> Self {
        Filter::InStock
    }

    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Create a vehicle fitment filter.
    pub fn fits(vehicle_id: VehicleId) -> Self {
        Filter::FitsVehicle(vehicle_id)
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(name) => {
                name == ALL_CATEGORIES || product.category.eq_ignore_ascii_case(name.trim())
            }
            Filter::Text(query) => {
                let needle = query.trim().to_lowercase();
                if needle.is_empty() {
                    return true;
                }
                let haystacks = [
                    Some(product.name.as_str()),
                    product.brand.as_deref(),
                    product.part_number.as_deref(),
                    product.description.as_deref(),
                ];
                haystacks
                    .into_iter()
                    .flatten()
                    .any(|h| h.to_lowercase().contains(&needle))
            }
            Filter::InStock => product.is_available(),
            Filter::PriceRange { min, max } => {
                let cents = product.price.amount_cents;
                min.map_or(true, |m| cents >= m.amount_cents)
                    && max.map_or(true, |m| cents <= m.amount_cents)
            }
            Filter::FitsVehicle(vehicle_id) => product.fits(*vehicle_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::Currency;

    fn spark_plug() -> Product {
        let mut product = Product::new(
            ProductId::new(1),
            "Iridium Spark Plug",
            "Ignition",
            Money::new(45_000, Currency::PHP),
        )
        .with_stock(12);
        product.brand = Some("NGK".to_string());
        product.part_number = Some("ILZKR7B11".to_string());
        product.compatible_vehicles = vec![VehicleId::new(3)];
        product
    }

    #[test]
    fn test_category_filter() {
        assert!(Filter::category("ignition").matches(&spark_plug()));
        assert!(Filter::category("All").matches(&spark_plug()));
        assert!(!Filter::category("Brakes").matches(&spark_plug()));
    }

    #[test]
    fn test_text_filter_searches_brand_and_part_number() {
        assert!(Filter::text("ngk").matches(&spark_plug()));
        assert!(Filter::text("ilzkr7").matches(&spark_plug()));
        assert!(Filter::text("  ").matches(&spark_plug()));
        assert!(!Filter::text("bosch").matches(&spark_plug()));
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let at_price = Money::new(45_000, Currency::PHP);
        assert!(Filter::price_range(Some(at_price), Some(at_price)).matches(&spark_plug()));
        assert!(!Filter::price_range(None, Some(Money::new(44_999, Currency::PHP)))
            .matches(&spark_plug()));
    }

    #[test]
    fn test_stock_and_fitment() {
        assert!(Filter::in_stock().matches(&spark_plug()));
        assert!(!Filter::in_stock().matches(&spark_plug().with_stock(0)));
        assert!(Filter::fits(VehicleId::new(3)).matches(&spark_plug()));
        assert!(!Filter::fits(VehicleId::new(4)).matches(&spark_plug()));
    }
}
