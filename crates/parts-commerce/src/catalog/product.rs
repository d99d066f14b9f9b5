//! Product types.

use crate::cart::CartProduct;
use crate::catalog::InventoryLevel;
use crate::ids::{ProductId, VehicleId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A part in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Category name (e.g., "Brakes").
    pub category: String,
    /// Manufacturer brand.
    pub brand: Option<String>,
    /// Manufacturer part number.
    pub part_number: Option<String>,
    /// Full description.
    pub description: Option<String>,
    /// Unit price.
    pub price: Money,
    /// Units on hand.
    pub quantity: i64,
    /// Whether the product can be ordered.
    pub in_stock: bool,
    /// Primary image URL.
    pub image_url: Option<String>,
    /// Vehicles this part fits. Empty means it fits any vehicle.
    pub compatible_vehicles: Vec<VehicleId>,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Product {
    /// Create a product with the required fields; everything else is empty.
    pub fn new(id: ProductId, name: impl Into<String>, category: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            brand: None,
            part_number: None,
            description: None,
            price,
            quantity: 0,
            in_stock: false,
            image_url: None,
            compatible_vehicles: Vec::new(),
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Set the stock quantity and derive `in_stock` from it.
    pub fn with_stock(mut self, quantity: i64) -> Self {
        self.quantity = quantity.max(0);
        self.in_stock = self.quantity > 0;
        self
    }

    /// Check if the product is available for purchase.
    pub fn is_available(&self) -> bool {
        self.in_stock && self.quantity > 0
    }

    /// Check whether the part fits a vehicle.
    pub fn fits(&self, vehicle_id: VehicleId) -> bool {
        self.compatible_vehicles.is_empty() || self.compatible_vehicles.contains(&vehicle_id)
    }

    pub fn is_universal(&self) -> bool {
        self.compatible_vehicles.is_empty()
    }

    /// Current inventory level.
    pub fn inventory(&self) -> InventoryLevel {
        InventoryLevel::new(self.quantity)
    }

    /// The fields a cart line is built from.
    pub fn cart_product(&self) -> CartProduct {
        CartProduct {
            id: self.id,
            name: self.name.clone(),
            category: self.category.clone(),
            unit_price: self.price,
            image_url: self.image_url.clone(),
        }
    }
}
