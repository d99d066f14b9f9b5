//! Typed row records, validated into domain types at the boundary.
//!
//! Read records (`*Record`) mirror the columns the storefront selects and
//! convert with `into_domain`, rejecting rows the domain cannot represent.
//! Write records (`New*Record`) are built from domain values and serialized
//! as insert payloads.

use parts_commerce::checkout::OrderDraft;
use parts_commerce::content::{ContactMessage, HeroSlide, SocialLink, Store};
use chrono::Datelike;
use parts_commerce::fitment::{EARLIEST_MODEL_YEAR, MODEL_YEAR_LEAD};
use parts_commerce::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DataError;

pub const PRODUCTS: &str = "products";
pub const VEHICLES: &str = "vehicles";
pub const STORES: &str = "stores";
pub const HERO_SLIDES: &str = "hero_slides";
pub const SOCIAL_LINKS: &str = "social_links";
pub const ORDERS: &str = "orders";
pub const ORDER_ITEMS: &str = "order_items";
pub const CONTACT_MESSAGES: &str = "contact_messages";
pub const INVENTORY_TRANSACTIONS: &str = "inventory_transactions";

/// A row of `products`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub part_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "decimal")]
    pub price: f64,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub compatible_vehicles: Option<Vec<i64>>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ProductRecord {
    pub fn into_domain(self, currency: Currency) -> Result<Product, DataError> {
        if self.name.trim().is_empty() {
            return Err(DataError::invalid_row(PRODUCTS, format!("product {} has no name", self.id)));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DataError::invalid_row(
                PRODUCTS,
                format!("product {} has price {}", self.id, self.price),
            ));
        }
        let quantity = self.quantity.unwrap_or(0);
        if quantity < 0 {
            return Err(DataError::invalid_row(
                PRODUCTS,
                format!("product {} has quantity {}", self.id, quantity),
            ));
        }

        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name.trim().to_string(),
            category: self.category.unwrap_or_default().trim().to_string(),
            brand: non_blank(self.brand),
            part_number: non_blank(self.part_number),
            description: non_blank(self.description),
            price: Money::from_decimal(self.price, currency),
            quantity,
            in_stock: self.in_stock.unwrap_or(quantity > 0),
            image_url: non_blank(self.image_url),
            compatible_vehicles: self
                .compatible_vehicles
                .unwrap_or_default()
                .into_iter()
                .map(VehicleId::new)
                .collect(),
            created_at: timestamp(self.created_at.as_deref()),
        })
    }
}

/// A row of `vehicles`.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleRecord {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year_start: i32,
    #[serde(default)]
    pub year_end: Option<i32>,
}

impl VehicleRecord {
    pub fn into_domain(self) -> Result<Vehicle, DataError> {
        if self.make.trim().is_empty() || self.model.trim().is_empty() {
            return Err(DataError::invalid_row(
                VEHICLES,
                format!("vehicle {} is missing make or model", self.id),
            ));
        }
        if let Some(end) = self.year_end {
            if end < self.year_start {
                return Err(DataError::invalid_row(
                    VEHICLES,
                    format!("vehicle {} ends ({}) before it starts ({})", self.id, end, self.year_start),
                ));
            }
        }

        let vehicle = Vehicle::new(
            VehicleId::new(self.id),
            self.make.trim(),
            self.model.trim(),
            self.year_start,
            self.year_end,
        );
        let current_year = chrono::Utc::now().year();
        if !vehicle.has_plausible_years(current_year) {
            return Err(DataError::invalid_row(
                VEHICLES,
                format!(
                    "vehicle {} has model years outside {}..={}",
                    self.id,
                    EARLIEST_MODEL_YEAR,
                    current_year.saturating_add(MODEL_YEAR_LEAD)
                ),
            ));
        }
        Ok(vehicle)
    }
}

/// A row of `stores`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

impl StoreRecord {
    pub fn into_domain(self) -> Result<Store, DataError> {
        if self.name.trim().is_empty() {
            return Err(DataError::invalid_row(STORES, format!("store {} has no name", self.id)));
        }
        Ok(Store {
            id: StoreId::new(self.id),
            name: self.name.trim().to_string(),
            address: self.address.unwrap_or_default(),
            city: non_blank(self.city),
            phone: non_blank(self.phone),
            hours: non_blank(self.hours),
            map_url: non_blank(self.map_url),
            is_active: self.is_active,
        })
    }
}

/// A row of `hero_slides`.
#[derive(Debug, Clone, Deserialize)]
pub struct HeroSlideRecord {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub image_url: String,
    #[serde(default, alias = "button_text")]
    pub cta_label: Option<String>,
    #[serde(default, alias = "button_link")]
    pub cta_link: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl HeroSlideRecord {
    pub fn into_domain(self) -> Result<HeroSlide, DataError> {
        if self.image_url.trim().is_empty() {
            return Err(DataError::invalid_row(
                HERO_SLIDES,
                format!("slide {} has no image", self.id),
            ));
        }
        Ok(HeroSlide {
            id: HeroSlideId::new(self.id),
            title: self.title.unwrap_or_default(),
            subtitle: non_blank(self.subtitle),
            image_url: self.image_url,
            cta_label: non_blank(self.cta_label),
            cta_link: non_blank(self.cta_link),
            is_active: self.is_active,
            created_at: timestamp(self.created_at.as_deref()),
        })
    }
}

/// A row of `social_links`.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialLinkRecord {
    pub id: i64,
    pub platform: String,
    pub url: String,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

impl SocialLinkRecord {
    pub fn into_domain(self) -> Result<SocialLink, DataError> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(DataError::invalid_row(
                SOCIAL_LINKS,
                format!("link {} has url '{}'", self.id, self.url),
            ));
        }
        Ok(SocialLink {
            id: self.id,
            platform: self.platform.trim().to_lowercase(),
            url: self.url,
            is_active: self.is_active,
        })
    }
}

/// Insert payload for `orders`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewOrderRecord {
    pub order_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub delivery_method: &'static str,
    pub store_id: Option<i64>,
    pub street: Option<String>,
    pub barangay: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub landmark: Option<String>,
    pub payment_method: &'static str,
    pub notes: Option<String>,
    pub subtotal: f64,
    pub shipping_fee: f64,
    pub total: f64,
    pub status: &'static str,
}

impl From<&OrderDraft> for NewOrderRecord {
    fn from(draft: &OrderDraft) -> Self {
        let address = draft.address.as_ref();
        Self {
            order_number: draft.order_number.clone(),
            first_name: draft.contact.first_name.trim().to_string(),
            last_name: draft.contact.last_name.trim().to_string(),
            email: draft.contact.email.trim().to_string(),
            phone: draft.contact.phone.trim().to_string(),
            delivery_method: draft.delivery.as_str(),
            store_id: draft.delivery.store_id().map(StoreId::get),
            street: address.map(|a| a.street.trim().to_string()),
            barangay: address.and_then(|a| non_blank(Some(a.barangay.clone()))),
            city: address.map(|a| a.city.trim().to_string()),
            province: address.map(|a| a.province.trim().to_string()),
            postal_code: address.map(|a| a.postal_code.trim().to_string()),
            landmark: address.and_then(|a| non_blank(a.landmark.clone())),
            payment_method: draft.payment.as_str(),
            notes: draft.notes.clone(),
            subtotal: draft.subtotal.to_decimal(),
            shipping_fee: draft.shipping.to_decimal(),
            total: draft.total.to_decimal(),
            status: draft.status.as_str(),
        }
    }
}

/// Insert payload for `order_items`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewOrderItemRecord {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price_at_purchase: f64,
}

impl NewOrderItemRecord {
    pub fn for_order(order_id: OrderId, draft: &OrderDraft) -> Vec<Self> {
        draft
            .lines
            .iter()
            .map(|line| Self {
                order_id: order_id.get(),
                product_id: line.product_id.get(),
                quantity: line.quantity,
                price_at_purchase: line.price_at_purchase.to_decimal(),
            })
            .collect()
    }
}

/// Insert payload for `contact_messages`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewContactMessageRecord {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

impl From<&ContactMessage> for NewContactMessageRecord {
    fn from(message: &ContactMessage) -> Self {
        Self {
            name: message.name.trim().to_string(),
            email: message.email.trim().to_string(),
            phone: non_blank(message.phone.clone()),
            subject: non_blank(message.subject.clone()),
            message: message.message.trim().to_string(),
        }
    }
}

/// Insert payload for `inventory_transactions`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewInventoryTransactionRecord {
    pub product_id: i64,
    pub quantity_change: i64,
    pub previous_quantity: i64,
    pub new_quantity: i64,
    pub reason: &'static str,
    pub notes: Option<String>,
}

impl NewInventoryTransactionRecord {
    pub fn new(product_id: ProductId, plan: &AdjustmentPlan, notes: Option<String>) -> Self {
        Self {
            product_id: product_id.get(),
            quantity_change: plan.quantity_change,
            previous_quantity: plan.previous_quantity,
            new_quantity: plan.new_quantity,
            reason: plan.reason.as_str(),
            notes: non_blank(notes),
        }
    }
}

/// The `id` column of a row returned by an insert.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct InsertedId {
    pub id: i64,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn active_by_default() -> bool {
    true
}

/// Unix seconds from a timestamptz column, 0 when absent or unparseable.
fn timestamp(value: Option<&str>) -> i64 {
    value
        .and_then(|v| chrono::DateTime::parse_from_rfc3339(v).ok())
        .map(|dt| dt.timestamp())
        .unwrap_or(0)
}

/// Numeric columns may arrive as JSON numbers or strings.
fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numeric {
        Number(f64),
        Text(String),
    }

    match Numeric::deserialize(deserializer)? {
        Numeric::Number(n) => Ok(n),
        Numeric::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
