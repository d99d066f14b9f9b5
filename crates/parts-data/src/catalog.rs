//! Read-side access to catalog and storefront content.

use std::sync::Arc;

use parts_commerce::content::{HeroSlide, SocialLink, Store};
use parts_commerce::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::RowApi;
use crate::error::DataError;
use crate::query::{Order, RowQuery};
use crate::records::{
    HeroSlideRecord, ProductRecord, SocialLinkRecord, StoreRecord, VehicleRecord, HERO_SLIDES,
    PRODUCTS, SOCIAL_LINKS, STORES, VEHICLES,
};

/// Content shown on the storefront landing page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorefrontHome {
    pub slides: Vec<HeroSlide>,
    pub stores: Vec<Store>,
}

/// Reads products, vehicles and storefront content.
///
/// Rows that fail validation are skipped with a warning so one bad row does
/// not hide the rest of a listing.
#[derive(Clone)]
pub struct CatalogRepository {
    api: Arc<dyn RowApi>,
    currency: Currency,
}

impl CatalogRepository {
    pub fn new(api: Arc<dyn RowApi>) -> Self {
        Self {
            api,
            currency: Currency::PHP,
        }
    }

    /// Currency that backend decimal prices are read in.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// All products, newest first.
    pub async fn products(&self) -> Result<Vec<Product>, DataError> {
        let query = RowQuery::new().order_by("created_at", Order::Descending);
        let rows = self.api.select(PRODUCTS, &query).await?;
        let currency = self.currency;
        let products = decode_rows(PRODUCTS, rows, |r: ProductRecord| r.into_domain(currency));
        tracing::debug!(count = products.len(), "Loaded products");
        Ok(products)
    }

    /// One product by id.
    pub async fn product(&self, id: ProductId) -> Result<Product, DataError> {
        let query = RowQuery::new().eq("id", id).limit(1);
        let row = self
            .api
            .select(PRODUCTS, &query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DataError::NotFound(format!("product {}", id)))?;

        let record: ProductRecord = serde_json::from_value(row)
            .map_err(|e| DataError::invalid_row(PRODUCTS, e.to_string()))?;
        record.into_domain(self.currency)
    }

    /// The fitment catalog.
    ///
    /// A failed fetch or an empty table both surface as
    /// [`CommerceError::DataUnavailable`] so the selector can show its
    /// load-failed state.
    pub async fn vehicle_catalog(&self) -> Result<VehicleCatalog, CommerceError> {
        // Row id breaks ties so the first covering row is stable.
        let query = RowQuery::new()
            .order_by("make", Order::Ascending)
            .order_by("model", Order::Ascending)
            .order_by("id", Order::Ascending);

        let rows = match self.api.select(VEHICLES, &query).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(table = VEHICLES, error = %e, "Failed to load vehicles");
                return Err(CommerceError::DataUnavailable(e.to_string()));
            }
        };

        let vehicles = decode_rows(VEHICLES, rows, VehicleRecord::into_domain);
        VehicleCatalog::from_rows(vehicles)
    }

    /// Branches that are open for pickup.
    pub async fn stores(&self) -> Result<Vec<Store>, DataError> {
        let query = RowQuery::new()
            .eq("is_active", true)
            .order_by("name", Order::Ascending);
        let rows = self.api.select(STORES, &query).await?;
        Ok(decode_rows(STORES, rows, StoreRecord::into_domain))
    }

    /// Active hero slides, oldest first.
    pub async fn hero_slides(&self) -> Result<Vec<HeroSlide>, DataError> {
        let query = RowQuery::new()
            .eq("is_active", true)
            .order_by("created_at", Order::Ascending);
        let rows = self.api.select(HERO_SLIDES, &query).await?;
        Ok(decode_rows(HERO_SLIDES, rows, HeroSlideRecord::into_domain))
    }

    pub async fn social_links(&self) -> Result<Vec<SocialLink>, DataError> {
        let query = RowQuery::new().eq("is_active", true);
        let rows = self.api.select(SOCIAL_LINKS, &query).await?;
        Ok(decode_rows(SOCIAL_LINKS, rows, SocialLinkRecord::into_domain))
    }

    /// Slides and stores, fetched concurrently.
    ///
    /// Either half falls back to empty when its fetch fails.
    pub async fn storefront_home(&self) -> StorefrontHome {
        let (slides, stores) = futures::join!(self.hero_slides(), self.stores());

        StorefrontHome {
            slides: or_empty(HERO_SLIDES, slides),
            stores: or_empty(STORES, stores),
        }
    }
}

fn decode_rows<R, T>(
    table: &'static str,
    rows: Vec<Value>,
    convert: impl Fn(R) -> Result<T, DataError>,
) -> Vec<T>
where
    R: DeserializeOwned,
{
    rows.into_iter()
        .filter_map(|row| {
            let converted = serde_json::from_value::<R>(row)
                .map_err(|e| DataError::invalid_row(table, e.to_string()))
                .and_then(&convert);
            match converted {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(table, error = %e, "Skipping invalid row");
                    None
                }
            }
        })
        .collect()
}

fn or_empty<T>(table: &'static str, result: Result<Vec<T>, DataError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(table, error = %e, "Failed to load, showing none");
        Vec::new()
    })
}
