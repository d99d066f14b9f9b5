//! Backend boundary for the auto-parts shop.
//!
//! This crate provides:
//! - `RowApi` / `RestClient` - Row and file access over the hosted backend's REST API
//! - `RowQuery` - Filters, ordering and limits for row requests
//! - Typed records - Rows validated into domain types at the edge
//! - `CatalogRepository` - Products, vehicles, stores, slides, social links
//! - `OrderService` - Two-step order write with compensation
//! - `InventoryService` - Stock adjustments with an audit row
//! - `MessageService` / `MediaService` - Contact form and image uploads
//! - `RegionApi` / `RegionClient` - Province and city lookups
//! - `DependencyTag` / `TimeoutConfig` - Per-dependency timeouts
//!
//! Writes are never retried. A failed write is logged and returned.

mod catalog;
mod client;
mod dependency;
mod error;
mod inventory;
mod media;
mod messages;
mod orders;
mod query;
pub mod records;
mod regions;
mod timeout;

pub use catalog::{CatalogRepository, StorefrontHome};
pub use client::{select_as, BackendConfig, MockRowApi, RestClient, RowApi};
pub use dependency::DependencyTag;
pub use error::DataError;
pub use inventory::{InventoryError, InventoryService};
pub use media::{MediaBucket, MediaService, MAX_UPLOAD_BYTES};
pub use messages::MessageService;
pub use orders::{OrderError, OrderService};
pub use query::{Order, RowQuery};
pub use regions::{MockRegionApi, RegionApi, RegionClient, DEFAULT_REGIONS_URL};
pub use timeout::TimeoutConfig;
