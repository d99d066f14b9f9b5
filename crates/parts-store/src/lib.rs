//! Local persisted state for the auto-parts shop.
//!
//! The cart and the garage of saved vehicles live on the customer's machine
//! rather than in the backend. Each is hydrated once when its store opens
//! and written back after every mutation.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use parts_store::{CartStore, MemoryStore};
//! use parts_commerce::prelude::*;
//!
//! let kv = Arc::new(MemoryStore::new());
//! let mut cart = CartStore::open(kv.clone())?;
//!
//! let filter = CartProduct {
//!     id: ProductId::new(3),
//!     name: "Oil Filter".to_string(),
//!     category: "Filters".to_string(),
//!     unit_price: Money::from_decimal(350.0, Currency::PHP),
//!     image_url: None,
//! };
//! cart.add(&filter)?;
//!
//! // A second store over the same backing data sees the line.
//! let reopened = CartStore::open(kv)?;
//! assert_eq!(reopened.cart().item_count(), 1);
//! # Ok::<(), parts_store::StoreError>(())
//! ```

mod cart_store;
mod error;
mod garage_store;
mod kv;
mod persisted;

pub use cart_store::CartStore;
pub use error::StoreError;
pub use garage_store::GarageStore;
pub use kv::{FileStore, KvStore, MemoryStore};
pub use persisted::{Envelope, Persisted};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CartStore, FileStore, GarageStore, KvStore, MemoryStore, StoreError};
}
