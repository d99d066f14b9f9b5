//! Storefront domain types and logic for the auto-parts shop.
//!
//! This crate holds everything that can be computed without talking to the
//! backend:
//!
//! - **Catalog**: Products, categories, inventory levels
//! - **Cart**: Cart lines, merge-by-id mutations, totals
//! - **Checkout**: Step flow, contact/shipping/payment validation, order drafts
//! - **Fitment**: Vehicle compatibility catalog, cascading selector, garage
//! - **Search**: Filters, sorting, pagination
//! - **Content**: Hero slides, stores, social links, contact messages, regions
//!
//! # Example
//!
//! ```rust
//! use parts_commerce::prelude::*;
//!
//! let brake_pads = CartProduct {
//!     id: ProductId::new(1),
//!     name: "Ceramic Brake Pads".to_string(),
//!     category: "Brakes".to_string(),
//!     unit_price: Money::from_decimal(500.0, Currency::PHP),
//!     image_url: None,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_item(&brake_pads);
//! cart.add_item(&brake_pads);
//!
//! let totals = cart.totals(DeliveryMethod::Standard).unwrap();
//! assert_eq!(totals.total.display(), "₱1150.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod content;
pub mod fitment;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        AdjustmentPlan, AdjustmentReason, CategorySummary, InventoryLevel, Product,
    };

    // Cart
    pub use crate::cart::{compute_totals, Cart, CartEvent, CartLine, CartProduct, CartTotals};

    // Checkout
    pub use crate::checkout::{
        CheckoutFlow, CheckoutStep, ContactInfo, DeliveryMethod, OrderDraft, OrderLine,
        OrderStatus, PaymentMethod, ShippingAddress, ValidatedCheckout,
    };

    // Fitment
    pub use crate::fitment::{
        FitmentSelector, Garage, SavedVehicle, SelectorState, Vehicle, VehicleCatalog,
    };

    // Search
    pub use crate::search::{Filter, Pagination, ProductQuery, SearchResults, SortOption};

    // Content
    pub use crate::content::{
        CityMunicipality, ContactMessage, HeroSlide, Province, SocialLink, Store,
    };
}
