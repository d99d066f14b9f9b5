//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod content;
pub mod fitment;
pub mod garage;
pub mod inventory;
pub mod media;
pub mod regions;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: Option<CatalogCommand>,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products (the default).
    List(ListArgs),
    /// Show one product.
    Show {
        /// Product ID.
        id: i64,
    },
    /// List categories with product counts.
    Categories,
}

/// Product listing filters.
#[derive(Args, Clone)]
pub struct ListArgs {
    /// Only this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Match name, brand, part number or description.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only products in stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Only parts that fit this vehicle ID.
    #[arg(long, conflicts_with = "garage")]
    pub fits: Option<i64>,

    /// Only parts that fit the active garage vehicle.
    #[arg(long)]
    pub garage: bool,

    /// Minimum price.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// newest, price-asc, price-desc or name.
    #[arg(long, default_value = "newest")]
    pub sort: String,

    /// Page number.
    #[arg(short, long, default_value = "1")]
    pub page: i64,

    /// Products per page (default from config).
    #[arg(long)]
    pub per_page: Option<i64>,
}

/// Arguments for the fitment command.
#[derive(Args)]
pub struct FitmentArgs {
    #[command(subcommand)]
    pub command: FitmentCommand,
}

#[derive(Subcommand)]
pub enum FitmentCommand {
    /// List makes.
    Makes,
    /// List models for a make.
    Models {
        make: String,
    },
    /// List years for a make and model, newest first.
    Years {
        make: String,
        model: String,
    },
    /// Find the vehicle covering a make, model and year.
    Resolve {
        make: String,
        model: String,
        year: i32,
    },
    /// Pick a vehicle and save it to the garage.
    Select {
        make: String,
        model: String,
        year: i32,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and its totals.
    Show {
        /// Price for store pickup instead of standard shipping.
        #[arg(long)]
        pickup: bool,
    },
    /// Add one unit of a product.
    Add {
        /// Product ID.
        id: i64,
    },
    /// Remove a product's line.
    Remove {
        id: i64,
    },
    /// Increase a line's quantity.
    Inc {
        id: i64,
        #[arg(default_value = "1")]
        by: i64,
    },
    /// Decrease a line's quantity (never below 1).
    Dec {
        id: i64,
        #[arg(default_value = "1")]
        by: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the garage command.
#[derive(Args)]
pub struct GarageArgs {
    #[command(subcommand)]
    pub command: Option<GarageCommand>,
}

#[derive(Subcommand)]
pub enum GarageCommand {
    /// List saved vehicles.
    List,
    /// Forget a saved vehicle.
    Remove {
        /// Vehicle ID.
        id: i64,
        /// Model year, needed when the vehicle is saved for several years.
        #[arg(long)]
        year: Option<i32>,
    },
    /// Make a saved vehicle the active one.
    Select {
        /// Vehicle ID.
        id: i64,
        /// Model year, needed when the vehicle is saved for several years.
        #[arg(long)]
        year: Option<i32>,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    /// Collect from this store instead of shipping.
    #[arg(long)]
    pub pickup: Option<i64>,

    #[arg(long)]
    pub street: Option<String>,

    #[arg(long)]
    pub barangay: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub province: Option<String>,

    #[arg(long)]
    pub postal_code: Option<String>,

    #[arg(long)]
    pub landmark: Option<String>,

    /// cod, gcash or bank_transfer.
    #[arg(long, default_value = "cod")]
    pub payment: String,

    /// Notes for the shop.
    #[arg(long)]
    pub notes: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the inventory command.
#[derive(Args)]
pub struct InventoryArgs {
    #[command(subcommand)]
    pub command: InventoryCommand,
}

#[derive(Subcommand)]
pub enum InventoryCommand {
    /// Change a product's stock by a signed amount.
    Adjust {
        /// Product ID.
        id: i64,
        /// Units to add (negative to remove).
        #[arg(allow_hyphen_values = true)]
        delta: i64,
        /// restock, sale, return, correction or damaged.
        #[arg(short, long, default_value = "correction")]
        reason: String,
        #[arg(short, long)]
        notes: Option<String>,
    },
}

/// Arguments for the regions command.
#[derive(Args)]
pub struct RegionsArgs {
    #[command(subcommand)]
    pub command: RegionsCommand,
}

#[derive(Subcommand)]
pub enum RegionsCommand {
    /// List provinces.
    Provinces,
    /// List cities and municipalities.
    Cities {
        /// Province code.
        #[arg(long, conflicts_with = "region", required_unless_present = "region")]
        province: Option<String>,
        /// Region code, for regions without provinces.
        #[arg(long)]
        region: Option<String>,
    },
}

/// Arguments for the content command.
#[derive(Args)]
pub struct ContentArgs {
    #[command(subcommand)]
    pub command: ContentCommand,
}

#[derive(Subcommand)]
pub enum ContentCommand {
    /// Active hero slides.
    Slides,
    /// Stores open for pickup.
    Stores,
    /// Social media links.
    Links,
    /// Send a message through the contact form.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(short, long)]
        message: String,
    },
}

/// Arguments for the media command.
#[derive(Args)]
pub struct MediaArgs {
    #[command(subcommand)]
    pub command: MediaCommand,
}

#[derive(Subcommand)]
pub enum MediaCommand {
    /// Upload an image and print its public URL.
    Upload {
        /// Image file.
        file: String,
        /// products or hero-images.
        #[arg(short, long, default_value = "products")]
        bucket: String,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a default config file.
    Init {
        /// Overwrite without asking.
        #[arg(short, long)]
        force: bool,
    },
}
