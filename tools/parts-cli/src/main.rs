//! Parts CLI - storefront and back office for the auto-parts shop.
//!
//! Commands:
//! - `parts catalog` - Browse and filter products
//! - `parts fitment` - Look up vehicles and find what fits
//! - `parts cart` - Manage the local cart
//! - `parts garage` - Manage saved vehicles
//! - `parts checkout` - Place an order for the cart
//! - `parts inventory` - Adjust stock
//! - `parts regions` - Province and city lookups
//! - `parts content` - Slides, stores, social links, contact form
//! - `parts media` - Upload images
//! - `parts config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    CartArgs, CatalogArgs, CheckoutArgs, ConfigArgs, ContentArgs, FitmentArgs, GarageArgs,
    InventoryArgs, MediaArgs, RegionsArgs,
};

/// Parts CLI - Browse, buy and manage auto parts
#[derive(Parser)]
#[command(name = "parts")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog(CatalogArgs),

    /// Vehicle lookup and fitment
    Fitment(FitmentArgs),

    /// Manage the cart
    Cart(CartArgs),

    /// Manage saved vehicles
    Garage(GarageArgs),

    /// Place an order for the cart
    Checkout(CheckoutArgs),

    /// Adjust product stock
    Inventory(InventoryArgs),

    /// Province and city lookups
    Regions(RegionsArgs),

    /// Storefront content and contact form
    Content(ContentArgs),

    /// Upload images
    Media(MediaArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&ctx.config.logging, cli.verbose, cli.json) {
        ctx.output.warn(&format!("{:#}", e));
    }

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Fitment(args) => commands::fitment::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Garage(args) => commands::garage::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Inventory(args) => commands::inventory::run(args, &ctx).await,
        Commands::Regions(args) => commands::regions::run(args, &ctx).await,
        Commands::Content(args) => commands::content::run(args, &ctx).await,
        Commands::Media(args) => commands::media::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "Command failed");
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
