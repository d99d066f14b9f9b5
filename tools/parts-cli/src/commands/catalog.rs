//! Catalog browsing commands.

use anyhow::{bail, Context as _, Result};
use parts_commerce::catalog::categories_from;
use parts_commerce::prelude::*;

use super::{CatalogArgs, CatalogCommand, ListArgs};
use crate::context::Context;
use crate::output::{stock_badge, truncate};

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(CatalogCommand::List(list)) => list_products(&list, ctx).await,
        Some(CatalogCommand::Show { id }) => show_product(ProductId::new(id), ctx).await,
        Some(CatalogCommand::Categories) => list_categories(ctx).await,
        None => list_products(&args.list, ctx).await,
    }
}

async fn list_products(args: &ListArgs, ctx: &Context) -> Result<()> {
    let query = build_query(args, ctx)?;

    let spinner = ctx.output.spinner("Loading products...");
    let products = ctx.catalog()?.products().await;
    spinner.finish_and_clear();
    let products = products.context("Failed to load products")?;

    let results = query.run(&products);

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    if results.is_empty() {
        ctx.output.info("No products match.");
        return Ok(());
    }

    let page = results.pagination;
    ctx.output.header(&format!(
        "Products {}-{} of {}",
        page.start_item(),
        page.end_item(),
        page.total
    ));

    let widths = [6, 36, 14, 12, 14];
    ctx.output
        .table_row(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK"], &widths);
    for product in &results.items {
        let id = product.id.to_string();
        let name = truncate(&product.name, 36);
        let category = truncate(&product.category, 14);
        let price = product.price.display();
        let stock = stock_badge(product);
        ctx.output.table_row(
            &[id.as_str(), name.as_str(), category.as_str(), price.as_str(), stock.as_str()],
            &widths,
        );
    }

    if page.total_pages > 1 {
        let pages: Vec<String> = page
            .page_numbers(7)
            .iter()
            .map(|n| if *n == page.page { format!("[{}]", n) } else { n.to_string() })
            .collect();
        ctx.output.info("");
        ctx.output.info(&format!("Page {}", pages.join(" ")));
    }

    Ok(())
}

fn build_query(args: &ListArgs, ctx: &Context) -> Result<ProductQuery> {
    let currency = ctx.currency()?;
    let sort: SortOption = args.sort.parse()?;
    let per_page = args.per_page.unwrap_or(ctx.config.shop.per_page);

    let mut query = ProductQuery::new()
        .with_sort(sort)
        .with_pagination(args.page, per_page);

    if let Some(category) = &args.category {
        query = query.with_filter(Filter::category(category));
    }
    if let Some(text) = &args.search {
        query = query.with_filter(Filter::text(text));
    }
    if args.in_stock {
        query = query.with_filter(Filter::in_stock());
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        let min = args.min_price.map(|v| Money::from_decimal(v, currency));
        let max = args.max_price.map(|v| Money::from_decimal(v, currency));
        query = query.with_filter(Filter::price_range(min, max));
    }

    if let Some(id) = args.fits {
        query = query.with_filter(Filter::fits(VehicleId::new(id)));
    } else if args.garage {
        let garage = ctx.garage_store()?;
        let Some(active) = garage.active() else {
            bail!("No active vehicle. Use `parts fitment select` or `parts garage select`.");
        };
        ctx.output.info(&format!("Showing parts for {}", active.label()));
        query = query.with_filter(Filter::fits(active.vehicle.id));
    }

    Ok(query)
}

async fn show_product(id: ProductId, ctx: &Context) -> Result<()> {
    let product = ctx
        .catalog()?
        .product(id)
        .await
        .with_context(|| format!("Failed to load product {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", &product.id.to_string());
    ctx.output.kv("Category", &product.category);
    if let Some(brand) = &product.brand {
        ctx.output.kv("Brand", brand);
    }
    if let Some(part_number) = &product.part_number {
        ctx.output.kv("Part number", part_number);
    }
    ctx.output.kv("Price", &product.price.display());
    ctx.output.kv("Stock", &stock_badge(&product));
    if product.is_universal() {
        ctx.output.kv("Fits", "all vehicles");
    } else {
        let ids: Vec<String> = product
            .compatible_vehicles
            .iter()
            .map(ToString::to_string)
            .collect();
        ctx.output.kv("Fits vehicles", &ids.join(", "));
    }
    if let Some(description) = &product.description {
        ctx.output.info("");
        ctx.output.info(description);
    }

    Ok(())
}

async fn list_categories(ctx: &Context) -> Result<()> {
    let products = ctx
        .catalog()?
        .products()
        .await
        .context("Failed to load products")?;
    let categories = categories_from(&products);

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &categories {
        ctx.output
            .list_item(&format!("{} ({})", category.name, category.product_count));
    }

    Ok(())
}
