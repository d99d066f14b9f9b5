//! Vehicle lookup commands.

use anyhow::{Context as _, Result};
use chrono::Datelike;
use parts_commerce::prelude::*;

use super::{FitmentArgs, FitmentCommand};
use crate::context::Context;

/// Run the fitment command.
pub async fn run(args: FitmentArgs, ctx: &Context) -> Result<()> {
    let current_year = chrono::Local::now().year();
    let selector = load_selector(ctx, current_year).await?;

    match args.command {
        FitmentCommand::Makes => print_list(ctx, "Makes", &selector.makes()),
        FitmentCommand::Models { make } => {
            let models = selector.catalog().models_for_make(&make);
            print_list(ctx, &format!("{} models", make), &models)
        }
        FitmentCommand::Years { make, model } => {
            let years: Vec<String> = selector
                .catalog()
                .years_for_make_model(&make, &model, current_year)
                .iter()
                .map(ToString::to_string)
                .collect();
            print_list(ctx, &format!("{} {} years", make, model), &years)
        }
        FitmentCommand::Resolve { make, model, year } => {
            resolve(selector, &make, &model, year, ctx).map(|_| ())
        }
        FitmentCommand::Select { make, model, year } => {
            if let Some(vehicle) = resolve(selector, &make, &model, year, ctx)? {
                let mut garage = ctx.garage_store()?;
                let added = garage.save(vehicle, year)?;
                let label = garage
                    .active()
                    .map(|saved| saved.label())
                    .unwrap_or_default();
                if added {
                    ctx.output.success(&format!("Saved {} to your garage", label));
                } else {
                    ctx.output.success(&format!("{} is now your active vehicle", label));
                }
            }
            Ok(())
        }
    }
}

async fn load_selector(ctx: &Context, current_year: i32) -> Result<FitmentSelector> {
    let mut selector = FitmentSelector::new(current_year);
    selector.begin_loading();

    let spinner = ctx.output.spinner("Loading vehicles...");
    let catalog = ctx.catalog()?.vehicle_catalog().await;
    spinner.finish_and_clear();

    selector.finish_loading(catalog);
    if let SelectorState::LoadFailed { reason } = selector.state() {
        anyhow::bail!("Vehicle list unavailable: {}", reason);
    }
    ctx.output
        .debug(&format!("Loaded {} vehicles", selector.catalog().len()));
    Ok(selector)
}

/// Walk the selector through make, model and year, then search.
fn resolve(
    mut selector: FitmentSelector,
    make: &str,
    model: &str,
    year: i32,
    ctx: &Context,
) -> Result<Option<Vehicle>> {
    selector.choose_make(make).context("Make not found")?;
    selector.choose_model(model).context("Model not found")?;
    selector.choose_year(year).context("Year not offered")?;

    let vehicle = selector.search()?.cloned();
    match &vehicle {
        Some(vehicle) if ctx.output.is_json() => ctx.output.json(vehicle),
        Some(vehicle) => {
            ctx.output.header(&vehicle.display_name());
            ctx.output.kv("Vehicle ID", &vehicle.id.to_string());
            ctx.output.info(&format!(
                "Run `parts catalog --fits {}` to see compatible parts",
                vehicle.id
            ));
        }
        None => ctx
            .output
            .warn(&format!("No vehicle covers {} {} {}", year, make, model)),
    }
    Ok(vehicle)
}

fn print_list(ctx: &Context, title: &str, items: &[String]) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output.header(title);
    if items.is_empty() {
        ctx.output.info("None found.");
    }
    for item in items {
        ctx.output.list_item(item);
    }
    Ok(())
}
