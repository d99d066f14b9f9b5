//! Province and city lookups for shipping addresses.

use anyhow::{Context as _, Result};
use parts_data::RegionApi;

use super::{RegionsArgs, RegionsCommand};
use crate::context::Context;

/// Run the regions command.
pub async fn run(args: RegionsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.regions()?;

    match args.command {
        RegionsCommand::Provinces => {
            let spinner = ctx.output.spinner("Loading provinces...");
            let provinces = client.provinces().await;
            spinner.finish_and_clear();
            let provinces = provinces.context("Failed to load provinces")?;

            if ctx.output.is_json() {
                ctx.output.json(&provinces);
                return Ok(());
            }

            ctx.output.header(&format!("Provinces ({})", provinces.len()));
            let widths = [12, 32, 12];
            ctx.output.table_row(&["CODE", "NAME", "REGION"], &widths);
            for province in &provinces {
                ctx.output.table_row(
                    &[
                        province.code.as_str(),
                        province.name.as_str(),
                        province.region_code.as_str(),
                    ],
                    &widths,
                );
            }
            Ok(())
        }
        RegionsCommand::Cities { province, region } => {
            let spinner = ctx.output.spinner("Loading cities...");
            let cities = match (&province, &region) {
                (Some(code), _) => client.cities_by_province(code).await,
                (None, Some(code)) => client.cities_by_region(code).await,
                (None, None) => Ok(Vec::new()),
            };
            spinner.finish_and_clear();
            let cities = cities.context("Failed to load cities")?;

            if ctx.output.is_json() {
                ctx.output.json(&cities);
                return Ok(());
            }

            ctx.output
                .header(&format!("Cities and municipalities ({})", cities.len()));
            for city in &cities {
                let kind = if city.is_city { "city" } else { "municipality" };
                ctx.output
                    .list_item(&format!("{} ({}, {})", city.name, city.code, kind));
            }
            Ok(())
        }
    }
}
