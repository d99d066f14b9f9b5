//! Saved vehicle commands.

use anyhow::{bail, Result};
use parts_commerce::prelude::*;
use parts_store::GarageStore;

use super::{GarageArgs, GarageCommand};
use crate::context::Context;

/// Run the garage command.
pub async fn run(args: GarageArgs, ctx: &Context) -> Result<()> {
    let mut garage = ctx.garage_store()?;

    match args.command.unwrap_or(GarageCommand::List) {
        GarageCommand::List => {
            if ctx.output.is_json() {
                ctx.output.json(garage.garage());
                return Ok(());
            }

            ctx.output.header("Garage");
            if garage.list().is_empty() {
                ctx.output
                    .info("No saved vehicles. Use `parts fitment select` to add one.");
                return Ok(());
            }

            let active = garage.active().map(|saved| (saved.vehicle.id, saved.year));
            for saved in garage.list() {
                let marker = if Some((saved.vehicle.id, saved.year)) == active { "*" } else { " " };
                ctx.output
                    .list_item(&format!("{} [{}] {}", marker, saved.vehicle.id, saved.label()));
            }
            Ok(())
        }
        GarageCommand::Remove { id, year } => {
            let id = VehicleId::new(id);
            let year = saved_year(&garage, id, year)?;
            if !garage.remove(id, year)? {
                bail!("Vehicle {} ({}) is not in the garage", id, year);
            }
            ctx.output.success(&format!("Removed vehicle {} ({})", id, year));
            Ok(())
        }
        GarageCommand::Select { id, year } => {
            let id = VehicleId::new(id);
            let year = saved_year(&garage, id, year)?;
            if !garage.select(id, year)? {
                bail!("Vehicle {} ({}) is not in the garage", id, year);
            }
            if let Some(active) = garage.active() {
                ctx.output
                    .success(&format!("{} is now your active vehicle", active.label()));
            }
            Ok(())
        }
    }
}

/// The year to act on: the one given, or the only one saved for `id`.
fn saved_year(garage: &GarageStore, id: VehicleId, year: Option<i32>) -> Result<i32> {
    if let Some(year) = year {
        return Ok(year);
    }
    match garage.garage().years_saved(id).as_slice() {
        [] => bail!("Vehicle {} is not in the garage", id),
        [year] => Ok(*year),
        years => {
            let years: Vec<String> = years.iter().map(ToString::to_string).collect();
            bail!(
                "Vehicle {} is saved for {}. Pass --year to pick one.",
                id,
                years.join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parts_store::{KvStore, MemoryStore};
    use std::sync::Arc;

    #[test]
    fn test_saved_year_needs_year_when_ambiguous() {
        let kv: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let mut garage = GarageStore::open(kv).unwrap();
        let civic = Vehicle::new(VehicleId::new(3), "Honda", "Civic", 2016, Some(2021));
        garage.save(civic.clone(), 2017).unwrap();

        assert_eq!(saved_year(&garage, VehicleId::new(3), None).unwrap(), 2017);

        garage.save(civic, 2019).unwrap();
        assert!(saved_year(&garage, VehicleId::new(3), None).is_err());
        assert_eq!(saved_year(&garage, VehicleId::new(3), Some(2019)).unwrap(), 2019);
        assert!(saved_year(&garage, VehicleId::new(7), None).is_err());
    }
}
