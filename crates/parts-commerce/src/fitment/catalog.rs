//! Cascading set extraction over the vehicle table.

use crate::error::CommerceError;
use crate::fitment::Vehicle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The full vehicle compatibility table, loaded once and read-only after.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VehicleCatalog {
    vehicles: Vec<Vehicle>,
}

impl VehicleCatalog {
    /// Wrap rows as fetched. Row order is kept; it decides which row wins
    /// when ranges overlap.
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    /// Like [`VehicleCatalog::new`], but an empty table is an error.
    pub fn from_rows(vehicles: Vec<Vehicle>) -> Result<Self, CommerceError> {
        if vehicles.is_empty() {
            return Err(CommerceError::DataUnavailable(
                "vehicle catalog is empty".to_string(),
            ));
        }
        Ok(Self::new(vehicles))
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Sorted distinct makes.
    pub fn makes_available(&self) -> Vec<String> {
        self.vehicles
            .iter()
            .map(|v| v.make.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Sorted distinct models for a make.
    pub fn models_for_make(&self, make: &str) -> Vec<String> {
        self.vehicles
            .iter()
            .filter(|v| v.make == make)
            .map(|v| v.model.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Every model year covered by any row for the make and model, newest
    /// first and without duplicates.
    pub fn years_for_make_model(&self, make: &str, model: &str, current_year: i32) -> Vec<i32> {
        self.vehicles
            .iter()
            .filter(|v| v.is(make, model) && v.has_plausible_years(current_year))
            .flat_map(|v| v.year_start..=v.effective_year_end(current_year))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .rev()
            .collect()
    }

    /// First row matching make, model and year.
    pub fn resolve_vehicle(
        &self,
        make: &str,
        model: &str,
        year: i32,
        current_year: i32,
    ) -> Option<&Vehicle> {
        self.vehicles
            .iter()
            .find(|v| v.is(make, model) && v.covers(year, current_year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::VehicleId;

    fn catalog() -> VehicleCatalog {
        VehicleCatalog::new(vec![
            Vehicle::new(VehicleId::new(1), "Toyota", "Vios", 2013, Some(2018)),
            Vehicle::new(VehicleId::new(2), "Honda", "Civic", 2015, Some(2018)),
            Vehicle::new(VehicleId::new(3), "Honda", "Civic", 2017, Some(2020)),
            Vehicle::new(VehicleId::new(4), "Honda", "City", 2020, None),
            Vehicle::new(VehicleId::new(5), "Toyota", "Fortuner", 2016, None),
        ])
    }

    #[test]
    fn test_makes_sorted_distinct() {
        assert_eq!(catalog().makes_available(), vec!["Honda", "Toyota"]);
    }

    #[test]
    fn test_models_for_make() {
        assert_eq!(catalog().models_for_make("Honda"), vec!["City", "Civic"]);
        assert!(catalog().models_for_make("Nissan").is_empty());
    }

    #[test]
    fn test_overlapping_ranges_union() {
        let years = catalog().years_for_make_model("Honda", "Civic", 2025);
        assert_eq!(years, vec![2020, 2019, 2018, 2017, 2016, 2015]);
    }

    #[test]
    fn test_open_range_includes_current_year() {
        let years = catalog().years_for_make_model("Honda", "City", 2025);
        assert_eq!(years, vec![2025, 2024, 2023, 2022, 2021, 2020]);
    }

    #[test]
    fn test_years_ignore_implausible_rows() {
        let catalog = VehicleCatalog::new(vec![
            Vehicle::new(VehicleId::new(1), "Mitsubishi", "Lancer", -20_000_000, None),
            Vehicle::new(VehicleId::new(2), "Mitsubishi", "Lancer", 2008, Some(2017)),
        ]);
        let years = catalog.years_for_make_model("Mitsubishi", "Lancer", 2025);
        assert_eq!(years.len(), 10);
        assert_eq!(years.first(), Some(&2017));
    }

    #[test]
    fn test_resolve_picks_first_matching_row() {
        let catalog = catalog();
        let civic = catalog.resolve_vehicle("Honda", "Civic", 2017, 2025).unwrap();
        assert_eq!(civic.id, VehicleId::new(2));

        let civic = catalog.resolve_vehicle("Honda", "Civic", 2019, 2025).unwrap();
        assert_eq!(civic.id, VehicleId::new(3));
    }

    #[test]
    fn test_resolve_outside_range_is_none() {
        assert!(catalog().resolve_vehicle("Toyota", "Vios", 2020, 2025).is_none());
    }

    #[test]
    fn test_empty_rows_are_unavailable() {
        let err = VehicleCatalog::from_rows(Vec::new()).unwrap_err();
        assert!(matches!(err, CommerceError::DataUnavailable(_)));
    }
}
