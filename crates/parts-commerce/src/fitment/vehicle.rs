//! Vehicle compatibility rows.

use crate::ids::VehicleId;
use serde::{Deserialize, Serialize};

/// Earliest model year a row may start at.
pub const EARLIEST_MODEL_YEAR: i32 = 1886;

/// How many years past the current one a model year may reach.
pub const MODEL_YEAR_LEAD: i32 = 2;

/// A row of the vehicle compatibility table.
///
/// One make/model pair may have several rows with overlapping year ranges
/// (e.g., per generation or engine).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub make: String,
    pub model: String,
    /// First model year, inclusive.
    pub year_start: i32,
    /// Last model year, inclusive. `None` means still in production.
    pub year_end: Option<i32>,
}

impl Vehicle {
    pub fn new(
        id: VehicleId,
        make: impl Into<String>,
        model: impl Into<String>,
        year_start: i32,
        year_end: Option<i32>,
    ) -> Self {
        Self {
            id,
            make: make.into(),
            model: model.into(),
            year_start,
            year_end,
        }
    }

    /// Last covered year, with open-ended ranges running to `current_year`.
    pub fn effective_year_end(&self, current_year: i32) -> i32 {
        self.year_end.unwrap_or(current_year)
    }

    /// Check whether a model year falls within this row.
    pub fn covers(&self, year: i32, current_year: i32) -> bool {
        self.year_start <= year && year <= self.effective_year_end(current_year)
    }

    /// Both ends fall within `EARLIEST_MODEL_YEAR..=current_year + MODEL_YEAR_LEAD`.
    pub fn has_plausible_years(&self, current_year: i32) -> bool {
        let latest = current_year.saturating_add(MODEL_YEAR_LEAD);
        let window = EARLIEST_MODEL_YEAR..=latest;
        window.contains(&self.year_start)
            && self.year_end.map_or(true, |end| window.contains(&end))
    }

    /// Check for an exact make and model match.
    pub fn is(&self, make: &str, model: &str) -> bool {
        self.make == make && self.model == model
    }

    /// e.g. "Toyota Vios (2013-2018)" or "Ford Ranger (2022-present)".
    pub fn display_name(&self) -> String {
        let end = match self.year_end {
            Some(year) => year.to_string(),
            None => "present".to_string(),
        };
        format!("{} {} ({}-{})", self.make, self.model, self.year_start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_closed_range() {
        let vios = Vehicle::new(VehicleId::new(1), "Toyota", "Vios", 2013, Some(2018));
        assert!(vios.covers(2013, 2025));
        assert!(vios.covers(2018, 2025));
        assert!(!vios.covers(2020, 2025));
        assert!(!vios.covers(2012, 2025));
    }

    #[test]
    fn test_open_range_runs_to_current_year() {
        let ranger = Vehicle::new(VehicleId::new(2), "Ford", "Ranger", 2022, None);
        assert!(ranger.covers(2025, 2025));
        assert!(!ranger.covers(2026, 2025));
        assert_eq!(ranger.display_name(), "Ford Ranger (2022-present)");
    }

    #[test]
    fn test_plausible_years() {
        assert!(Vehicle::new(VehicleId::new(1), "Ford", "Model T", 1908, Some(1927)).has_plausible_years(2025));
        assert!(Vehicle::new(VehicleId::new(2), "Toyota", "Vios", 2026, None).has_plausible_years(2025));
        assert!(!Vehicle::new(VehicleId::new(3), "Toyota", "Vios", -20_000_000, None).has_plausible_years(2025));
        assert!(!Vehicle::new(VehicleId::new(4), "Toyota", "Vios", 2013, Some(i32::MAX)).has_plausible_years(2025));
    }
}
