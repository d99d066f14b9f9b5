//! Make / model / year selector state machine.

use crate::error::CommerceError;
use crate::fitment::{Vehicle, VehicleCatalog};
use serde::{Deserialize, Serialize};

/// Selector state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectorState {
    /// Nothing requested yet.
    Idle,
    /// Catalog fetch in flight.
    Loading,
    /// Catalog available, nothing chosen.
    Loaded,
    /// Catalog fetch failed or came back empty. Terminal until reloaded.
    LoadFailed { reason: String },
    MakeChosen,
    ModelChosen,
    /// Make, model and year chosen; ready to search.
    Ready,
    /// Search found a matching row.
    Resolved,
}

impl SelectorState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorState::Idle => "idle",
            SelectorState::Loading => "loading",
            SelectorState::Loaded => "loaded",
            SelectorState::LoadFailed { .. } => "load_failed",
            SelectorState::MakeChosen => "make_chosen",
            SelectorState::ModelChosen => "model_chosen",
            SelectorState::Ready => "ready",
            SelectorState::Resolved => "resolved",
        }
    }

    fn has_catalog(&self) -> bool {
        !matches!(
            self,
            SelectorState::Idle | SelectorState::Loading | SelectorState::LoadFailed { .. }
        )
    }
}

/// Cascading vehicle selector.
///
/// Choosing a make clears model and year; choosing a model clears year.
/// Only choices offered by the catalog are accepted.
#[derive(Debug, Clone)]
pub struct FitmentSelector {
    state: SelectorState,
    catalog: VehicleCatalog,
    current_year: i32,
    make: Option<String>,
    model: Option<String>,
    year: Option<i32>,
    resolved: Option<Vehicle>,
}

impl FitmentSelector {
    /// Create an idle selector. `current_year` closes open-ended year ranges.
    pub fn new(current_year: i32) -> Self {
        Self {
            state: SelectorState::Idle,
            catalog: VehicleCatalog::default(),
            current_year,
            make: None,
            model: None,
            year: None,
            resolved: None,
        }
    }

    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    pub fn catalog(&self) -> &VehicleCatalog {
        &self.catalog
    }

    pub fn make(&self) -> Option<&str> {
        self.make.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// The vehicle found by the last successful search.
    pub fn resolved(&self) -> Option<&Vehicle> {
        self.resolved.as_ref()
    }

    /// Mark the catalog fetch as started.
    pub fn begin_loading(&mut self) {
        self.clear_selection();
        self.state = SelectorState::Loading;
    }

    /// Record the outcome of the catalog fetch.
    pub fn finish_loading(&mut self, result: Result<VehicleCatalog, CommerceError>) {
        self.clear_selection();
        match result {
            Ok(catalog) if !catalog.is_empty() => {
                tracing::debug!(vehicles = catalog.len(), "Vehicle catalog loaded");
                self.catalog = catalog;
                self.state = SelectorState::Loaded;
            }
            Ok(_) => {
                tracing::warn!("Vehicle catalog is empty");
                self.state = SelectorState::LoadFailed {
                    reason: "vehicle catalog is empty".to_string(),
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, "Vehicle catalog failed to load");
                self.state = SelectorState::LoadFailed {
                    reason: e.to_string(),
                };
            }
        }
    }

    /// Makes to offer.
    pub fn makes(&self) -> Vec<String> {
        self.catalog.makes_available()
    }

    /// Models to offer for the chosen make.
    pub fn models(&self) -> Vec<String> {
        match &self.make {
            Some(make) => self.catalog.models_for_make(make),
            None => Vec::new(),
        }
    }

    /// Years to offer for the chosen make and model.
    pub fn years(&self) -> Vec<i32> {
        match (&self.make, &self.model) {
            (Some(make), Some(model)) => {
                self.catalog
                    .years_for_make_model(make, model, self.current_year)
            }
            _ => Vec::new(),
        }
    }

    pub fn choose_make(&mut self, make: &str) -> Result<(), CommerceError> {
        if !self.state.has_catalog() {
            return Err(self.not_ready("make"));
        }
        if !self.makes().iter().any(|m| m == make) {
            return Err(CommerceError::InvalidSelection(format!(
                "unknown make '{}'",
                make
            )));
        }

        self.clear_selection();
        self.make = Some(make.to_string());
        self.state = SelectorState::MakeChosen;
        Ok(())
    }

    pub fn choose_model(&mut self, model: &str) -> Result<(), CommerceError> {
        if self.make.is_none() || !self.state.has_catalog() {
            return Err(self.not_ready("model"));
        }
        if !self.models().iter().any(|m| m == model) {
            return Err(CommerceError::InvalidSelection(format!(
                "unknown model '{}'",
                model
            )));
        }

        self.model = Some(model.to_string());
        self.year = None;
        self.resolved = None;
        self.state = SelectorState::ModelChosen;
        Ok(())
    }

    pub fn choose_year(&mut self, year: i32) -> Result<(), CommerceError> {
        if self.model.is_none() || !self.state.has_catalog() {
            return Err(self.not_ready("year"));
        }
        if !self.years().contains(&year) {
            return Err(CommerceError::InvalidSelection(format!(
                "year {} is not offered",
                year
            )));
        }

        self.year = Some(year);
        self.resolved = None;
        self.state = SelectorState::Ready;
        Ok(())
    }

    /// Resolve the chosen make, model and year to a catalog row.
    ///
    /// A miss is not an error: the selector stays `Ready`, a warning is
    /// logged, and `Ok(None)` lets the caller decide what to show.
    pub fn search(&mut self) -> Result<Option<&Vehicle>, CommerceError> {
        let (Some(make), Some(model), Some(year)) = (&self.make, &self.model, self.year) else {
            return Err(self.not_ready("search"));
        };

        match self
            .catalog
            .resolve_vehicle(make, model, year, self.current_year)
        {
            Some(vehicle) => {
                tracing::debug!(vehicle_id = %vehicle.id, "Vehicle resolved");
                self.resolved = Some(vehicle.clone());
                self.state = SelectorState::Resolved;
            }
            None => {
                tracing::warn!(make = %make, model = %model, year, "No vehicle matches selection");
                self.resolved = None;
                self.state = SelectorState::Ready;
            }
        }

        Ok(self.resolved.as_ref())
    }

    /// Drop all choices, keeping the loaded catalog.
    pub fn reset(&mut self) {
        if self.state.has_catalog() {
            self.clear_selection();
            self.state = SelectorState::Loaded;
        }
    }

    fn clear_selection(&mut self) {
        self.make = None;
        self.model = None;
        self.year = None;
        self.resolved = None;
    }

    fn not_ready(&self, action: &str) -> CommerceError {
        CommerceError::InvalidSelection(format!(
            "cannot choose {} while {}",
            action,
            self.state.as_str()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::VehicleId;

    fn loaded() -> FitmentSelector {
        let mut selector = FitmentSelector::new(2025);
        selector.begin_loading();
        selector.finish_loading(Ok(VehicleCatalog::new(vec![
            Vehicle::new(VehicleId::new(1), "Toyota", "Vios", 2013, Some(2018)),
            Vehicle::new(VehicleId::new(2), "Toyota", "Vios", 2019, None),
            Vehicle::new(VehicleId::new(3), "Mitsubishi", "Montero Sport", 2016, None),
        ])));
        selector
    }

    #[test]
    fn test_load_transitions() {
        let mut selector = FitmentSelector::new(2025);
        assert_eq!(selector.state(), &SelectorState::Idle);

        selector.begin_loading();
        assert_eq!(selector.state(), &SelectorState::Loading);

        assert_eq!(loaded().state(), &SelectorState::Loaded);
    }

    #[test]
    fn test_load_failure() {
        let mut selector = FitmentSelector::new(2025);
        selector.begin_loading();
        selector.finish_loading(Err(CommerceError::DataUnavailable("timeout".to_string())));

        assert_eq!(selector.state().as_str(), "load_failed");
        assert!(selector.choose_make("Toyota").is_err());
    }

    #[test]
    fn test_empty_catalog_fails_load() {
        let mut selector = FitmentSelector::new(2025);
        selector.finish_loading(Ok(VehicleCatalog::default()));
        assert!(matches!(selector.state(), SelectorState::LoadFailed { .. }));
    }

    #[test]
    fn test_full_walk_resolves() {
        let mut selector = loaded();
        selector.choose_make("Toyota").unwrap();
        assert_eq!(selector.state(), &SelectorState::MakeChosen);
        selector.choose_model("Vios").unwrap();
        assert_eq!(selector.state(), &SelectorState::ModelChosen);
        selector.choose_year(2021).unwrap();
        assert_eq!(selector.state(), &SelectorState::Ready);

        let vehicle = selector.search().unwrap().cloned();
        assert_eq!(vehicle.map(|v| v.id), Some(VehicleId::new(2)));
        assert_eq!(selector.state(), &SelectorState::Resolved);
    }

    #[test]
    fn test_changing_make_clears_model_and_year() {
        let mut selector = loaded();
        selector.choose_make("Toyota").unwrap();
        selector.choose_model("Vios").unwrap();
        selector.choose_year(2015).unwrap();

        selector.choose_make("Mitsubishi").unwrap();
        assert_eq!(selector.model(), None);
        assert_eq!(selector.year(), None);
        assert_eq!(selector.models(), vec!["Montero Sport"]);
    }

    #[test]
    fn test_changing_model_clears_year() {
        let mut selector = loaded();
        selector.choose_make("Toyota").unwrap();
        selector.choose_model("Vios").unwrap();
        selector.choose_year(2015).unwrap();

        selector.choose_model("Vios").unwrap();
        assert_eq!(selector.year(), None);
        assert_eq!(selector.state(), &SelectorState::ModelChosen);
    }

    #[test]
    fn test_choices_must_be_offered() {
        let mut selector = loaded();
        assert!(selector.choose_model("Vios").is_err());
        assert!(selector.choose_make("Nissan").is_err());

        selector.choose_make("Toyota").unwrap();
        selector.choose_model("Vios").unwrap();
        assert!(selector.choose_year(2030).is_err());
        assert!(selector.choose_year(2012).is_err());
    }

    #[test]
    fn test_search_miss_stays_ready() {
        let mut selector = FitmentSelector::new(2025);
        selector.finish_loading(Ok(VehicleCatalog::new(vec![Vehicle::new(
            VehicleId::new(1),
            "Toyota",
            "Vios",
            2013,
            Some(2018),
        )])));
        selector.choose_make("Toyota").unwrap();
        selector.choose_model("Vios").unwrap();
        selector.choose_year(2018).unwrap();

        // Force a miss by shrinking the catalog behind the selection.
        selector.catalog = VehicleCatalog::new(vec![Vehicle::new(
            VehicleId::new(1),
            "Toyota",
            "Vios",
            2013,
            Some(2017),
        )]);

        assert!(selector.search().unwrap().is_none());
        assert_eq!(selector.state(), &SelectorState::Ready);
    }

    #[test]
    fn test_search_before_ready_is_error() {
        let mut selector = loaded();
        selector.choose_make("Toyota").unwrap();
        assert!(selector.search().is_err());
    }

    #[test]
    fn test_reset_keeps_catalog() {
        let mut selector = loaded();
        selector.choose_make("Toyota").unwrap();
        selector.reset();
        assert_eq!(selector.state(), &SelectorState::Loaded);
        assert_eq!(selector.make(), None);
        assert_eq!(selector.makes().len(), 2);
    }
}
