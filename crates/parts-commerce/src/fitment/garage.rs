//! Saved vehicles.

use crate::fitment::Vehicle;
use crate::ids::VehicleId;
use serde::{Deserialize, Serialize};

/// A vehicle the customer saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedVehicle {
    pub vehicle: Vehicle,
    /// Model year the customer picked.
    pub year: i32,
    /// Unix timestamp when saved.
    pub saved_at: i64,
}

impl SavedVehicle {
    /// e.g. "2017 Honda Civic".
    pub fn label(&self) -> String {
        format!("{} {} {}", self.year, self.vehicle.make, self.vehicle.model)
    }
}

/// The customer's saved vehicles, with at most one active.
///
/// Entries are keyed by catalog row and model year, so one row may be
/// saved once per year it covers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Garage {
    vehicles: Vec<SavedVehicle>,
    active: Option<(VehicleId, i32)>,
}

impl Garage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a vehicle for a model year and make it active.
    ///
    /// Saving the same row and year again refreshes the stored row instead
    /// of adding a duplicate. Returns `true` when a new entry was added.
    pub fn save(&mut self, vehicle: Vehicle, year: i32) -> bool {
        let id = vehicle.id;
        self.active = Some((id, year));

        if let Some(existing) = self
            .vehicles
            .iter_mut()
            .find(|s| s.vehicle.id == id && s.year == year)
        {
            existing.vehicle = vehicle;
            return false;
        }

        self.vehicles.push(SavedVehicle {
            vehicle,
            year,
            saved_at: chrono::Utc::now().timestamp(),
        });
        true
    }

    /// Remove an entry. Removing the active one leaves nothing active.
    pub fn remove(&mut self, id: VehicleId, year: i32) -> bool {
        let len_before = self.vehicles.len();
        self.vehicles
            .retain(|s| !(s.vehicle.id == id && s.year == year));
        if self.active == Some((id, year)) {
            self.active = None;
        }
        self.vehicles.len() < len_before
    }

    /// Make a saved entry active. Unknown entries are rejected.
    pub fn select(&mut self, id: VehicleId, year: i32) -> bool {
        if self.get(id, year).is_some() {
            self.active = Some((id, year));
            true
        } else {
            false
        }
    }

    /// Leave no vehicle active.
    pub fn deselect(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&SavedVehicle> {
        self.active.and_then(|(id, year)| self.get(id, year))
    }

    pub fn get(&self, id: VehicleId, year: i32) -> Option<&SavedVehicle> {
        self.vehicles
            .iter()
            .find(|s| s.vehicle.id == id && s.year == year)
    }

    /// Years saved for a catalog row, in the order they were saved.
    pub fn years_saved(&self, id: VehicleId) -> Vec<i32> {
        self.vehicles
            .iter()
            .filter(|s| s.vehicle.id == id)
            .map(|s| s.year)
            .collect()
    }

    /// Saved vehicles in the order they were first saved.
    pub fn vehicles(&self) -> &[SavedVehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}
