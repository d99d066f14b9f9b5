//! Saved vehicles, persisted after every change.

use crate::{KvStore, Persisted, StoreError};
use parts_commerce::fitment::{Garage, SavedVehicle, Vehicle};
use parts_commerce::VehicleId;
use std::sync::Arc;

const GARAGE_KEY: &str = "garage";

pub struct GarageStore {
    state: Persisted<Garage>,
}

impl GarageStore {
    pub fn open(store: Arc<dyn KvStore>) -> Result<Self, StoreError> {
        Ok(Self {
            state: Persisted::hydrate(store, GARAGE_KEY)?,
        })
    }

    pub fn garage(&self) -> &Garage {
        self.state.get()
    }

    pub fn active(&self) -> Option<&SavedVehicle> {
        self.garage().active()
    }

    pub fn list(&self) -> &[SavedVehicle] {
        self.garage().vehicles()
    }

    /// Save a vehicle and make it active.
    pub fn save(&mut self, vehicle: Vehicle, year: i32) -> Result<bool, StoreError> {
        let id = vehicle.id;
        let added = self.state.update(|garage| garage.save(vehicle, year))?;
        tracing::debug!(vehicle_id = %id, added, "Saved vehicle to garage");
        Ok(added)
    }

    pub fn remove(&mut self, id: VehicleId, year: i32) -> Result<bool, StoreError> {
        if self.garage().get(id, year).is_none() {
            return Ok(false);
        }
        self.state.update(|garage| garage.remove(id, year))
    }

    /// Make a saved entry active. Unknown entries return `false`.
    pub fn select(&mut self, id: VehicleId, year: i32) -> Result<bool, StoreError> {
        if self.garage().get(id, year).is_none() {
            return Ok(false);
        }
        self.state.update(|garage| garage.select(id, year))
    }

    pub fn deselect(&mut self) -> Result<(), StoreError> {
        self.state.update(Garage::deselect)
    }
}
