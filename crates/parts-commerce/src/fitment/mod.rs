//! Vehicle fitment module.
//!
//! Contains the vehicle compatibility catalog, the cascading
//! make/model/year selector, and the customer's garage of saved vehicles.

mod catalog;
mod garage;
mod selector;
mod vehicle;

pub use catalog::VehicleCatalog;
pub use garage::{Garage, SavedVehicle};
pub use selector::{FitmentSelector, SelectorState};
pub use vehicle::{Vehicle, EARLIEST_MODEL_YEAR, MODEL_YEAR_LEAD};
