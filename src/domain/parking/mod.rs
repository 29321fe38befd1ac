//! Parking record aggregate
//!
//! Contains the ParkingRecord entity, entry/exit inputs, and the occupancy
//! service interface.

pub mod model;
pub mod repository;

pub use model::{ExitRecord, NewParkingRecord, ParkingRecord};
pub use repository::OccupancyService;
