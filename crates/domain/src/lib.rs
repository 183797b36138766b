//! Domain layer for the parking coordinator.
//!
//! This crate provides:
//! - [`Vehicle`] records and the static per-[`Category`] attribute table
//! - [`ParkingEvent`] payloads and the synchronous [`EventBus`]
//! - Occupancy, camera and security [`sensors`] listening on the bus
//! - The [`ParkingLot`] coordinator enforcing capacity and identity invariants

pub mod bus;
pub mod config;
pub mod error;
pub mod events;
pub mod lot;
pub mod sensors;
pub mod vehicle;

pub use bus::{EventBus, ParkingListener};
pub use common::{Money, Plate};
pub use config::LotConfig;
pub use error::{ParkingError, Result};
pub use events::{
    CapacityCriticalData, CapacityExhaustedData, CheckedInData, CheckedOutData, ParkingEvent,
};
pub use lot::{ParkingLot, RestoreSummary};
pub use sensors::{
    CameraDirection, CameraRecord, CameraSensor, OccupancyReading, OccupancySensor, SecuritySensor,
};
pub use vehicle::{Category, CategoryProfile, StoredVehicle, Vehicle, VehicleDetails, VehicleError};
