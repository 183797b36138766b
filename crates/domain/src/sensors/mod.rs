//! Sensors observing the parking lot through the event bus.
//!
//! Each sensor keeps a small in-memory view of what it has seen and offers
//! query methods returning copies of that view.

mod camera;
mod occupancy;
mod security;

pub use camera::{CameraDirection, CameraRecord, CameraSensor};
pub use occupancy::{OccupancyReading, OccupancySensor};
pub use security::SecuritySensor;
