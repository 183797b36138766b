//! Parking lot events.

use chrono::{DateTime, Duration, Utc};
use common::Plate;

use crate::vehicle::Vehicle;

/// State transitions published by the parking lot.
///
/// Events are created at the instant of the mutation that triggers them,
/// delivered synchronously to every listener and then dropped. They are
/// never persisted or replayed.
#[derive(Debug, Clone, PartialEq)]
pub enum ParkingEvent {
    /// A vehicle took a slot.
    VehicleCheckedIn(CheckedInData),

    /// A vehicle released its slot.
    VehicleCheckedOut(CheckedOutData),

    /// A check-in was rejected because the lot is full.
    CapacityExhausted(CapacityExhaustedData),

    /// The free share of the lot dropped below the critical threshold.
    CapacityCritical(CapacityCriticalData),
}

/// Data for VehicleCheckedIn event.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedInData {
    /// The record as stored in the registry.
    pub vehicle: Vehicle,

    /// Occupied slots after the check-in.
    pub occupied: usize,

    /// Free slots after the check-in.
    pub free: usize,

    pub occurred_at: DateTime<Utc>,
}

/// Data for VehicleCheckedOut event.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedOutData {
    /// The closed record.
    pub vehicle: Vehicle,

    /// Occupied slots after the check-out.
    pub occupied: usize,

    /// Free slots after the check-out.
    pub free: usize,

    /// Time between check-in and check-out.
    pub stay: Duration,

    pub occurred_at: DateTime<Utc>,
}

/// Data for CapacityExhausted event.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityExhaustedData {
    /// Plate of the vehicle that was turned away.
    pub rejected_plate: Plate,

    pub occurred_at: DateTime<Utc>,
}

/// Data for CapacityCritical event.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityCriticalData {
    /// Free slots after the triggering check-in.
    pub free: usize,

    /// Occupied share of the lot, 0 to 100.
    pub occupancy_percent: f64,

    pub occurred_at: DateTime<Utc>,
}

impl ParkingEvent {
    pub fn checked_in(vehicle: Vehicle, occupied: usize, free: usize) -> Self {
        ParkingEvent::VehicleCheckedIn(CheckedInData {
            vehicle,
            occupied,
            free,
            occurred_at: Utc::now(),
        })
    }

    pub fn checked_out(vehicle: Vehicle, occupied: usize, free: usize, stay: Duration) -> Self {
        ParkingEvent::VehicleCheckedOut(CheckedOutData {
            vehicle,
            occupied,
            free,
            stay,
            occurred_at: Utc::now(),
        })
    }

    pub fn capacity_exhausted(rejected_plate: Plate) -> Self {
        ParkingEvent::CapacityExhausted(CapacityExhaustedData {
            rejected_plate,
            occurred_at: Utc::now(),
        })
    }

    pub fn capacity_critical(free: usize, occupancy_percent: f64) -> Self {
        ParkingEvent::CapacityCritical(CapacityCriticalData {
            free,
            occupancy_percent,
            occurred_at: Utc::now(),
        })
    }

    /// Returns the event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            ParkingEvent::VehicleCheckedIn(_) => "VehicleCheckedIn",
            ParkingEvent::VehicleCheckedOut(_) => "VehicleCheckedOut",
            ParkingEvent::CapacityExhausted(_) => "CapacityExhausted",
            ParkingEvent::CapacityCritical(_) => "CapacityCritical",
        }
    }

    /// Returns when the event was created.
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ParkingEvent::VehicleCheckedIn(data) => data.occurred_at,
            ParkingEvent::VehicleCheckedOut(data) => data.occurred_at,
            ParkingEvent::CapacityExhausted(data) => data.occurred_at,
            ParkingEvent::CapacityCritical(data) => data.occurred_at,
        }
    }

    /// Returns the plate the event concerns, if any.
    pub fn plate(&self) -> Option<&Plate> {
        match self {
            ParkingEvent::VehicleCheckedIn(data) => Some(data.vehicle.plate()),
            ParkingEvent::VehicleCheckedOut(data) => Some(data.vehicle.plate()),
            ParkingEvent::CapacityExhausted(data) => Some(&data.rejected_plate),
            ParkingEvent::CapacityCritical(_) => None,
        }
    }

    /// Returns a one-line human-readable description.
    pub fn message(&self) -> String {
        match self {
            ParkingEvent::VehicleCheckedIn(data) => {
                format!("Vehicle {} checked in", data.vehicle.plate())
            }
            ParkingEvent::VehicleCheckedOut(data) => {
                format!(
                    "Vehicle {} checked out after {}s",
                    data.vehicle.plate(),
                    data.stay.num_seconds()
                )
            }
            ParkingEvent::CapacityExhausted(data) => {
                format!("Access denied to {}: lot is full", data.rejected_plate)
            }
            ParkingEvent::CapacityCritical(data) => format!(
                "Capacity critical: {} slots free ({:.1}% occupied)",
                data.free, data.occupancy_percent
            ),
        }
    }
}
