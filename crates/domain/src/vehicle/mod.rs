//! Vehicle records.

mod category;
mod stored;

pub use category::{Category, CategoryProfile, VehicleDetails};
pub use stored::StoredVehicle;

use chrono::{DateTime, Duration, Utc};
use common::{Money, Plate};
use thiserror::Error;

/// Errors that can occur while building or rebuilding a vehicle record.
#[derive(Debug, Error)]
pub enum VehicleError {
    /// The category name is not one of the known categories.
    #[error("Unknown vehicle category: {0}")]
    UnknownCategory(String),

    /// Check-out without check-in, or check-out before check-in.
    #[error("Inconsistent timestamps for vehicle {plate}")]
    InvalidTimestamps { plate: Plate },

    /// A stored record could not be decoded.
    #[error("Malformed vehicle record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Occupancy record for one vehicle.
///
/// Identity and category never change after construction. The timestamps
/// are assigned by the parking lot during check-in and check-out; a record
/// has a check-out time only if it has a check-in time, and never an
/// earlier one.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    plate: Plate,
    details: VehicleDetails,
    check_in: Option<DateTime<Utc>>,
    check_out: Option<DateTime<Utc>>,
}

impl Vehicle {
    /// Creates a vehicle of the given category with its default payload.
    pub fn new(category: Category, plate: impl Into<Plate>) -> Self {
        Self::with_details(plate, category.default_details())
    }

    /// Creates a vehicle with an explicit category payload.
    pub fn with_details(plate: impl Into<Plate>, details: VehicleDetails) -> Self {
        Self {
            plate: plate.into(),
            details,
            check_in: None,
            check_out: None,
        }
    }

    /// Rebuilds a record from persisted parts, validating the timestamps.
    pub fn restore(
        plate: impl Into<Plate>,
        details: VehicleDetails,
        check_in: Option<DateTime<Utc>>,
        check_out: Option<DateTime<Utc>>,
    ) -> Result<Self, VehicleError> {
        let plate = plate.into();
        match (check_in, check_out) {
            (None, Some(_)) => return Err(VehicleError::InvalidTimestamps { plate }),
            (Some(start), Some(end)) if end < start => {
                return Err(VehicleError::InvalidTimestamps { plate });
            }
            _ => {}
        }

        Ok(Self {
            plate,
            details,
            check_in,
            check_out,
        })
    }

    pub fn plate(&self) -> &Plate {
        &self.plate
    }

    pub fn category(&self) -> Category {
        self.details.category()
    }

    pub fn details(&self) -> &VehicleDetails {
        &self.details
    }

    pub fn footprint_m2(&self) -> f64 {
        self.category().profile().footprint_m2
    }

    pub fn base_rate(&self) -> Money {
        self.category().profile().base_rate
    }

    pub fn grace_minutes(&self) -> u32 {
        self.category().profile().grace_minutes
    }

    pub fn check_in(&self) -> Option<DateTime<Utc>> {
        self.check_in
    }

    pub fn check_out(&self) -> Option<DateTime<Utc>> {
        self.check_out
    }

    /// Returns true if checked in and not yet checked out.
    pub fn is_parked(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_none()
    }

    /// Returns the closed stay duration, if both timestamps are set.
    pub fn stay(&self) -> Option<Duration> {
        Some(self.check_out? - self.check_in?)
    }

    /// Starts a new occupancy period.
    pub(crate) fn stamp_check_in(&mut self, at: DateTime<Utc>) {
        self.check_in = Some(at);
        self.check_out = None;
    }

    /// Closes the occupancy period and returns its duration.
    ///
    /// The check-out time is clamped to the check-in time, so a clock that
    /// stepped backwards yields a zero-length stay.
    pub(crate) fn stamp_check_out(&mut self, at: DateTime<Utc>) -> Duration {
        let start = *self.check_in.get_or_insert(at);
        let end = at.max(start);
        self.check_out = Some(end);
        end - start
    }
}
