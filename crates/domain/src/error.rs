//! Coordinator error types.

use common::Plate;
use state_store::StateStoreError;
use thiserror::Error;

/// Errors returned by [`ParkingLot`](crate::ParkingLot) operations.
///
/// Capacity exhaustion and unknown plates are expected outcomes of normal
/// traffic; callers decide whether to retry or reject upward.
#[derive(Debug, Error)]
pub enum ParkingError {
    /// The lot is full.
    #[error("No slots available (free: {free_count})")]
    CapacityExhausted { free_count: usize },

    /// The plate has no active occupancy.
    #[error("Vehicle with plate {plate} not found in the lot")]
    NotFound { plate: Plate },

    /// The plate is already checked in.
    #[error("Vehicle with plate {plate} is already parked")]
    AlreadyParked { plate: Plate },

    /// The plate is empty after normalization.
    #[error("Vehicle plate must not be empty")]
    EmptyPlate,

    /// Saving or loading a snapshot failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] StateStoreError),
}

/// Result type for coordinator operations.
pub type Result<T> = std::result::Result<T, ParkingError>;
