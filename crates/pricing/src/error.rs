//! Pricing error types.

use chrono::{DateTime, Utc};
use common::Plate;
use thiserror::Error;

/// Errors that can occur when pricing a stay.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// The check-out precedes the check-in.
    #[error("Check-out {check_out} is earlier than check-in {check_in}")]
    InvalidInterval {
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    },

    /// The vehicle record lacks a check-in or check-out time.
    #[error("Vehicle {plate} has no completed stay to price")]
    IncompleteStay { plate: Plate },
}

/// Result type for pricing operations.
pub type Result<T> = std::result::Result<T, PricingError>;
