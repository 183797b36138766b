//! Demo error types.

use domain::ParkingError;
use pricing::PricingError;
use thiserror::Error;

/// Failures that abort the walkthrough.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Parking(#[from] ParkingError),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

pub type Result<T> = std::result::Result<T, DemoError>;
