//! Stay pricing for the parking coordinator.
//!
//! A [`PricingStrategy`] turns a vehicle and its check-in/check-out pair into
//! an amount. [`StandardPricing`] bills the stay past the category grace
//! period at the category hourly rate; [`AdjustedPricing`] applies a fixed
//! factor on top of it. The [`PricingEngine`] holds the active strategy and
//! lets it be swapped at runtime.

pub mod engine;
pub mod error;
pub mod strategy;

pub use engine::PricingEngine;
pub use error::{PricingError, Result};
pub use strategy::{AdjustedPricing, PricingStrategy, StandardPricing, builtin_strategies};
