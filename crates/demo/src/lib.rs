//! Walkthrough of the parking coordinator.
//!
//! Wires a [`ParkingLot`](domain::ParkingLot) to the sensors and the
//! [`PricingEngine`](pricing::PricingEngine), runs a scripted day and
//! persists the resulting state.

pub mod config;
pub mod error;
pub mod scenario;
