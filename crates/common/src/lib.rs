//! Shared value types for the parking coordinator.
//!
//! - [`Plate`] identifies a vehicle across the registry, events and snapshots
//! - [`Money`] carries amounts as integer cents

mod money;
mod types;

pub use money::Money;
pub use types::Plate;
