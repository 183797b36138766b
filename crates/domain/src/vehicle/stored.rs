//! Persisted form of a vehicle record.

use chrono::{DateTime, Utc};
use common::{Money, Plate};
use serde::{Deserialize, Serialize};

use super::{Category, Vehicle, VehicleDetails, VehicleError};

/// Vehicle record as written to a lot snapshot.
///
/// Footprint and base rate are written for readers of the document; on
/// restore they are ignored in favour of the category table. The category
/// is kept as free text so an unknown value rejects only its own record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredVehicle {
    pub plate: Plate,
    pub category: String,
    pub footprint_m2: f64,
    pub base_rate: Money,
    #[serde(default)]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displacement_cc: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_capacity_kg: Option<f64>,
}

impl From<&Vehicle> for StoredVehicle {
    fn from(vehicle: &Vehicle) -> Self {
        let mut stored = StoredVehicle {
            plate: vehicle.plate().clone(),
            category: vehicle.category().to_string(),
            footprint_m2: vehicle.footprint_m2(),
            base_rate: vehicle.base_rate(),
            check_in: vehicle.check_in(),
            check_out: vehicle.check_out(),
            displacement_cc: None,
            make: None,
            cargo_capacity_kg: None,
        };

        match vehicle.details() {
            VehicleDetails::Light { displacement_cc } => {
                stored.displacement_cc = Some(*displacement_cc);
            }
            VehicleDetails::Standard { make } => stored.make = Some(make.clone()),
            VehicleDetails::Heavy { cargo_capacity_kg } => {
                stored.cargo_capacity_kg = Some(*cargo_capacity_kg);
            }
        }

        stored
    }
}

impl TryFrom<StoredVehicle> for Vehicle {
    type Error = VehicleError;

    fn try_from(stored: StoredVehicle) -> Result<Self, Self::Error> {
        let category: Category = stored.category.parse()?;

        // Missing payload fields fall back to the category defaults.
        let details = match category.default_details() {
            VehicleDetails::Light { displacement_cc } => VehicleDetails::Light {
                displacement_cc: stored.displacement_cc.unwrap_or(displacement_cc),
            },
            VehicleDetails::Standard { make } => VehicleDetails::Standard {
                make: stored.make.clone().unwrap_or(make),
            },
            VehicleDetails::Heavy { cargo_capacity_kg } => VehicleDetails::Heavy {
                cargo_capacity_kg: stored.cargo_capacity_kg.unwrap_or(cargo_capacity_kg),
            },
        };

        Vehicle::restore(stored.plate, details, stored.check_in, stored.check_out)
    }
}
