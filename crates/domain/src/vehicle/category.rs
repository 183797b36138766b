//! Vehicle categories and their static attribute table.

use std::str::FromStr;

use common::Money;
use serde::{Deserialize, Serialize};

use super::VehicleError;

/// Closed set of vehicle categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Motorcycles.
    Light,
    /// Cars.
    Standard,
    /// Vans and pickups.
    Heavy,
}

/// Fixed attributes shared by every vehicle of a category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryProfile {
    /// Area occupied, in square meters.
    pub footprint_m2: f64,

    /// Hourly rate.
    pub base_rate: Money,

    /// Minutes of each stay that are not billed.
    pub grace_minutes: u32,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Light, Category::Standard, Category::Heavy];

    /// Returns the attribute table entry for this category.
    pub const fn profile(self) -> CategoryProfile {
        match self {
            Category::Light => CategoryProfile {
                footprint_m2: 4.0,
                base_rate: Money::from_units(50),
                grace_minutes: 10,
            },
            Category::Standard => CategoryProfile {
                footprint_m2: 12.0,
                base_rate: Money::from_units(100),
                grace_minutes: 15,
            },
            Category::Heavy => CategoryProfile {
                footprint_m2: 20.0,
                base_rate: Money::from_units(150),
                grace_minutes: 15,
            },
        }
    }

    /// Returns the lowercase category name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Light => "light",
            Category::Standard => "standard",
            Category::Heavy => "heavy",
        }
    }

    /// Returns the payload a freshly built vehicle of this category carries.
    pub fn default_details(self) -> VehicleDetails {
        match self {
            Category::Light => VehicleDetails::Light {
                displacement_cc: 150,
            },
            Category::Standard => VehicleDetails::Standard {
                make: "Unspecified".to_string(),
            },
            Category::Heavy => VehicleDetails::Heavy {
                cargo_capacity_kg: 1000.0,
            },
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = VehicleError;

    /// Accepts the category names and the legacy vehicle type names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" | "moto" => Ok(Category::Light),
            "standard" | "auto" => Ok(Category::Standard),
            "heavy" | "camioneta" => Ok(Category::Heavy),
            _ => Err(VehicleError::UnknownCategory(s.to_string())),
        }
    }
}

/// Category-specific payload of a vehicle.
#[derive(Debug, Clone, PartialEq)]
pub enum VehicleDetails {
    Light { displacement_cc: u32 },
    Standard { make: String },
    Heavy { cargo_capacity_kg: f64 },
}

impl VehicleDetails {
    /// Returns the category this payload belongs to.
    pub fn category(&self) -> Category {
        match self {
            VehicleDetails::Light { .. } => Category::Light,
            VehicleDetails::Standard { .. } => Category::Standard,
            VehicleDetails::Heavy { .. } => Category::Heavy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_profile_matches_tariff() {
        let profile = Category::Standard.profile();
        assert_eq!(profile.base_rate, Money::from_units(100));
        assert_eq!(profile.grace_minutes, 15);
        assert_eq!(profile.footprint_m2, 12.0);
    }

    #[test]
    fn parse_accepts_names_and_legacy_names() {
        assert_eq!("light".parse::<Category>().unwrap(), Category::Light);
        assert_eq!("Auto".parse::<Category>().unwrap(), Category::Standard);
        assert_eq!(" CAMIONETA ".parse::<Category>().unwrap(), Category::Heavy);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "bicycle".parse::<Category>().unwrap_err();
        assert!(matches!(err, VehicleError::UnknownCategory(ref s) if s == "bicycle"));
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn default_details_match_category() {
        for category in Category::ALL {
            assert_eq!(category.default_details().category(), category);
        }
    }
}
