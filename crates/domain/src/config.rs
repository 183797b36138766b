//! Lot configuration loaded from environment variables.

/// Capacity and alerting thresholds for a [`ParkingLot`](crate::ParkingLot).
///
/// Reads from environment variables:
/// - `PARKING_CAPACITY`: total slots (default: `100`, minimum `1`)
/// - `PARKING_CRITICAL_FREE_PERCENT`: free share below which a
///   capacity-critical event fires (default: `10`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LotConfig {
    pub capacity: usize,
    pub critical_free_percent: f64,
}

impl LotConfig {
    pub const DEFAULT_CAPACITY: usize = 100;
    pub const DEFAULT_CRITICAL_FREE_PERCENT: f64 = 10.0;

    /// Creates a config with the given capacity and the default threshold.
    ///
    /// A capacity of zero is clamped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            critical_free_percent: Self::DEFAULT_CRITICAL_FREE_PERCENT,
        }
    }

    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let capacity = lookup("PARKING_CAPACITY")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(Self::DEFAULT_CAPACITY);
        let critical_free_percent = lookup("PARKING_CRITICAL_FREE_PERCENT")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|p| p.is_finite() && (0.0..=100.0).contains(p))
            .unwrap_or(Self::DEFAULT_CRITICAL_FREE_PERCENT);

        Self {
            critical_free_percent,
            ..Self::with_capacity(capacity)
        }
    }

    /// Returns the occupied share of the lot as a percentage.
    pub fn occupancy_percent(&self, occupied: usize) -> f64 {
        occupied as f64 / self.capacity as f64 * 100.0
    }

    /// Returns true if `free` slots is strictly below the critical share.
    pub fn is_critical(&self, free: usize) -> bool {
        (free as f64 / self.capacity as f64 * 100.0) < self.critical_free_percent
    }
}

impl Default for LotConfig {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}
