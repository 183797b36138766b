//! Occupancy sensor tracking slot counts and critical alerts.

use parking_lot::Mutex;

use crate::bus::ParkingListener;
use crate::events::ParkingEvent;

/// Last counts observed by an [`OccupancySensor`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OccupancyReading {
    pub occupied: usize,
    pub free: usize,
    /// Number of capacity-critical events received.
    pub critical_alerts: u64,
    /// Occupancy percentage carried by the last critical event.
    pub last_critical_percent: Option<f64>,
}

/// Monitors slot occupancy.
///
/// Besides the lot-wide critical events, the sensor has its own threshold
/// in slots: a check-in leaving that many free slots or fewer is logged as
/// a local warning.
#[derive(Debug)]
pub struct OccupancySensor {
    critical_threshold: usize,
    reading: Mutex<OccupancyReading>,
}

impl OccupancySensor {
    pub const DEFAULT_THRESHOLD: usize = 10;

    pub fn new(critical_threshold: usize) -> Self {
        Self {
            critical_threshold,
            reading: Mutex::new(OccupancyReading::default()),
        }
    }

    /// Returns a copy of the latest reading.
    pub fn reading(&self) -> OccupancyReading {
        *self.reading.lock()
    }

    /// Returns true if the last observed free count is within the threshold.
    pub fn is_low(&self) -> bool {
        let reading = self.reading.lock();
        reading.occupied > 0 && reading.free <= self.critical_threshold
    }
}

impl Default for OccupancySensor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl ParkingListener for OccupancySensor {
    fn name(&self) -> &'static str {
        "OccupancySensor"
    }

    fn on_event(&self, event: &ParkingEvent) {
        let mut reading = self.reading.lock();
        match event {
            ParkingEvent::VehicleCheckedIn(data) => {
                reading.occupied = data.occupied;
                reading.free = data.free;
                tracing::info!(
                    plate = %data.vehicle.plate(),
                    occupied = data.occupied,
                    free = data.free,
                    "occupancy: vehicle entered"
                );
                if data.free <= self.critical_threshold {
                    tracing::warn!(free = data.free, "occupancy: few slots left");
                }
            }
            ParkingEvent::VehicleCheckedOut(data) => {
                reading.occupied = data.occupied;
                reading.free = data.free;
                tracing::info!(
                    plate = %data.vehicle.plate(),
                    stay_secs = data.stay.num_seconds(),
                    free = data.free,
                    "occupancy: vehicle left"
                );
            }
            ParkingEvent::CapacityCritical(data) => {
                reading.critical_alerts += 1;
                reading.last_critical_percent = Some(data.occupancy_percent);
                tracing::warn!(
                    free = data.free,
                    occupancy_percent = data.occupancy_percent,
                    "occupancy: capacity critical"
                );
            }
            ParkingEvent::CapacityExhausted(_) => {}
        }
    }
}
