//! Security sensor: matches exits against entries and reports denials.

use std::collections::HashSet;

use common::Plate;
use parking_lot::Mutex;

use crate::bus::ParkingListener;
use crate::events::ParkingEvent;

#[derive(Debug, Default)]
struct SecurityState {
    monitored: HashSet<Plate>,
    alerts: Vec<String>,
}

/// Keeps the set of vehicles inside and raises alerts on anomalies.
///
/// An exit by a plate the sensor never saw enter, and a vehicle turned
/// away at a full lot, both produce an alert.
#[derive(Debug, Default)]
pub struct SecuritySensor {
    state: Mutex<SecurityState>,
}

impl SecuritySensor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the alerts raised so far.
    pub fn alerts(&self) -> Vec<String> {
        self.state.lock().alerts.clone()
    }

    /// Returns a copy of the plates currently believed to be inside.
    pub fn monitored(&self) -> HashSet<Plate> {
        self.state.lock().monitored.clone()
    }
}

impl ParkingListener for SecuritySensor {
    fn name(&self) -> &'static str {
        "SecuritySensor"
    }

    fn on_event(&self, event: &ParkingEvent) {
        let mut state = self.state.lock();
        match event {
            ParkingEvent::VehicleCheckedIn(data) => {
                let plate = data.vehicle.plate();
                state.monitored.insert(plate.clone());
                tracing::info!(%plate, monitored = state.monitored.len(), "security: vehicle registered");
            }
            ParkingEvent::VehicleCheckedOut(data) => {
                let plate = data.vehicle.plate();
                if state.monitored.remove(plate) {
                    tracing::info!(%plate, monitored = state.monitored.len(), "security: exit authorized");
                } else {
                    let alert = format!("Vehicle {plate} leaving without a recorded entry");
                    tracing::warn!(%plate, "security: {alert}");
                    state.alerts.push(alert);
                }
            }
            ParkingEvent::CapacityExhausted(data) => {
                let alert = format!("Access denied to {}: lot is full", data.rejected_plate);
                tracing::warn!(plate = %data.rejected_plate, "security: access denied");
                state.alerts.push(alert);
            }
            ParkingEvent::CapacityCritical(_) => {}
        }
    }
}
