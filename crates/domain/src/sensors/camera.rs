//! Plate-reading camera. Logs every entry and exit.

use chrono::{DateTime, Utc};
use common::Plate;
use parking_lot::Mutex;

use crate::bus::ParkingListener;
use crate::events::ParkingEvent;
use crate::vehicle::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraDirection {
    Entry,
    Exit,
}

/// One plate capture.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRecord {
    pub direction: CameraDirection,
    pub plate: Plate,
    pub category: Category,
    pub at: DateTime<Utc>,
}

/// Captures the plate of every vehicle passing the gate.
#[derive(Debug)]
pub struct CameraSensor {
    location: String,
    records: Mutex<Vec<CameraRecord>>,
}

impl CameraSensor {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns a copy of all captures, oldest first.
    pub fn records(&self) -> Vec<CameraRecord> {
        self.records.lock().clone()
    }

    /// Returns the captures for one plate.
    pub fn records_for(&self, plate: &Plate) -> Vec<CameraRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| &r.plate == plate)
            .cloned()
            .collect()
    }

    fn capture(
        &self,
        direction: CameraDirection,
        plate: &Plate,
        category: Category,
        at: DateTime<Utc>,
    ) {
        tracing::info!(
            camera = %self.location,
            %plate,
            %category,
            ?direction,
            "camera: plate detected"
        );
        self.records.lock().push(CameraRecord {
            direction,
            plate: plate.clone(),
            category,
            at,
        });
    }
}

impl Default for CameraSensor {
    fn default() -> Self {
        Self::new("Main")
    }
}

impl ParkingListener for CameraSensor {
    fn name(&self) -> &'static str {
        "CameraSensor"
    }

    fn on_event(&self, event: &ParkingEvent) {
        match event {
            ParkingEvent::VehicleCheckedIn(data) => self.capture(
                CameraDirection::Entry,
                data.vehicle.plate(),
                data.vehicle.category(),
                data.occurred_at,
            ),
            ParkingEvent::VehicleCheckedOut(data) => self.capture(
                CameraDirection::Exit,
                data.vehicle.plate(),
                data.vehicle.category(),
                data.occurred_at,
            ),
            ParkingEvent::CapacityExhausted(_) | ParkingEvent::CapacityCritical(_) => {}
        }
    }
}
