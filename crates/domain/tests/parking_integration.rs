//! Integration tests for the parking lot coordinator.
//!
//! These tests drive the lot through its public API: check-in and check-out
//! sequences, concurrent traffic, persistence round trips and the sensors
//! attached to the bus.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use domain::{
    CameraDirection, CameraSensor, Category, LotConfig, OccupancySensor, ParkingError,
    ParkingEvent, ParkingListener, ParkingLot, Plate, RestoreSummary, SecuritySensor,
    StoredVehicle, Vehicle, VehicleDetails,
};
use parking_lot::Mutex;
use state_store::{InMemoryStateStore, JsonFileStore, LotSnapshot, StateStore};

fn temp_state_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("parking-lot-{}", uuid::Uuid::new_v4()))
        .join("state.json")
}

/// Helper to create a lot backed by an in-memory store
fn create_lot(capacity: usize) -> ParkingLot<InMemoryStateStore> {
    ParkingLot::with_capacity(InMemoryStateStore::new(), capacity)
}

#[derive(Default)]
struct EventLog {
    events: Mutex<Vec<ParkingEvent>>,
}

impl EventLog {
    fn types(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(ParkingEvent::event_type).collect()
    }
}

impl ParkingListener for EventLog {
    fn name(&self) -> &'static str {
        "EventLog"
    }

    fn on_event(&self, event: &ParkingEvent) {
        self.events.lock().push(event.clone());
    }
}

mod traffic {
    use super::*;

    #[test]
    fn single_slot_lot_lifecycle() {
        let lot = create_lot(1);
        let log = Arc::new(EventLog::default());
        lot.subscribe(&log);

        // First vehicle takes the only slot
        lot.check_in(Vehicle::new(Category::Standard, "A1")).unwrap();
        assert_eq!(lot.free_count(), 0);

        // Second vehicle is turned away
        let err = lot.check_in(Vehicle::new(Category::Light, "B2")).unwrap_err();
        assert!(matches!(err, ParkingError::CapacityExhausted { free_count: 0 }));

        // Slot frees up and the second vehicle gets in
        let released = lot.check_out(&Plate::new("A1")).unwrap();
        assert!(released.check_out().unwrap() >= released.check_in().unwrap());
        lot.check_in(Vehicle::new(Category::Light, "B2")).unwrap();

        assert_eq!(lot.occupied_count(), 1);
        assert!(lot.is_parked(&Plate::new("B2")));
        assert_eq!(
            log.types(),
            vec![
                "VehicleCheckedIn",
                "CapacityCritical",
                "CapacityExhausted",
                "VehicleCheckedOut",
                "VehicleCheckedIn",
                "CapacityCritical",
            ]
        );
    }

    #[test]
    fn occupied_count_matches_registry_throughout() {
        let lot = create_lot(5);
        let plates = ["A1", "B2", "C3", "D4", "E5", "F6"];

        for (i, plate) in plates.iter().enumerate() {
            let category = Category::ALL[i % Category::ALL.len()];
            let _ = lot.check_in(Vehicle::new(category, *plate));
            assert_eq!(lot.occupied_count(), lot.snapshot().len());
            assert!(lot.occupied_count() <= lot.capacity());
        }

        for plate in ["B2", "ZZZ", "D4", "B2"] {
            let _ = lot.check_out(&Plate::new(plate));
            assert_eq!(lot.occupied_count(), lot.snapshot().len());
            assert_eq!(lot.occupied_count() + lot.free_count(), lot.capacity());
        }

        assert_eq!(lot.occupied_count(), 3);
    }

    #[test]
    fn check_out_of_unknown_plate_is_not_found() {
        let lot = create_lot(3);
        lot.check_in(Vehicle::new(Category::Heavy, "T1")).unwrap();

        let err = lot.check_out(&Plate::new("NOPE")).unwrap_err();

        assert!(matches!(err, ParkingError::NotFound { .. }));
        assert_eq!(err.to_string(), "Vehicle with plate NOPE not found in the lot");
        assert_eq!(lot.occupied_count(), 1);
    }

    #[test]
    fn blank_plate_never_takes_a_slot() {
        let lot = create_lot(1);

        let err = lot.check_in(Vehicle::new(Category::Standard, " \t ")).unwrap_err();

        assert!(matches!(err, ParkingError::EmptyPlate));
        assert_eq!(lot.free_count(), 1);
        assert!(lot.snapshot().is_empty());
    }

    #[test]
    fn plate_can_return_after_leaving() {
        let lot = create_lot(2);
        let first = lot.check_in(Vehicle::new(Category::Standard, "A1")).unwrap();
        lot.check_out(&Plate::new("A1")).unwrap();

        let second = lot.check_in(Vehicle::new(Category::Standard, "A1")).unwrap();
        assert!(second.check_in().unwrap() >= first.check_in().unwrap());
        assert!(second.check_out().is_none());
    }
}

mod concurrency {
    use super::*;

    #[test]
    fn concurrent_check_ins_never_exceed_capacity() {
        const CAPACITY: usize = 10;
        const ATTEMPTS: usize = 50;

        let lot = create_lot(CAPACITY);
        let log = Arc::new(EventLog::default());
        lot.subscribe(&log);

        let admitted = std::thread::scope(|s| {
            let handles: Vec<_> = (0..ATTEMPTS)
                .map(|i| {
                    let lot = &lot;
                    s.spawn(move || {
                        lot.check_in(Vehicle::new(Category::Light, format!("C{i:03}")))
                            .is_ok()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join())
                .filter(|joined| matches!(joined, Ok(true)))
                .count()
        });

        assert_eq!(admitted, CAPACITY);
        assert_eq!(lot.occupied_count(), CAPACITY);
        assert_eq!(lot.snapshot().len(), CAPACITY);

        let types = log.types();
        let exhausted = types.iter().filter(|t| **t == "CapacityExhausted").count();
        let checked_in = types.iter().filter(|t| **t == "VehicleCheckedIn").count();
        assert_eq!(checked_in, CAPACITY);
        assert_eq!(exhausted, ATTEMPTS - CAPACITY);
    }

    #[test]
    fn checked_in_events_report_increasing_occupancy() {
        let lot = create_lot(20);
        let log = Arc::new(EventLog::default());
        lot.subscribe(&log);

        std::thread::scope(|s| {
            for i in 0..20 {
                let lot = &lot;
                s.spawn(move || {
                    lot.check_in(Vehicle::new(Category::Standard, format!("S{i:02}")))
                        .unwrap();
                });
            }
        });

        let occupied: Vec<usize> = log
            .events
            .lock()
            .iter()
            .filter_map(|e| match e {
                ParkingEvent::VehicleCheckedIn(data) => Some(data.occupied),
                _ => None,
            })
            .collect();
        assert_eq!(occupied, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn concurrent_mixed_traffic_keeps_counts_consistent() {
        let lot = create_lot(8);
        for i in 0..8 {
            lot.check_in(Vehicle::new(Category::Heavy, format!("H{i}"))).unwrap();
        }

        std::thread::scope(|s| {
            for i in 0..8 {
                let lot = &lot;
                s.spawn(move || {
                    lot.check_out(&Plate::new(format!("H{i}"))).unwrap();
                    let _ = lot.check_in(Vehicle::new(Category::Light, format!("L{i}")));
                });
            }
        });

        assert_eq!(lot.occupied_count(), 8);
        assert!(lot.snapshot().values().all(|v| v.category() == Category::Light));
    }
}

mod persistence {
    use super::*;

    #[tokio::test]
    async fn restore_into_fresh_lot_preserves_records() {
        let store = InMemoryStateStore::new();
        let original = ParkingLot::with_capacity(store.clone(), 4);
        let heavy = original
            .check_in(Vehicle::with_details(
                "T1",
                VehicleDetails::Heavy {
                    cargo_capacity_kg: 3500.0,
                },
            ))
            .unwrap();
        let light = original
            .check_in(Vehicle::new(Category::Light, "M1"))
            .unwrap();
        original.save_state().await.unwrap();

        let restarted = ParkingLot::with_capacity(store, 4);
        let summary = restarted.restore_state().await.unwrap();

        assert_eq!(summary, Some(RestoreSummary { restored: 2, skipped: 0 }));
        assert_eq!(restarted.lookup(&Plate::new("T1")), Some(heavy));
        assert_eq!(restarted.lookup(&Plate::new("M1")), Some(light));
        assert_eq!(restarted.free_count(), 2);
    }

    #[tokio::test]
    async fn restore_skips_unusable_records() {
        let parked = StoredVehicle::from(&restored_vehicle(Category::Standard, "GOOD"));
        let mut unknown = parked.clone();
        unknown.plate = Plate::new("ODD");
        unknown.category = "bicycle".to_string();
        let mut not_parked = parked.clone();
        not_parked.plate = Plate::new("GONE");
        not_parked.check_in = None;

        let vehicles = vec![
            serde_json::to_value(&parked).unwrap(),
            serde_json::to_value(&parked).unwrap(),
            serde_json::to_value(&unknown).unwrap(),
            serde_json::to_value(&not_parked).unwrap(),
            serde_json::json!({ "plate": 42 }),
        ];
        let store = InMemoryStateStore::with_snapshot(LotSnapshot::new(5, 10, vehicles));
        let lot = ParkingLot::with_capacity(store, 10);

        let summary = lot.restore_state().await.unwrap().unwrap();

        assert_eq!(summary, RestoreSummary { restored: 1, skipped: 4 });
        assert_eq!(lot.occupied_count(), 1);
        assert!(lot.is_parked(&Plate::new("GOOD")));
    }

    #[tokio::test]
    async fn restored_plates_are_normalized() {
        let check_in = chrono::Utc::now() - chrono::Duration::minutes(45);
        let vehicles = vec![
            serde_json::json!({
                "plate": "ab1",
                "category": "Auto",
                "footprint_m2": 12.0,
                "base_rate": { "cents": 10000 },
                "check_in": check_in,
            }),
            serde_json::json!({
                "plate": "  cd2 ",
                "category": "moto",
                "footprint_m2": 4.0,
                "base_rate": { "cents": 5000 },
                "check_in": check_in,
            }),
            serde_json::json!({
                "plate": "   ",
                "category": "heavy",
                "footprint_m2": 20.0,
                "base_rate": { "cents": 15000 },
                "check_in": check_in,
            }),
        ];
        let store = InMemoryStateStore::with_snapshot(LotSnapshot::new(3, 10, vehicles));
        let lot = ParkingLot::with_capacity(store, 10);

        let summary = lot.restore_state().await.unwrap().unwrap();
        assert_eq!(summary, RestoreSummary { restored: 2, skipped: 1 });
        assert!(lot.is_parked(&Plate::new("AB1")));
        assert!(lot.is_parked(&Plate::new("CD2")));

        // The restored plate keeps its identity: no second admission, and
        // check-out finds it under any spelling.
        let err = lot.check_in(Vehicle::new(Category::Standard, "AB1")).unwrap_err();
        assert!(matches!(err, ParkingError::AlreadyParked { .. }));
        let released = lot.check_out(&Plate::new("ab1")).unwrap();
        assert_eq!(released.check_in(), Some(check_in));
        assert_eq!(lot.occupied_count(), 1);
        assert_eq!(lot.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn json_file_round_trip_preserves_check_in_times() {
        let path = temp_state_path();
        let original = ParkingLot::with_capacity(JsonFileStore::new(&path), 5);
        let parked: Vec<Vehicle> = [
            Vehicle::new(Category::Light, "M1"),
            Vehicle::new(Category::Standard, "A1"),
            Vehicle::new(Category::Heavy, "T1"),
        ]
        .into_iter()
        .map(|v| original.check_in(v).unwrap())
        .collect();
        original.save_state().await.unwrap();

        let restarted = ParkingLot::with_capacity(JsonFileStore::new(&path), 5);
        let summary = restarted.restore_state().await.unwrap();

        assert_eq!(summary, Some(RestoreSummary { restored: 3, skipped: 0 }));
        for vehicle in &parked {
            let restored = restarted.lookup(vehicle.plate()).unwrap();
            assert_eq!(restored.check_in(), vehicle.check_in(), "plate {}", vehicle.plate());
            assert_eq!(
                restored.check_in().unwrap().timestamp(),
                vehicle.check_in().unwrap().timestamp()
            );
            assert!(restored.check_out().is_none());
            assert_eq!(restored.details(), vehicle.details());
        }

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn restore_keeps_configured_capacity() {
        let records: Vec<StoredVehicle> = ["A1", "B2", "C3"]
            .into_iter()
            .map(|p| StoredVehicle::from(&restored_vehicle(Category::Light, p)))
            .collect();
        let snapshot = LotSnapshot::from_records(3, 3, &records).unwrap();
        let lot = ParkingLot::with_capacity(InMemoryStateStore::with_snapshot(snapshot), 2);

        let summary = lot.restore_state().await.unwrap().unwrap();

        assert_eq!(summary, RestoreSummary { restored: 2, skipped: 1 });
        assert_eq!(lot.capacity(), 2);
        assert_eq!(lot.free_count(), 0);
        assert!(lot.check_in(Vehicle::new(Category::Light, "D4")).is_err());
    }

    #[tokio::test]
    async fn saving_empty_lot_writes_empty_snapshot() {
        let store = InMemoryStateStore::new();
        let lot = ParkingLot::with_capacity(store.clone(), 3);

        lot.save_state().await.unwrap();

        assert!(store.exists().await.unwrap());
        let snapshot = store.load().await.unwrap().unwrap();
        assert_eq!(snapshot.vehicle_count(), 0);
        assert_eq!(snapshot.occupied, 0);
    }

    fn restored_vehicle(category: Category, plate: &str) -> Vehicle {
        let check_in = chrono::Utc::now() - chrono::Duration::minutes(30);
        Vehicle::restore(plate, category.default_details(), Some(check_in), None).unwrap()
    }
}

mod sensors {
    use super::*;

    #[test]
    fn sensors_observe_lot_traffic() {
        let lot = ParkingLot::new(
            InMemoryStateStore::new(),
            LotConfig {
                capacity: 2,
                critical_free_percent: 50.0,
            },
        );
        let occupancy = Arc::new(OccupancySensor::new(1));
        let camera = Arc::new(CameraSensor::new("North Gate"));
        let security = Arc::new(SecuritySensor::default());
        lot.subscribe(&occupancy);
        lot.subscribe(&camera);
        lot.subscribe(&security);

        lot.check_in(Vehicle::new(Category::Standard, "A1")).unwrap();
        lot.check_in(Vehicle::new(Category::Heavy, "B2")).unwrap();
        let _ = lot.check_in(Vehicle::new(Category::Light, "C3"));
        lot.check_out(&Plate::new("A1")).unwrap();

        let reading = occupancy.reading();
        assert_eq!(reading.occupied, 1);
        assert_eq!(reading.free, 1);
        assert_eq!(reading.critical_alerts, 1);
        assert!(occupancy.is_low());

        let records = camera.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].direction, CameraDirection::Exit);
        assert_eq!(records[2].plate, Plate::new("A1"));

        assert_eq!(security.monitored(), HashSet::from([Plate::new("B2")]));
        assert_eq!(
            security.alerts(),
            vec!["Access denied to C3: lot is full".to_string()]
        );
    }

    #[test]
    fn dropped_sensor_stops_receiving() {
        let lot = create_lot(3);
        let camera = Arc::new(CameraSensor::default());
        lot.subscribe(&camera);
        lot.check_in(Vehicle::new(Category::Light, "M1")).unwrap();
        drop(camera);

        lot.check_in(Vehicle::new(Category::Light, "M2")).unwrap();

        assert_eq!(lot.bus().listener_count(), 0);
    }

    #[test]
    fn unsubscribed_sensor_misses_later_events() {
        let lot = create_lot(3);
        let camera = Arc::new(CameraSensor::default());
        assert!(lot.subscribe(&camera));
        assert!(!lot.subscribe(&camera));

        lot.check_in(Vehicle::new(Category::Light, "M1")).unwrap();
        assert!(lot.unsubscribe(&camera));
        lot.check_out(&Plate::new("M1")).unwrap();

        assert_eq!(camera.records().len(), 1);
    }
}
