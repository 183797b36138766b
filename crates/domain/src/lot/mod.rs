//! Parking lot coordinator.
//!
//! [`ParkingLot`] owns the active registry, the event bus and a state store.
//! Every mutation runs inside one critical section together with the event
//! publication it triggers, so listeners observe events in the same order
//! the mutations happened.

mod state;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use common::Plate;
use parking_lot::Mutex;
use state_store::{LotSnapshot, StateStore, StateStoreError};

use crate::bus::{EventBus, ParkingListener};
use crate::config::LotConfig;
use crate::error::{ParkingError, Result};
use crate::events::ParkingEvent;
use crate::vehicle::{StoredVehicle, Vehicle, VehicleError};

use state::Registry;

/// Outcome of [`ParkingLot::restore_state`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    /// Vehicles placed back into the registry.
    pub restored: usize,
    /// Records that were rejected and logged.
    pub skipped: usize,
}

/// Coordinates slot allocation for a single lot.
///
/// Share it behind an [`Arc`]; all operations take `&self`.
pub struct ParkingLot<S: StateStore> {
    config: LotConfig,
    registry: Mutex<Registry>,
    bus: EventBus,
    store: S,
}

impl<S: StateStore> ParkingLot<S> {
    /// Creates an empty lot backed by the given store.
    pub fn new(store: S, config: LotConfig) -> Self {
        tracing::info!(capacity = config.capacity, "parking lot initialized");
        metrics::gauge!("parking_occupied_slots").set(0.0);

        Self {
            config,
            registry: Mutex::new(Registry::default()),
            bus: EventBus::new(),
            store,
        }
    }

    /// Creates an empty lot with the given capacity and default thresholds.
    pub fn with_capacity(store: S, capacity: usize) -> Self {
        Self::new(store, LotConfig::with_capacity(capacity))
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Registers a listener on the lot's bus.
    pub fn subscribe<L: ParkingListener + 'static>(&self, listener: &Arc<L>) -> bool {
        self.bus.subscribe(listener)
    }

    /// Removes a listener from the lot's bus.
    pub fn unsubscribe<L: ParkingListener + 'static>(&self, listener: &Arc<L>) -> bool {
        self.bus.unsubscribe(listener)
    }

    /// Admits a vehicle and stamps its check-in time.
    ///
    /// A plate that is empty after normalization is rejected with
    /// [`ParkingError::EmptyPlate`] before the lot is consulted.
    /// A full lot publishes [`ParkingEvent::CapacityExhausted`] before
    /// returning [`ParkingError::CapacityExhausted`]. A plate that is already
    /// parked is rejected with [`ParkingError::AlreadyParked`] and publishes
    /// nothing. On success the stamped vehicle is returned and
    /// [`ParkingEvent::VehicleCheckedIn`] is published, followed by
    /// [`ParkingEvent::CapacityCritical`] when the free share drops under the
    /// configured threshold.
    #[tracing::instrument(skip(self, vehicle), fields(plate = %vehicle.plate()))]
    pub fn check_in(&self, mut vehicle: Vehicle) -> Result<Vehicle> {
        if vehicle.plate().is_empty() {
            tracing::warn!("check-in rejected: empty plate");
            metrics::counter!("parking_rejections_total", "reason" => "empty_plate").increment(1);
            return Err(ParkingError::EmptyPlate);
        }

        let capacity = self.config.capacity;
        let mut registry = self.registry.lock();

        if registry.occupied() >= capacity {
            let free_count = registry.free(capacity);
            tracing::warn!(
                occupied = registry.occupied(),
                capacity,
                "check-in rejected: lot is full"
            );
            metrics::counter!("parking_rejections_total", "reason" => "capacity").increment(1);
            self.bus
                .publish(&ParkingEvent::capacity_exhausted(vehicle.plate().clone()));
            return Err(ParkingError::CapacityExhausted { free_count });
        }

        if registry.contains(vehicle.plate()) {
            tracing::warn!("check-in rejected: plate already parked");
            metrics::counter!("parking_rejections_total", "reason" => "duplicate").increment(1);
            return Err(ParkingError::AlreadyParked {
                plate: vehicle.plate().clone(),
            });
        }

        vehicle.stamp_check_in(Utc::now());
        registry.insert(vehicle.clone());

        let occupied = registry.occupied();
        let free = registry.free(capacity);

        tracing::info!(
            category = %vehicle.category(),
            occupied,
            capacity,
            "vehicle checked in"
        );
        metrics::counter!("parking_check_ins_total").increment(1);
        metrics::gauge!("parking_occupied_slots").set(occupied as f64);

        self.bus
            .publish(&ParkingEvent::checked_in(vehicle.clone(), occupied, free));

        if self.config.is_critical(free) {
            let occupancy_percent = self.config.occupancy_percent(occupied);
            tracing::warn!(free, occupancy_percent, "lot capacity critical");
            self.bus
                .publish(&ParkingEvent::capacity_critical(free, occupancy_percent));
        }

        Ok(vehicle)
    }

    /// Releases the slot held by `plate` and stamps the check-out time.
    ///
    /// Returns the released vehicle with both timestamps set. An unknown
    /// plate leaves the lot untouched and returns
    /// [`ParkingError::NotFound`].
    #[tracing::instrument(skip(self, plate), fields(plate = %plate))]
    pub fn check_out(&self, plate: &Plate) -> Result<Vehicle> {
        let capacity = self.config.capacity;
        let mut registry = self.registry.lock();

        let Some(mut vehicle) = registry.remove(plate) else {
            tracing::error!("check-out failed: vehicle not found");
            metrics::counter!("parking_rejections_total", "reason" => "not_found").increment(1);
            return Err(ParkingError::NotFound {
                plate: plate.clone(),
            });
        };

        let stay = vehicle.stamp_check_out(Utc::now());
        let occupied = registry.occupied();
        let free = registry.free(capacity);

        tracing::info!(
            category = %vehicle.category(),
            stay_secs = stay.num_seconds(),
            occupied,
            capacity,
            "vehicle checked out"
        );
        metrics::counter!("parking_check_outs_total").increment(1);
        metrics::gauge!("parking_occupied_slots").set(occupied as f64);

        self.bus.publish(&ParkingEvent::checked_out(
            vehicle.clone(),
            occupied,
            free,
            stay,
        ));

        Ok(vehicle)
    }

    pub fn occupied_count(&self) -> usize {
        self.registry.lock().occupied()
    }

    pub fn free_count(&self) -> usize {
        self.registry.lock().free(self.config.capacity)
    }

    pub fn is_parked(&self, plate: &Plate) -> bool {
        self.registry.lock().contains(plate)
    }

    /// Returns a copy of the active record for `plate`.
    pub fn lookup(&self, plate: &Plate) -> Option<Vehicle> {
        self.registry.lock().get(plate).cloned()
    }

    /// Returns a detached copy of the active registry.
    pub fn snapshot(&self) -> HashMap<Plate, Vehicle> {
        self.registry.lock().to_map()
    }

    /// Empties the registry without publishing events.
    #[tracing::instrument(skip(self))]
    pub fn reset(&self) {
        self.registry.lock().clear();
        metrics::gauge!("parking_occupied_slots").set(0.0);
        tracing::info!("parking lot reset");
    }

    /// Writes the current state to the store.
    ///
    /// The registry lock is released before the store is awaited; the saved
    /// document reflects the state at the moment it was copied.
    #[tracing::instrument(skip(self))]
    pub async fn save_state(&self) -> Result<()> {
        let snapshot = self.take_snapshot()?;

        if let Err(e) = self.store.save(&snapshot).await {
            tracing::error!(error = %e, "failed to save lot state");
            return Err(e.into());
        }

        tracing::info!(
            vehicles = snapshot.vehicle_count(),
            occupied = snapshot.occupied,
            "lot state saved"
        );
        Ok(())
    }

    /// Replaces the registry with the state held by the store.
    ///
    /// Returns `Ok(None)` when the store has nothing saved, in which case the
    /// registry is left as it is. Records that cannot be restored are logged
    /// and skipped: malformed or unknown-category records, empty plates,
    /// records that are not checked in, duplicate plates, and anything past
    /// the configured capacity. Stored plates are normalized on the way in. The configured capacity always wins over the stored one.
    #[tracing::instrument(skip(self))]
    pub async fn restore_state(&self) -> Result<Option<RestoreSummary>> {
        let snapshot = match self.store.load().await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                tracing::warn!("no saved lot state, keeping current registry");
                return Ok(None);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load lot state");
                return Err(e.into());
            }
        };

        let capacity = self.config.capacity;
        if snapshot.capacity != capacity {
            tracing::warn!(
                stored = snapshot.capacity,
                configured = capacity,
                "stored capacity differs from configuration, keeping configured value"
            );
        }

        let mut restored = Registry::default();
        let mut skipped = 0;

        for (index, record) in snapshot.records::<StoredVehicle>().enumerate() {
            let vehicle = match record.map_err(VehicleError::from).and_then(Vehicle::try_from) {
                Ok(vehicle) => vehicle,
                Err(e) => {
                    tracing::error!(index, error = %e, "skipping unreadable vehicle record");
                    skipped += 1;
                    continue;
                }
            };

            let rejection = if vehicle.plate().is_empty() {
                Some("empty plate")
            } else if !vehicle.is_parked() {
                Some("not checked in")
            } else if restored.contains(vehicle.plate()) {
                Some("duplicate plate")
            } else if restored.occupied() >= capacity {
                Some("over capacity")
            } else {
                None
            };

            if let Some(reason) = rejection {
                tracing::error!(index, plate = %vehicle.plate(), reason, "skipping vehicle record");
                skipped += 1;
                continue;
            }

            restored.insert(vehicle);
        }

        let count = restored.occupied();
        if snapshot.occupied != count {
            tracing::warn!(
                stored = snapshot.occupied,
                restored = count,
                "stored occupied count does not match restored vehicles"
            );
        }

        *self.registry.lock() = restored;
        metrics::gauge!("parking_occupied_slots").set(count as f64);
        tracing::info!(restored = count, skipped, "lot state restored");

        Ok(Some(RestoreSummary {
            restored: count,
            skipped,
        }))
    }

    fn take_snapshot(&self) -> Result<LotSnapshot> {
        let registry = self.registry.lock();
        let records: Vec<StoredVehicle> = registry
            .sorted()
            .into_iter()
            .map(StoredVehicle::from)
            .collect();

        LotSnapshot::from_records(registry.occupied(), self.config.capacity, &records)
            .map_err(StateStoreError::from)
            .map_err(ParkingError::from)
    }
}

impl<S: StateStore> std::fmt::Debug for ParkingLot<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParkingLot")
            .field("config", &self.config)
            .field("occupied", &self.occupied_count())
            .field("listeners", &self.bus.listener_count())
            .finish()
    }
}
