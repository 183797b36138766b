//! Active registry of the parking lot.

use std::collections::HashMap;

use common::Plate;

use crate::vehicle::Vehicle;

/// Plate-keyed map of the vehicles currently parked.
///
/// The occupied count is the size of the map, so the two can never drift
/// apart.
#[derive(Debug, Default)]
pub(super) struct Registry {
    active: HashMap<Plate, Vehicle>,
}

impl Registry {
    pub(super) fn occupied(&self) -> usize {
        self.active.len()
    }

    pub(super) fn free(&self, capacity: usize) -> usize {
        capacity.saturating_sub(self.occupied())
    }

    pub(super) fn contains(&self, plate: &Plate) -> bool {
        self.active.contains_key(plate)
    }

    pub(super) fn get(&self, plate: &Plate) -> Option<&Vehicle> {
        self.active.get(plate)
    }

    /// Inserts a vehicle. Callers check for duplicates first.
    pub(super) fn insert(&mut self, vehicle: Vehicle) {
        self.active.insert(vehicle.plate().clone(), vehicle);
    }

    pub(super) fn remove(&mut self, plate: &Plate) -> Option<Vehicle> {
        self.active.remove(plate)
    }

    pub(super) fn clear(&mut self) {
        self.active.clear();
    }

    /// Returns a deep copy of the map.
    pub(super) fn to_map(&self) -> HashMap<Plate, Vehicle> {
        self.active.clone()
    }

    /// Returns the vehicles ordered by plate.
    pub(super) fn sorted(&self) -> Vec<&Vehicle> {
        let mut vehicles: Vec<&Vehicle> = self.active.values().collect();
        vehicles.sort_by(|a, b| a.plate().cmp(b.plate()));
        vehicles
    }
}
