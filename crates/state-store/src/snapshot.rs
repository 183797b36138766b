use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Point-in-time copy of the parking lot's counters and active registry.
///
/// Vehicle records are kept as raw JSON values. The store does not know the
/// record schema, and a reader can reject one malformed record without
/// rejecting the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotSnapshot {
    /// When the snapshot was taken.
    pub taken_at: DateTime<Utc>,

    /// Occupied slot count at the time of the snapshot.
    pub occupied: usize,

    /// Total slot capacity at the time of the snapshot.
    pub capacity: usize,

    /// Serialized vehicle records, one per active plate.
    #[serde(default)]
    pub vehicles: Vec<serde_json::Value>,
}

impl LotSnapshot {
    /// Creates a new snapshot from already serialized records.
    pub fn new(occupied: usize, capacity: usize, vehicles: Vec<serde_json::Value>) -> Self {
        Self {
            taken_at: Utc::now(),
            occupied,
            capacity,
            vehicles,
        }
    }

    /// Creates a snapshot by serializing each record.
    pub fn from_records<T: Serialize>(
        occupied: usize,
        capacity: usize,
        records: &[T],
    ) -> Result<Self, serde_json::Error> {
        let vehicles = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(occupied, capacity, vehicles))
    }

    /// Deserializes each record independently.
    ///
    /// The iterator yields one result per stored record, so callers decide
    /// what to do with the records that fail.
    pub fn records<T: DeserializeOwned>(
        &self,
    ) -> impl Iterator<Item = Result<T, serde_json::Error>> + '_ {
        self.vehicles
            .iter()
            .map(|value| serde_json::from_value(value.clone()))
    }

    /// Returns the number of stored vehicle records.
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }
}
