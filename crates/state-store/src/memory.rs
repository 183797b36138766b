use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{LotSnapshot, Result, store::StateStore};

/// In-memory state store for testing.
///
/// Clones share the same slot, so a clone handed to a parking lot can be
/// inspected from the test.
#[derive(Clone, Default)]
pub struct InMemoryStateStore {
    slot: Arc<RwLock<Option<LotSnapshot>>>,
}

impl InMemoryStateStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with a snapshot.
    pub fn with_snapshot(snapshot: LotSnapshot) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(snapshot))),
        }
    }

    /// Returns a copy of the stored snapshot, if any.
    pub async fn current(&self) -> Option<LotSnapshot> {
        self.slot.read().await.clone()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn save(&self, snapshot: &LotSnapshot) -> Result<()> {
        *self.slot.write().await = Some(snapshot.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<LotSnapshot>> {
        Ok(self.slot.read().await.clone())
    }

    async fn clear(&self) -> Result<bool> {
        Ok(self.slot.write().await.take().is_some())
    }

    async fn exists(&self) -> Result<bool> {
        Ok(self.slot.read().await.is_some())
    }
}
