use async_trait::async_trait;

use crate::{LotSnapshot, Result};

/// Persistence collaborator for the parking lot.
///
/// A store holds at most one snapshot: saving replaces whatever was there.
/// This is a best-effort copy of in-memory state, not a write-ahead log.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Persists the snapshot, replacing any previous one.
    async fn save(&self, snapshot: &LotSnapshot) -> Result<()>;

    /// Loads the stored snapshot.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<LotSnapshot>>;

    /// Removes the stored snapshot.
    ///
    /// Returns whether there was anything to remove.
    async fn clear(&self) -> Result<bool>;

    /// Returns whether a snapshot is currently stored.
    async fn exists(&self) -> Result<bool>;
}
