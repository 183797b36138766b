use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::{LotSnapshot, Result, store::StateStore};

/// State store backed by a pretty-printed JSON document on disk.
///
/// Writes go to a sibling temporary file that is renamed over the target,
/// so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store writing to the given file path.
    ///
    /// Missing parent directories are created on the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    #[tracing::instrument(skip(self, snapshot), fields(path = %self.path.display()))]
    async fn save(&self, snapshot: &LotSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let temp = self.temp_path();
        fs::write(&temp, bytes).await?;
        fs::rename(&temp, &self.path).await?;

        tracing::info!(vehicles = snapshot.vehicle_count(), "state saved");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Option<LotSnapshot>> {
        if !fs::try_exists(&self.path).await? {
            tracing::warn!("state file not found");
            return Ok(None);
        }

        let bytes = fs::read(&self.path).await?;
        let snapshot: LotSnapshot = serde_json::from_slice(&bytes)?;

        tracing::info!(vehicles = snapshot.vehicle_count(), "state loaded");
        Ok(Some(snapshot))
    }

    async fn clear(&self) -> Result<bool> {
        if !fs::try_exists(&self.path).await? {
            tracing::warn!(path = %self.path.display(), "state file does not exist, nothing to remove");
            return Ok(false);
        }

        fs::remove_file(&self.path).await?;
        tracing::info!(path = %self.path.display(), "state removed");
        Ok(true)
    }

    async fn exists(&self) -> Result<bool> {
        Ok(fs::try_exists(&self.path).await?)
    }
}
