//! History storage trait and implementations

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::warn;
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;

use crate::record::ExecutionRecord;

/// File name of the persisted history, fixed across installs.
pub const HISTORY_FILE_NAME: &str = "workflow-execution-history.json";

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type HistoryResult<T> = Result<T, HistoryError>;

/// Storage backend for the execution history.
///
/// The stored shape carries no version; a reader that cannot parse the
/// payload discards it and the history is regenerated wholesale.
#[async_trait]
pub trait HistoryStorage: Send + Sync {
    /// Load all stored records, oldest first.
    async fn load(&self) -> HistoryResult<Vec<ExecutionRecord>>;

    /// Overwrite the stored history with `records`.
    async fn save(&self, records: &[ExecutionRecord]) -> HistoryResult<()>;

    /// Remove all stored records.
    async fn clear(&self) -> HistoryResult<()>;
}

/// JSON-file-backed history storage.
#[derive(Clone)]
pub struct FileHistoryStorage {
    base_path: PathBuf,
}

impl FileHistoryStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn history_path(&self) -> PathBuf {
        self.base_path.join(HISTORY_FILE_NAME)
    }
}

#[async_trait]
impl HistoryStorage for FileHistoryStorage {
    async fn load(&self) -> HistoryResult<Vec<ExecutionRecord>> {
        let path = self.history_path();
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(records) => Ok(records),
            Err(e) => {
                // Malformed history is discarded, not migrated.
                warn!("Discarding malformed history file {}: {}", path.display(), e);
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, records: &[ExecutionRecord]) -> HistoryResult<()> {
        fs::create_dir_all(&self.base_path).await?;
        let content = serde_json::to_string_pretty(records)?;
        fs::write(self.history_path(), content).await?;
        Ok(())
    }

    async fn clear(&self) -> HistoryResult<()> {
        match fs::remove_file(self.history_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory history storage for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryHistoryStorage {
    records: RwLock<Vec<ExecutionRecord>>,
}

impl MemoryHistoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStorage for MemoryHistoryStorage {
    async fn load(&self) -> HistoryResult<Vec<ExecutionRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn save(&self, records: &[ExecutionRecord]) -> HistoryResult<()> {
        *self.records.write().await = records.to_vec();
        Ok(())
    }

    async fn clear(&self) -> HistoryResult<()> {
        self.records.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use uuid::Uuid;

    fn sample_record(name: &str) -> ExecutionRecord {
        ExecutionRecord::new(Uuid::new_v4(), name, true, "Completed")
    }

    #[tokio::test]
    async fn test_file_storage_round_trip() {
        let dir = tempdir().unwrap();
        let storage = FileHistoryStorage::new(dir.path());

        let records = vec![sample_record("Reminder"), sample_record("Onboarding")];
        storage.save(&records).await.unwrap();

        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn test_file_storage_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let storage = FileHistoryStorage::new(dir.path());
        assert!(storage.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_storage_malformed_file_loads_empty() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(HISTORY_FILE_NAME), "{not json").unwrap();

        let storage = FileHistoryStorage::new(dir.path());
        assert!(storage.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_storage_clear() {
        let dir = tempdir().unwrap();
        let storage = FileHistoryStorage::new(dir.path());

        storage.save(&[sample_record("Reminder")]).await.unwrap();
        storage.clear().await.unwrap();
        assert!(storage.load().await.unwrap().is_empty());

        // Clearing an already-empty store is fine.
        storage.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_storage_round_trip() {
        let storage = MemoryHistoryStorage::new();
        let records = vec![sample_record("Reminder")];

        storage.save(&records).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), records);

        storage.clear().await.unwrap();
        assert!(storage.load().await.unwrap().is_empty());
    }
}
