//! Capped execution history
//!
//! Keeps the recent execution records in memory, writing through to the
//! configured storage backend on every mutation. The history is bounded:
//! once the cap is reached the oldest record is evicted for each new one.

use std::sync::Arc;

use log::info;
use tokio::sync::RwLock;

use crate::record::ExecutionRecord;
use crate::storage::{HistoryResult, HistoryStorage};

/// Maximum number of records kept; oldest are evicted first.
pub const MAX_HISTORY_ENTRIES: usize = 100;

/// Write-through view over the stored execution history.
#[derive(Clone)]
pub struct HistoryManager {
    storage: Arc<dyn HistoryStorage>,
    records: Arc<RwLock<Vec<ExecutionRecord>>>,
}

impl HistoryManager {
    /// Load the stored history once and serve it from memory afterwards.
    ///
    /// An over-long stored history (from an older build without the cap)
    /// is trimmed on load.
    pub async fn load(storage: Arc<dyn HistoryStorage>) -> HistoryResult<Self> {
        let mut records = storage.load().await?;
        if records.len() > MAX_HISTORY_ENTRIES {
            let excess = records.len() - MAX_HISTORY_ENTRIES;
            records.drain(..excess);
        }
        info!("Loaded {} execution records", records.len());

        Ok(Self {
            storage,
            records: Arc::new(RwLock::new(records)),
        })
    }

    /// Append a record, evicting the oldest entries beyond the cap.
    pub async fn record(&self, entry: ExecutionRecord) -> HistoryResult<()> {
        let mut records = self.records.write().await;
        records.push(entry);
        if records.len() > MAX_HISTORY_ENTRIES {
            let excess = records.len() - MAX_HISTORY_ENTRIES;
            records.drain(..excess);
        }
        self.storage.save(&records).await
    }

    /// All records, oldest first.
    pub async fn all(&self) -> Vec<ExecutionRecord> {
        self.records.read().await.clone()
    }

    /// The `n` most recent records, newest first.
    pub async fn recent(&self, n: usize) -> Vec<ExecutionRecord> {
        let records = self.records.read().await;
        records.iter().rev().take(n).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Drop every record, in memory and in storage.
    pub async fn clear(&self) -> HistoryResult<()> {
        self.records.write().await.clear();
        self.storage.clear().await
    }
}
