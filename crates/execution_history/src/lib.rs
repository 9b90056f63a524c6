pub mod manager;
pub mod record;
pub mod storage;

pub use manager::{HistoryManager, MAX_HISTORY_ENTRIES};
pub use record::ExecutionRecord;
pub use storage::{
    FileHistoryStorage, HistoryError, HistoryResult, HistoryStorage, MemoryHistoryStorage,
    HISTORY_FILE_NAME,
};
