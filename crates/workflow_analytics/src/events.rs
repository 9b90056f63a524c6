//! Simulator event types

use serde::{Deserialize, Serialize};

use execution_history::ExecutionRecord;

/// Events flowing from the ticker (and UI actions) to the history worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SimulatorEvent {
    /// A fabricated run finished; the record should be persisted.
    RunCompleted(ExecutionRecord),
    /// The user cleared the execution history.
    HistoryCleared,
    /// Operational events, logged but not persisted.
    System(SystemEvent),
}

/// Operational events for the simulator itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SystemEvent {
    TickerStarted,
    TickerStopped,
    EventsDropped { count: u64 },
    StorageError { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_event_serialization() {
        let record = ExecutionRecord::new(Uuid::new_v4(), "Reminder", true, "Completed");
        let event = SimulatorEvent::RunCompleted(record.clone());

        let json = serde_json::to_string(&event).expect("serialize");
        let back: SimulatorEvent = serde_json::from_str(&json).expect("deserialize");

        match back {
            SimulatorEvent::RunCompleted(r) => assert_eq!(r, record),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
