//! History worker
//!
//! Consumes simulator events from the bus and applies them to the
//! execution history and the workflow store. Runs as a spawned task until
//! the channel closes or the running flag is cleared.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{error, info, warn};
use tokio::sync::mpsc;

use execution_history::HistoryManager;
use workflow_store::{StoreError, WorkflowManager};

use crate::bus::SimulatorBus;
use crate::events::{SimulatorEvent, SystemEvent};

pub struct HistoryWorker {
    history: HistoryManager,
    store: WorkflowManager,
    running: Arc<AtomicBool>,
}

impl HistoryWorker {
    pub fn new(history: HistoryManager, store: WorkflowManager) -> Self {
        Self {
            history,
            store,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Spawn the worker task.
    ///
    /// Returns a handle that stops the worker when set to `false`.
    pub fn spawn(
        &self,
        mut receiver: mpsc::Receiver<SimulatorEvent>,
        bus: SimulatorBus,
    ) -> Arc<AtomicBool> {
        let history = self.history.clone();
        let store = self.store.clone();
        let running = Arc::clone(&self.running);
        running.store(true, Ordering::SeqCst);

        let handle = Arc::clone(&running);

        tokio::spawn(async move {
            info!("HistoryWorker started");

            while running.load(Ordering::SeqCst) {
                match receiver.recv().await {
                    Some(event) => {
                        if let Err(e) = handle_event(&history, &store, &event).await {
                            warn!("Failed to handle simulator event: {}", e);
                            bus.emit(SimulatorEvent::System(SystemEvent::StorageError {
                                error: e.to_string(),
                            }));
                        }
                    }
                    None => {
                        info!("HistoryWorker channel closed");
                        break;
                    }
                }
            }

            info!("HistoryWorker stopped");
        });

        handle
    }
}

async fn handle_event(
    history: &HistoryManager,
    store: &WorkflowManager,
    event: &SimulatorEvent,
) -> anyhow::Result<()> {
    match event {
        SimulatorEvent::RunCompleted(record) => {
            history.record(record.clone()).await?;
            match store.mark_last_run(record.workflow_id, record.timestamp).await {
                Ok(()) => {}
                // The workflow may have been deleted since the tick fired.
                Err(StoreError::NotFound(id)) => {
                    warn!("Run recorded for missing workflow {}", id);
                }
                Err(e) => return Err(e.into()),
            }
            info!(
                "Run recorded for {} ({})",
                record.workflow_name,
                if record.success { "success" } else { "failure" }
            );
        }
        SimulatorEvent::HistoryCleared => {
            history.clear().await?;
            info!("Execution history cleared");
        }
        SimulatorEvent::System(system) => match system {
            SystemEvent::TickerStarted => info!("System: TickerStarted"),
            SystemEvent::TickerStopped => info!("System: TickerStopped"),
            SystemEvent::EventsDropped { count } => {
                warn!("System: {} simulator events dropped", count);
            }
            SystemEvent::StorageError { error } => {
                error!("System: storage error - {}", error);
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use execution_history::{ExecutionRecord, MemoryHistoryStorage};
    use tokio::time::{sleep, Duration};
    use workflow_model::{WorkflowStep, WorkflowTrigger};
    use workflow_store::WorkflowDraft;

    async fn memory_history() -> HistoryManager {
        HistoryManager::load(Arc::new(MemoryHistoryStorage::new()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_run_completed_is_persisted_and_marks_last_run() {
        let history = memory_history().await;
        let store = WorkflowManager::new();
        let workflow = store
            .create(
                WorkflowDraft {
                    name: "Reminder".to_string(),
                    description: String::new(),
                    trigger: WorkflowTrigger::AppointmentScheduled,
                    steps: vec![WorkflowStep::Sms {
                        message: "See you tomorrow".to_string(),
                    }],
                },
                "system",
            )
            .await
            .unwrap();

        let (bus, rx) = SimulatorBus::new(8);
        let worker = HistoryWorker::new(history.clone(), store.clone());
        let running = worker.spawn(rx, bus.clone());

        let record = ExecutionRecord::new(workflow.id, "Reminder", true, "Completed");
        let at = record.timestamp;
        bus.emit(SimulatorEvent::RunCompleted(record));

        sleep(Duration::from_millis(100)).await;

        assert_eq!(history.len().await, 1);
        assert_eq!(store.get(workflow.id).await.unwrap().last_run, Some(at));

        running.store(false, Ordering::SeqCst);
    }

    #[tokio::test]
    async fn test_run_for_deleted_workflow_still_recorded() {
        let history = memory_history().await;
        let store = WorkflowManager::new();

        let (bus, rx) = SimulatorBus::new(8);
        let worker = HistoryWorker::new(history.clone(), store.clone());
        let running = worker.spawn(rx, bus.clone());

        let record = ExecutionRecord::new(uuid::Uuid::new_v4(), "Gone", true, "Completed");
        bus.emit(SimulatorEvent::RunCompleted(record));

        sleep(Duration::from_millis(100)).await;
        assert_eq!(history.len().await, 1);

        running.store(false, Ordering::SeqCst);
    }

    #[tokio::test]
    async fn test_history_cleared_event() {
        let history = memory_history().await;
        let store = WorkflowManager::new();
        history
            .record(ExecutionRecord::new(uuid::Uuid::new_v4(), "w", true, "run"))
            .await
            .unwrap();

        let (bus, rx) = SimulatorBus::new(8);
        let worker = HistoryWorker::new(history.clone(), store);
        let running = worker.spawn(rx, bus.clone());

        bus.emit(SimulatorEvent::HistoryCleared);
        sleep(Duration::from_millis(100)).await;

        assert!(history.is_empty().await);
        running.store(false, Ordering::SeqCst);
    }
}
