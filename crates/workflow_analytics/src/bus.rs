//! Bounded channel between the simulator and the history worker

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::events::{SimulatorEvent, SystemEvent};

/// Sender half of the simulator event channel.
///
/// `emit` uses `try_send`: a full channel drops the event and counts the
/// drop instead of blocking the ticker. Fabricated events carry no
/// delivery guarantee (see the resource model notes in the repo docs).
pub struct SimulatorBus {
    tx: mpsc::Sender<SimulatorEvent>,
    dropped: Arc<AtomicU64>,
}

impl SimulatorBus {
    /// Create a bus with the given channel capacity.
    ///
    /// Returns the bus (for emitting) and the receiver (for the worker).
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<SimulatorEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            Self {
                tx,
                dropped: Arc::new(AtomicU64::new(0)),
            },
            rx,
        )
    }

    /// Emit an event without blocking; full channel drops it.
    pub fn emit(&self, event: SimulatorEvent) {
        if self.tx.try_send(event).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Emit a notification that `count` events were dropped.
    ///
    /// Also uses `try_send`, but a lost notification is not counted as a
    /// drop so the counter cannot feed itself.
    pub fn emit_dropped_notification(&self, count: u64) {
        let _ = self
            .tx
            .try_send(SimulatorEvent::System(SystemEvent::EventsDropped { count }));
    }

    /// Number of events dropped since the bus was created.
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Whether the worker side has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl Clone for SimulatorBus {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            dropped: Arc::clone(&self.dropped),
        }
    }
}
