//! Simulated run ticker
//!
//! While running, each tick picks one active workflow uniformly at random
//! and emits a fabricated run for it. Ticks carry no backpressure, retry,
//! or ordering guarantee; a tick with no active workflows does nothing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::info;
use rand::Rng;
use tokio::time;

use workflow_store::WorkflowManager;

use crate::bus::SimulatorBus;
use crate::events::{SimulatorEvent, SystemEvent};
use crate::generator::fabricate_record;

/// Default spacing between fabricated runs.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(45);

pub struct RunTicker {
    store: WorkflowManager,
    bus: SimulatorBus,
    period: Duration,
    running: Arc<AtomicBool>,
}

impl RunTicker {
    pub fn new(store: WorkflowManager, bus: SimulatorBus) -> Self {
        Self::with_period(store, bus, DEFAULT_TICK_PERIOD)
    }

    pub fn with_period(store: WorkflowManager, bus: SimulatorBus, period: Duration) -> Self {
        Self {
            store,
            bus,
            period,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Spawn the tick task.
    ///
    /// Returns a handle that stops the ticker when set to `false`; the
    /// task also ends when the worker side of the bus goes away.
    pub fn spawn(&self) -> Arc<AtomicBool> {
        let store = self.store.clone();
        let bus = self.bus.clone();
        let period = self.period;
        let running = Arc::clone(&self.running);
        running.store(true, Ordering::SeqCst);

        let handle = Arc::clone(&running);

        tokio::spawn(async move {
            info!("RunTicker started (period {:?})", period);
            bus.emit(SimulatorEvent::System(SystemEvent::TickerStarted));

            let mut interval = time::interval(period);
            // The first tick fires immediately; skip it so a run only
            // appears after a full period.
            interval.tick().await;

            let mut reported_drops = 0u64;

            loop {
                interval.tick().await;
                if !running.load(Ordering::SeqCst) || bus.is_closed() {
                    break;
                }

                // Report drops counted since the last tick before adding
                // more load to the channel.
                let dropped = bus.dropped_count();
                if dropped > reported_drops {
                    bus.emit_dropped_notification(dropped - reported_drops);
                    reported_drops = dropped;
                }

                let active = store.active().await;
                if active.is_empty() {
                    continue;
                }

                let record = {
                    let mut rng = rand::thread_rng();
                    let index = rng.gen_range(0..active.len());
                    fabricate_record(&active[index], &mut rng)
                };
                bus.emit(SimulatorEvent::RunCompleted(record));
            }

            info!("RunTicker stopped");
            bus.emit(SimulatorEvent::System(SystemEvent::TickerStopped));
        });

        handle
    }
}
