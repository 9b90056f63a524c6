//! Runs the simulation pipeline for a few seconds and prints the
//! resulting analytics.
//!
//! ```sh
//! RUST_LOG=info cargo run -p workflow_analytics --example simulate
//! ```

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use execution_history::{HistoryManager, MemoryHistoryStorage};
use workflow_analytics::{
    category_breakdown, daily_counts, seed_history, summary, top_workflows, HistoryWorker,
    RunTicker, SimulatorBus,
};
use workflow_store::WorkflowManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let store = WorkflowManager::with_builtins();
    for workflow in store.list().await {
        store.activate(workflow.id).await?;
    }

    let history = HistoryManager::load(Arc::new(MemoryHistoryStorage::new())).await?;

    // Backfill two weeks of fabricated history, then let the ticker add
    // live runs on top.
    let mut rng = rand::thread_rng();
    for record in seed_history(&store.list().await, 50, &mut rng) {
        history.record(record).await?;
    }

    let (bus, rx) = SimulatorBus::new(64);
    let worker_handle = HistoryWorker::new(history.clone(), store.clone()).spawn(rx, bus.clone());
    let ticker_handle =
        RunTicker::with_period(store.clone(), bus, Duration::from_millis(500)).spawn();

    tokio::time::sleep(Duration::from_secs(3)).await;
    ticker_handle.store(false, Ordering::SeqCst);
    worker_handle.store(false, Ordering::SeqCst);

    let records = history.all().await;
    let s = summary(&records);
    println!(
        "{} runs, {:.0}% success, avg {:.0} ms",
        s.total,
        s.success_rate * 100.0,
        s.avg_duration_ms.unwrap_or_default()
    );

    println!("\nRuns per day (last 7 days):");
    for day in daily_counts(&records, 7) {
        println!("  {}  {:3} total  {:3} failed", day.date, day.total, day.failed);
    }

    println!("\nBy category:");
    for slice in category_breakdown(&records) {
        println!("  {:30} {}", slice.category, slice.count);
    }

    println!("\nTop workflows:");
    for rank in top_workflows(&records, 5) {
        println!(
            "  {:40} {:3} runs  {:3} ok",
            rank.workflow_name, rank.executions, rank.successes
        );
    }

    Ok(())
}
