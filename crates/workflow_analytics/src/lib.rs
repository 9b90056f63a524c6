pub mod aggregator;
pub mod bus;
pub mod events;
pub mod generator;
pub mod ticker;
pub mod worker;

pub use aggregator::{
    category_breakdown, daily_counts, summary, top_workflows, CategoryCount, DailyCount,
    HistorySummary, WorkflowRank,
};
pub use bus::SimulatorBus;
pub use events::{SimulatorEvent, SystemEvent};
pub use generator::{fabricate_record, seed_history};
pub use ticker::RunTicker;
pub use worker::HistoryWorker;
