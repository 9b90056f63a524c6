//! Aggregation over the execution history
//!
//! Pure functions from a record slice to the shapes the dashboard charts
//! consume. The history is fabricated, so none of this carries an accuracy
//! contract; the aggregation itself is still deterministic.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use execution_history::ExecutionRecord;

/// Per-day run counts for the daily activity chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// Calendar date in `YYYY-MM-DD` form, the chart's x-axis key.
    pub date: String,
    pub total: u32,
    pub succeeded: u32,
    pub failed: u32,
}

/// One slice of the category pie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u32,
}

/// One row of the top-workflows table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRank {
    pub workflow_id: Uuid,
    pub workflow_name: String,
    pub executions: u32,
    pub successes: u32,
    pub avg_duration_ms: Option<f64>,
}

/// Headline numbers for the analytics header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub total: u32,
    pub succeeded: u32,
    pub failed: u32,
    /// 0.0 when there are no records.
    pub success_rate: f64,
    pub avg_duration_ms: Option<f64>,
}

/// Bucket records by calendar date over the trailing `days` window.
///
/// Every day in the window appears, including days with no runs; records
/// outside the window are ignored. A zero-day window has no buckets.
pub fn daily_counts(records: &[ExecutionRecord], days: u32) -> Vec<DailyCount> {
    if days == 0 {
        return Vec::new();
    }

    let today = Utc::now().date_naive();
    let window_start = today - Duration::days(i64::from(days - 1));

    let mut buckets: Vec<DailyCount> = (0..days)
        .map(|offset| DailyCount {
            date: (window_start + Duration::days(i64::from(offset))).to_string(),
            total: 0,
            succeeded: 0,
            failed: 0,
        })
        .collect();

    for record in records {
        let date = record.timestamp.date_naive();
        if date < window_start || date > today {
            continue;
        }
        let index = (date - window_start).num_days() as usize;
        let bucket = &mut buckets[index];
        bucket.total += 1;
        if record.success {
            bucket.succeeded += 1;
        } else {
            bucket.failed += 1;
        }
    }

    buckets
}

/// Count records per category, first-seen order.
///
/// Records without a category land in `"other"`.
pub fn category_breakdown(records: &[ExecutionRecord]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();

    for record in records {
        let category = record.category.as_deref().unwrap_or("other");
        match counts.iter_mut().find(|c| c.category == category) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                category: category.to_string(),
                count: 1,
            }),
        }
    }

    counts
}

/// Rank workflows by raw execution count.
///
/// The sort is stable over first-seen order, so tied workflows keep the
/// order in which they first appear in the history.
pub fn top_workflows(records: &[ExecutionRecord], limit: usize) -> Vec<WorkflowRank> {
    struct Grouped {
        rank: WorkflowRank,
        duration_sum: u64,
        duration_count: u32,
    }

    let mut groups: Vec<Grouped> = Vec::new();

    for record in records {
        let position = groups
            .iter()
            .position(|g| g.rank.workflow_id == record.workflow_id);
        let position = match position {
            Some(position) => position,
            None => {
                groups.push(Grouped {
                    rank: WorkflowRank {
                        workflow_id: record.workflow_id,
                        workflow_name: record.workflow_name.clone(),
                        executions: 0,
                        successes: 0,
                        avg_duration_ms: None,
                    },
                    duration_sum: 0,
                    duration_count: 0,
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[position];

        group.rank.executions += 1;
        if record.success {
            group.rank.successes += 1;
        }
        if let Some(duration) = record.duration_ms {
            group.duration_sum += duration;
            group.duration_count += 1;
        }
    }

    let mut ranks: Vec<WorkflowRank> = groups
        .into_iter()
        .map(|mut g| {
            if g.duration_count > 0 {
                g.rank.avg_duration_ms = Some(g.duration_sum as f64 / f64::from(g.duration_count));
            }
            g.rank
        })
        .collect();

    ranks.sort_by(|a, b| b.executions.cmp(&a.executions));
    ranks.truncate(limit);
    ranks
}

/// Overall totals and success rate.
pub fn summary(records: &[ExecutionRecord]) -> HistorySummary {
    let total = records.len() as u32;
    let succeeded = records.iter().filter(|r| r.success).count() as u32;

    let durations: Vec<u64> = records.iter().filter_map(|r| r.duration_ms).collect();
    let avg_duration_ms = if durations.is_empty() {
        None
    } else {
        Some(durations.iter().sum::<u64>() as f64 / durations.len() as f64)
    };

    HistorySummary {
        total,
        succeeded,
        failed: total - succeeded,
        success_rate: if total == 0 {
            0.0
        } else {
            f64::from(succeeded) / f64::from(total)
        },
        avg_duration_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn record_at(
        workflow_id: Uuid,
        name: &str,
        timestamp: DateTime<Utc>,
        success: bool,
        duration_ms: Option<u64>,
        category: Option<&str>,
    ) -> ExecutionRecord {
        let mut record = ExecutionRecord::new(workflow_id, name, success, "run");
        record.timestamp = timestamp;
        record.duration_ms = duration_ms;
        record.category = category.map(str::to_string);
        record
    }

    #[test]
    fn test_daily_counts_buckets_by_calendar_date() {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let records = vec![
            record_at(id, "w", now, true, None, None),
            record_at(id, "w", now, false, None, None),
            record_at(id, "w", now - Duration::days(1), true, None, None),
            // Outside the window, ignored.
            record_at(id, "w", now - Duration::days(30), true, None, None),
        ];

        let counts = daily_counts(&records, 7);
        assert_eq!(counts.len(), 7);

        let today = counts.last().unwrap();
        assert_eq!(today.date, now.date_naive().to_string());
        assert_eq!(today.total, 2);
        assert_eq!(today.succeeded, 1);
        assert_eq!(today.failed, 1);

        let yesterday = &counts[5];
        assert_eq!(yesterday.total, 1);

        // Empty days are present with zero counts.
        assert_eq!(counts[0].total, 0);
    }

    #[test]
    fn test_daily_counts_zero_day_window_is_empty() {
        let id = Uuid::new_v4();
        let records = vec![record_at(id, "w", Utc::now(), true, None, None)];
        assert!(daily_counts(&records, 0).is_empty());
    }

    #[test]
    fn test_category_breakdown_insertion_order() {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let records = vec![
            record_at(id, "w", now, true, None, Some("new_patient")),
            record_at(id, "w", now, true, None, Some("manual")),
            record_at(id, "w", now, true, None, Some("new_patient")),
            record_at(id, "w", now, true, None, None),
        ];

        let breakdown = category_breakdown(&records);
        assert_eq!(
            breakdown,
            vec![
                CategoryCount { category: "new_patient".to_string(), count: 2 },
                CategoryCount { category: "manual".to_string(), count: 1 },
                CategoryCount { category: "other".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_top_workflows_ranks_by_count() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let now = Utc::now();
        let records = vec![
            record_at(a, "A", now, true, Some(100), None),
            record_at(b, "B", now, true, Some(300), None),
            record_at(b, "B", now, false, Some(500), None),
        ];

        let ranks = top_workflows(&records, 10);
        assert_eq!(ranks.len(), 2);
        assert_eq!(ranks[0].workflow_name, "B");
        assert_eq!(ranks[0].executions, 2);
        assert_eq!(ranks[0].successes, 1);
        assert_eq!(ranks[0].avg_duration_ms, Some(400.0));
        assert_eq!(ranks[1].workflow_name, "A");
    }

    #[test]
    fn test_top_workflows_ties_keep_first_seen_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let now = Utc::now();
        let records = vec![
            record_at(a, "A", now, true, None, None),
            record_at(b, "B", now, true, None, None),
            record_at(c, "C", now, true, None, None),
        ];

        let ranks = top_workflows(&records, 10);
        let names: Vec<&str> = ranks.iter().map(|r| r.workflow_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_top_workflows_respects_limit() {
        let now = Utc::now();
        let records: Vec<ExecutionRecord> = (0..5)
            .map(|i| record_at(Uuid::new_v4(), &format!("w{i}"), now, true, None, None))
            .collect();

        assert_eq!(top_workflows(&records, 3).len(), 3);
    }

    #[test]
    fn test_summary() {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let records = vec![
            record_at(id, "w", now, true, Some(100), None),
            record_at(id, "w", now, true, None, None),
            record_at(id, "w", now, false, Some(300), None),
            record_at(id, "w", now, true, None, None),
        ];

        let s = summary(&records);
        assert_eq!(s.total, 4);
        assert_eq!(s.succeeded, 3);
        assert_eq!(s.failed, 1);
        assert!((s.success_rate - 0.75).abs() < f64::EPSILON);
        assert_eq!(s.avg_duration_ms, Some(200.0));
    }

    #[test]
    fn test_summary_of_empty_history() {
        let s = summary(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.success_rate, 0.0);
        assert_eq!(s.avg_duration_ms, None);
    }
}
