//! Aggregation and Directory Join
//!
//! The analytical core of the tool. Both stages are pure functions over
//! in-memory tables: [`aggregate_user_metrics`] folds the filtered record
//! set into one [`UserMetrics`] per user, and [`join_directory`] decorates
//! those metrics with directory attributes using left-outer semantics keyed
//! on the metrics side.
//!
//! Invariants upheld here:
//! - the output user set equals the filtered-record user set exactly - the
//!   directory can neither drop a user nor introduce one
//! - `job_count >= 1` for every emitted row
//! - row order is ascending `user_id`, so identical inputs produce identical
//!   reports

use crate::models::{DirectoryEntry, LogRecord, UserMetrics, UsageReportRow};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::warn;

/// Group the filtered records by user and compute the three per-user
/// metrics. Zero records produce zero rows; an empty report is valid.
pub fn aggregate_user_metrics(records: &[LogRecord]) -> Vec<UserMetrics> {
    let mut totals: HashMap<&str, (u64, u64)> = HashMap::new();

    for record in records {
        let (addresses, jobs) = totals.entry(record.user_id.as_str()).or_insert((0, 0));
        *addresses += record.num_submitted_requests;
        *jobs += 1;
    }

    let mut metrics: Vec<UserMetrics> = totals
        .into_iter()
        .map(|(user_id, (total_addresses, job_count))| UserMetrics {
            user_id: user_id.to_string(),
            total_addresses,
            job_count,
            avg_per_job: round_one_decimal(total_addresses as f64 / job_count as f64),
        })
        .collect();

    metrics.sort_by(|a, b| a.user_id.cmp(&b.user_id));
    metrics
}

/// Round half-up to one decimal place. `f64::round` ties away from zero,
/// which is half-up for the non-negative averages produced here.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Left-join the aggregated metrics against the user directory.
///
/// Every metrics row appears exactly once in the output; directory-only
/// users never appear. When the directory holds duplicate `USER_ID` rows the
/// first occurrence wins, so the join can never fan out.
pub fn join_directory(
    metrics: Vec<UserMetrics>,
    directory: &[DirectoryEntry],
) -> Vec<UsageReportRow> {
    let mut lookup: HashMap<&str, &DirectoryEntry> = HashMap::new();
    let mut duplicates = 0usize;

    for entry in directory {
        match lookup.entry(entry.user_id.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
            Entry::Occupied(_) => duplicates += 1,
        }
    }

    if duplicates > 0 {
        warn!(
            duplicates,
            "directory lookup table has duplicate USER_ID rows, keeping first occurrence"
        );
    }

    metrics
        .into_iter()
        .map(|m| {
            let hit = lookup.get(m.user_id.as_str());
            UsageReportRow {
                user_id: m.user_id,
                total_addresses: m.total_addresses,
                job_count: m.job_count,
                avg_per_job: m.avg_per_job,
                user_name: hit.map(|e| e.user_name.clone()),
                email: hit.map(|e| e.email.clone()),
                org: hit.map(|e| e.org.clone()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn record(user_id: &str, date: &str, num: u64) -> LogRecord {
        LogRecord {
            id: "1".to_string(),
            user_id: user_id.to_string(),
            created_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            num_submitted_requests: num,
        }
    }

    fn entry(user_id: &str, name: &str, email: &str, org: &str) -> DirectoryEntry {
        DirectoryEntry {
            user_id: user_id.to_string(),
            user_name: name.to_string(),
            email: email.to_string(),
            org: org.to_string(),
        }
    }

    #[test]
    fn test_aggregate_metrics() {
        let records = vec![
            record("u1", "2019-09-01", 5),
            record("u1", "2019-09-02", 3),
            record("u2", "2019-09-01", 10),
        ];
        let metrics = aggregate_user_metrics(&records);

        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].user_id, "u1");
        assert_eq!(metrics[0].total_addresses, 8);
        assert_eq!(metrics[0].job_count, 2);
        assert_eq!(metrics[0].avg_per_job, 4.0);
        assert_eq!(metrics[1].user_id, "u2");
        assert_eq!(metrics[1].total_addresses, 10);
        assert_eq!(metrics[1].job_count, 1);
        assert_eq!(metrics[1].avg_per_job, 10.0);
    }

    #[test]
    fn test_aggregate_empty_input() {
        assert!(aggregate_user_metrics(&[]).is_empty());
    }

    #[test]
    fn test_job_counts_sum_to_record_count() {
        let records = vec![
            record("u1", "2019-09-01", 1),
            record("u2", "2019-09-01", 2),
            record("u1", "2019-09-02", 3),
            record("u3", "2019-09-03", 4),
            record("u2", "2019-09-04", 5),
        ];
        let metrics = aggregate_user_metrics(&records);
        let total_jobs: u64 = metrics.iter().map(|m| m.job_count).sum();
        assert_eq!(total_jobs, records.len() as u64);
    }

    #[test]
    fn test_average_rounds_half_up() {
        // 1/4 = 0.25 and 5/2 = 2.5 are exact in binary, so the midpoint
        // behavior is observable.
        let quarter = aggregate_user_metrics(&[
            record("u1", "2019-09-01", 1),
            record("u1", "2019-09-01", 0),
            record("u1", "2019-09-01", 0),
            record("u1", "2019-09-01", 0),
        ]);
        assert_eq!(quarter[0].avg_per_job, 0.3);

        let half = aggregate_user_metrics(&[
            record("u2", "2019-09-01", 5),
            record("u2", "2019-09-01", 0),
        ]);
        assert_eq!(half[0].avg_per_job, 2.5);

        let thirds = aggregate_user_metrics(&[
            record("u3", "2019-09-01", 2),
            record("u3", "2019-09-01", 0),
            record("u3", "2019-09-01", 0),
        ]);
        assert_eq!(thirds[0].avg_per_job, 0.7);
    }

    #[test]
    fn test_average_consistent_with_totals() {
        let records = vec![
            record("u1", "2019-09-01", 7),
            record("u1", "2019-09-02", 11),
            record("u1", "2019-09-03", 13),
        ];
        let metrics = aggregate_user_metrics(&records);
        let m = &metrics[0];
        let reconstructed = m.avg_per_job * m.job_count as f64;
        assert!((reconstructed - m.total_addresses as f64).abs() <= 0.05 * m.job_count as f64);
    }

    #[test]
    fn test_output_sorted_by_user_id() {
        let records = vec![
            record("zeta", "2019-09-01", 1),
            record("alpha", "2019-09-01", 1),
            record("mid", "2019-09-01", 1),
        ];
        let metrics = aggregate_user_metrics(&records);
        let ids: Vec<&str> = metrics.iter().map(|m| m.user_id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_join_preserves_all_metrics_rows() {
        let records = vec![
            record("u1", "2019-09-01", 5),
            record("u2", "2019-09-01", 10),
        ];
        let metrics = aggregate_user_metrics(&records);
        let directory = vec![entry("u1", "Alice", "a@x.com", "OrgA")];
        let rows = join_directory(metrics, &directory);

        let output_ids: HashSet<&str> = rows.iter().map(|r| r.user_id.as_str()).collect();
        let record_ids: HashSet<&str> = records.iter().map(|r| r.user_id.as_str()).collect();
        assert_eq!(output_ids, record_ids);

        assert_eq!(rows[0].user_name.as_deref(), Some("Alice"));
        assert_eq!(rows[0].email.as_deref(), Some("a@x.com"));
        assert_eq!(rows[0].org.as_deref(), Some("OrgA"));
        assert_eq!(rows[1].user_name, None);
        assert_eq!(rows[1].email, None);
        assert_eq!(rows[1].org, None);
    }

    #[test]
    fn test_join_ignores_directory_only_users() {
        let metrics = aggregate_user_metrics(&[record("u1", "2019-09-01", 5)]);
        let directory = vec![
            entry("u1", "Alice", "a@x.com", "OrgA"),
            entry("ghost", "Nobody", "n@x.com", "OrgN"),
        ];
        let rows = join_directory(metrics, &directory);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, "u1");
    }

    #[test]
    fn test_join_duplicate_directory_keys_first_wins() {
        let metrics = aggregate_user_metrics(&[record("u1", "2019-09-01", 5)]);
        let directory = vec![
            entry("u1", "First", "first@x.com", "OrgF"),
            entry("u1", "Second", "second@x.com", "OrgS"),
        ];
        let rows = join_directory(metrics, &directory);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_name.as_deref(), Some("First"));
    }
}
