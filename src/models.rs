//! Core Data Models
//!
//! Typed records for every stage of the report pipeline:
//!
//! 1. **Ingestion**: [`RawLogRow`] - the serde view of one daily-log TSV row
//! 2. **Records**: [`LogRecord`] - coerced, immutable job-submission events
//! 3. **Aggregation**: [`UserMetrics`] - per-user totals over the filtered set
//! 4. **Reference**: [`DirectoryEntry`] - rows of the user lookup table
//! 5. **Output**: [`UsageReportRow`] - metrics left-joined with the directory
//!
//! The daily logs carry ten columns
//! (`ID, BUSINESS_APPLICATION_NAME, BATCH_JOB_ID, USER_ID, WHEN_CREATED,
//! COMPLETED_TIMESTAMP, NUM_SUBMITTED_REQUESTS, FAILED_REQUEST_RANGE,
//! INPUT_DATA_CONTENT_TYPE, RESULT_DATA_CONTENT_TYPE`); only the four fields
//! the pipeline consumes are deserialized, addressed by header name rather
//! than column position.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of a daily job log, as read from disk. Job size and timestamp are
/// kept as strings here; coercion happens in [`LogRecord::from_raw`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawLogRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "USER_ID")]
    pub user_id: String,
    #[serde(rename = "WHEN_CREATED")]
    pub when_created: String,
    #[serde(rename = "NUM_SUBMITTED_REQUESTS")]
    pub num_submitted_requests: String,
}

/// One job-submission event. Created once at ingestion, immutable after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub id: String,
    pub user_id: String,
    /// Calendar day of `WHEN_CREATED`. The filter operates at day
    /// granularity; the time-of-day part is never consulted.
    pub created_date: NaiveDate,
    /// Number of addresses in the job.
    pub num_submitted_requests: u64,
}

impl LogRecord {
    /// Coerce a raw row into a typed record.
    ///
    /// Returns `None` when the job-size field is not a valid non-negative
    /// integer or the `WHEN_CREATED` day prefix is not a valid date. Such
    /// rows are header/separator noise or malformed lines and are dropped
    /// from all downstream processing.
    pub fn from_raw(raw: RawLogRow) -> Option<Self> {
        let num_submitted_requests = raw.num_submitted_requests.trim().parse::<u64>().ok()?;
        let day = raw.when_created.get(..10)?;
        let created_date = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;

        Some(Self {
            id: raw.id,
            user_id: raw.user_id,
            created_date,
            num_submitted_requests,
        })
    }
}

/// Aggregated metrics for one user over the filtered record set.
/// Rows only exist for users with at least one filtered record, so
/// `job_count >= 1` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct UserMetrics {
    pub user_id: String,
    /// Sum of `num_submitted_requests` over the user's records.
    pub total_addresses: u64,
    /// Number of records for the user.
    pub job_count: u64,
    /// `total_addresses / job_count`, rounded half-up to one decimal place.
    pub avg_per_job: f64,
}

/// One row of the user directory lookup table.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryEntry {
    #[serde(rename = "USER_ID")]
    pub user_id: String,
    #[serde(rename = "User_Name")]
    pub user_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Org")]
    pub org: String,
}

/// Final report row: [`UserMetrics`] left-joined with [`DirectoryEntry`].
/// Directory fields are `None` when the user has no directory entry, which
/// serializes to empty CSV fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageReportRow {
    #[serde(rename = "USER_ID")]
    pub user_id: String,
    #[serde(rename = "Total")]
    pub total_addresses: u64,
    #[serde(rename = "Jobs")]
    pub job_count: u64,
    #[serde(rename = "Avg")]
    pub avg_per_job: f64,
    #[serde(rename = "User_Name")]
    pub user_name: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "Org")]
    pub org: Option<String>,
}
