use crate::models::LogRecord;
use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Inclusive calendar-date window bounding which records are aggregated.
///
/// Both bounds are day-granular. A window with `start > end` is valid and
/// matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    /// Parse the two CLI date bounds. Any parse failure is fatal and must
    /// abort the run before any archive work starts.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d")
            .with_context(|| format!("invalid start date '{}', expected YYYY-MM-DD", start))?;
        let end = NaiveDate::parse_from_str(end, "%Y-%m-%d")
            .with_context(|| format!("invalid end date '{}', expected YYYY-MM-DD", end))?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Retain the records whose creation day falls inside the window.
    pub fn filter(&self, records: Vec<LogRecord>) -> Vec<LogRecord> {
        records
            .into_iter()
            .filter(|record| self.contains(record.created_date))
            .collect()
    }
}
