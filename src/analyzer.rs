//! Report Pipeline Orchestration
//!
//! [`UsageReportAnalyzer`] sequences the whole run: load the directory,
//! extract the archive, ingest the daily logs, filter to the report window,
//! aggregate, join, and emit the report. Strictly sequential, single pass,
//! one report per invocation.
//!
//! Resource scoping: the extraction directory is removed on every exit path
//! (best-effort, warn-only), and the report file is either fully written or
//! absent. Aggregation and join never fail for data-shape reasons; an empty
//! window produces a header-only report.

use crate::archive::ExtractedArchive;
use crate::config::get_config;
use crate::emitter;
use crate::models::{DirectoryEntry, LogRecord};
use crate::parser::{self, LogParser};
use crate::summary;
use crate::window::ReportWindow;
use anyhow::{bail, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

/// Facts about a completed run, for the terminal summary.
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Daily log files found in the archive.
    pub files: usize,
    /// Rows coerced into records.
    pub parsed: usize,
    /// Rows dropped by coercion.
    pub dropped: usize,
    /// Records inside the report window.
    pub filtered: usize,
    /// Distinct users in the report.
    pub users: usize,
    /// Earliest and latest creation day seen across all parsed records.
    pub log_range: Option<(NaiveDate, NaiveDate)>,
    /// Where the report was written.
    pub report_path: PathBuf,
}

pub struct UsageReportAnalyzer {
    lookup_path: PathBuf,
    archive_path: PathBuf,
    window: ReportWindow,
}

impl UsageReportAnalyzer {
    pub fn new(lookup_path: PathBuf, archive_path: PathBuf, window: ReportWindow) -> Self {
        Self {
            lookup_path,
            archive_path,
            window,
        }
    }

    /// The report lands next to the archive, like the tool it replaces.
    pub fn report_destination(&self) -> PathBuf {
        let dir = match self.archive_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        dir.join(&get_config().output.report_name)
    }

    /// Run the pipeline to completion and return the run statistics.
    pub fn run(&self) -> Result<RunStats> {
        // Reference data first: an unreadable lookup table aborts before
        // any extraction work.
        let directory = parser::load_directory(&self.lookup_path)?;

        let extracted = ExtractedArchive::extract(&self.archive_path)?;
        let result = self.generate(&extracted, &directory);
        extracted.cleanup();
        result
    }

    fn generate(
        &self,
        extracted: &ExtractedArchive,
        directory: &[DirectoryEntry],
    ) -> Result<RunStats> {
        let files = extracted.log_files()?;
        if files.is_empty() {
            bail!(
                "no .tsv log files found in archive {}",
                self.archive_path.display()
            );
        }

        let mut log_parser = LogParser::new();
        let records = log_parser.produce_records(&files)?;
        let stats = log_parser.stats();
        let log_range = date_range(&records);

        let filtered = self.window.filter(records);
        info!(
            parsed = stats.parsed,
            dropped = stats.dropped,
            in_window = filtered.len(),
            "ingested daily logs"
        );

        let metrics = summary::aggregate_user_metrics(&filtered);
        let rows = summary::join_directory(metrics, directory);

        let report_path = self.report_destination();
        emitter::write_report(&rows, &report_path)?;

        Ok(RunStats {
            files: files.len(),
            parsed: stats.parsed,
            dropped: stats.dropped,
            filtered: filtered.len(),
            users: rows.len(),
            log_range,
            report_path,
        })
    }
}

fn date_range(records: &[LogRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let earliest = records.iter().map(|r| r.created_date).min()?;
    let latest = records.iter().map(|r| r.created_date).max()?;
    Some((earliest, latest))
}
