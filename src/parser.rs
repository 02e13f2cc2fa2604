use crate::models::{DirectoryEntry, LogRecord, RawLogRow};
use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Columns a daily log file must carry. The full schema has ten columns;
/// these are the ones the pipeline consumes.
const REQUIRED_LOG_COLUMNS: [&str; 4] = ["ID", "USER_ID", "WHEN_CREATED", "NUM_SUBMITTED_REQUESTS"];

/// Counters accumulated while ingesting log files.
#[derive(Debug, Default, Clone, Copy)]
pub struct IngestStats {
    /// Rows successfully coerced into [`LogRecord`]s.
    pub parsed: usize,
    /// Rows dropped by numeric/date coercion or row-shape errors.
    pub dropped: usize,
}

/// Ingests daily TSV log files into typed records.
///
/// Each file is parsed independently against its own header, so the header
/// rows that plagued the concatenate-then-parse approach never reach the
/// data path. Remaining malformed rows are dropped silently and counted.
pub struct LogParser {
    stats: IngestStats,
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LogParser {
    pub fn new() -> Self {
        Self {
            stats: IngestStats::default(),
        }
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Parse every discovered log file, in order, into one record sequence.
    pub fn produce_records(&mut self, files: &[PathBuf]) -> Result<Vec<LogRecord>> {
        let mut records = Vec::new();
        for file in files {
            self.parse_log_file(file, &mut records)?;
        }
        Ok(records)
    }

    fn parse_log_file(&mut self, path: &Path, out: &mut Vec<LogRecord>) -> Result<()> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;

        // Fail fast on schema drift instead of silently misaligning columns.
        let headers = reader
            .headers()
            .with_context(|| format!("failed to read header of log file {}", path.display()))?
            .clone();
        for column in REQUIRED_LOG_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                bail!(
                    "log file {} is missing required column {}",
                    path.display(),
                    column
                );
            }
        }

        for result in reader.deserialize::<RawLogRow>() {
            match result {
                Ok(raw) => match LogRecord::from_raw(raw) {
                    Some(record) => {
                        self.stats.parsed += 1;
                        out.push(record);
                    }
                    None => self.stats.dropped += 1,
                },
                Err(err) => {
                    self.stats.dropped += 1;
                    debug!("dropping unreadable row in {}: {}", path.display(), err);
                }
            }
        }

        Ok(())
    }
}

/// Load the user directory lookup table (comma-delimited, header
/// `USER_ID, User_Name, Email, Org`). Reference data is caller-supplied, so
/// a malformed row here is an error, not something to drop.
pub fn load_directory(path: &Path) -> Result<Vec<DirectoryEntry>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open directory lookup table {}", path.display()))?;

    let mut entries = Vec::new();
    for result in reader.deserialize::<DirectoryEntry>() {
        let entry = result
            .with_context(|| format!("malformed row in directory lookup table {}", path.display()))?;
        entries.push(entry);
    }
    Ok(entries)
}
