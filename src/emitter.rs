use crate::models::UsageReportRow;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Report header, matching the join's column order. Written explicitly so an
/// empty report still carries it.
const REPORT_HEADER: [&str; 7] = ["USER_ID", "Total", "Jobs", "Avg", "User_Name", "Email", "Org"];

/// Serialize the report to `dest` as UTF-8 CSV.
///
/// Rows are written to a temporary file in the destination directory and
/// persisted into place afterwards, so a failed run never leaves a
/// partially-written report that looks complete.
pub fn write_report(rows: &[UsageReportRow], dest: &Path) -> Result<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staging = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create report staging file in {}", dir.display()))?;

    {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut staging);
        writer
            .write_record(REPORT_HEADER)
            .context("failed to write report header")?;
        for row in rows {
            writer
                .serialize(row)
                .with_context(|| format!("failed to serialize report row for {}", row.user_id))?;
        }
        writer.flush().context("failed to flush report")?;
    }

    staging
        .persist(dest)
        .with_context(|| format!("failed to write report {}", dest.display()))?;

    info!(rows = rows.len(), "wrote usage report {}", dest.display());
    Ok(())
}
