use anyhow::{Context, Result};
use glob::glob;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{info, warn};
use zip::ZipArchive;

/// A log package extracted into a scratch directory.
///
/// The directory lives until [`cleanup`](Self::cleanup) runs (or the value
/// drops); removal is best-effort and never fails the run.
#[derive(Debug)]
pub struct ExtractedArchive {
    root: TempDir,
}

impl ExtractedArchive {
    /// Open the ZIP at `archive_path` and extract it into a fresh temporary
    /// directory. The archive handle closes when this returns.
    pub fn extract(archive_path: &Path) -> Result<Self> {
        let file = File::open(archive_path)
            .with_context(|| format!("failed to open log archive {}", archive_path.display()))?;
        let mut archive = ZipArchive::new(file)
            .with_context(|| format!("failed to read log archive {}", archive_path.display()))?;

        let root = TempDir::new().context("failed to create extraction directory")?;
        archive
            .extract(root.path())
            .with_context(|| format!("failed to extract log archive {}", archive_path.display()))?;

        info!(
            entries = archive.len(),
            "extracted log archive {}",
            archive_path.display()
        );
        Ok(Self { root })
    }

    /// Discover the extracted daily log files. The original packages keep
    /// them under a `jobs/` subfolder; the recursive glob accepts flat and
    /// nested layouts alike. Sorted for a deterministic parse order.
    pub fn log_files(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.root.path().join("**").join("*.tsv");
        let mut files = Vec::new();
        for entry in
            glob(&pattern.to_string_lossy()).context("invalid log file discovery pattern")?
        {
            match entry {
                Ok(path) => files.push(path),
                Err(err) => warn!("skipping unreadable archive entry: {}", err),
            }
        }
        files.sort();
        Ok(files)
    }

    /// Remove the extracted files. Failure is logged, not propagated, so a
    /// stubborn temp directory cannot mask an already-written report.
    pub fn cleanup(self) {
        if let Err(err) = self.root.close() {
            warn!("failed to remove extracted log files: {}", err);
        }
    }
}
