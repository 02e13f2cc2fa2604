//! Geocoder Usage Library
//!
//! Batch analysis of geocoding-service job logs: extract a ZIP of daily TSV
//! logs, filter the job records to an inclusive calendar-date window,
//! aggregate per-user metrics, join against a user directory, and emit a
//! single CSV usage report.
//!
//! ## Pipeline
//!
//! The data flows through one strictly sequential pass:
//!
//! 1. [`archive`] - extract the log package into a scratch directory
//! 2. [`parser`] - parse daily TSV files into typed [`models::LogRecord`]s,
//!    dropping malformed rows
//! 3. [`window`] - retain records inside the inclusive `[start, end]` window
//! 4. [`summary`] - aggregate per-user metrics and left-join the directory
//! 5. [`emitter`] - atomically write the CSV report
//!
//! [`analyzer::UsageReportAnalyzer`] wires the stages together;
//! [`display::DisplayManager`] prints the operator-facing run summary.
//!
//! ## Usage Example
//!
//! ```no_run
//! use geocoder_usage::analyzer::UsageReportAnalyzer;
//! use geocoder_usage::window::ReportWindow;
//! use std::path::PathBuf;
//!
//! # fn example() -> anyhow::Result<()> {
//! let window = ReportWindow::parse("2019-08-25", "2019-10-25")?;
//! let analyzer = UsageReportAnalyzer::new(
//!     PathBuf::from("users.csv"),
//!     PathBuf::from("logs.zip"),
//!     window,
//! );
//! let stats = analyzer.run()?;
//! println!("{} users in range", stats.users);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod archive;
pub mod config;
pub mod display;
pub mod emitter;
pub mod logging;
pub mod models;
pub mod parser;
pub mod summary;
pub mod window;

pub use analyzer::UsageReportAnalyzer;
pub use models::*;
