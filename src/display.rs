//! Terminal Run Summary
//!
//! Human-readable wrap-up of a completed run: how many rows were ingested
//! and dropped, the date span present in the logs, the requested window,
//! and where the report landed. The report file itself is the machine
//! output; everything here is operator feedback.

use crate::analyzer::RunStats;
use crate::window::ReportWindow;
use colored::Colorize;

pub struct DisplayManager;

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayManager {
    pub fn new() -> Self {
        Self
    }

    pub fn display_run(&self, stats: &RunStats, window: &ReportWindow) {
        println!("\n{}", "=".repeat(72).bright_cyan());
        println!("{}", "Geocoder Usage Report".bright_white().bold());
        println!("{}", "=".repeat(72).bright_cyan());

        if let Some((earliest, latest)) = stats.log_range {
            println!(
                "\n{} log records span {} to {}",
                "📅".bright_blue(),
                earliest.to_string().bright_white().bold(),
                latest.to_string().bright_white().bold()
            );
        }
        println!(
            "{} report window {} to {}",
            "📅".bright_blue(),
            window.start.to_string().bright_white().bold(),
            window.end.to_string().bright_white().bold()
        );

        println!(
            "\n{} {} files • {} records ({} dropped) • {} in window",
            "📊".bright_yellow(),
            stats.files.to_string().bright_white().bold(),
            stats.parsed.to_string().bright_white().bold(),
            stats.dropped.to_string().bright_yellow(),
            stats.filtered.to_string().bright_white().bold()
        );
        println!(
            "{} {} unique users in range",
            "📊".bright_yellow(),
            stats.users.to_string().bright_white().bold()
        );

        if stats.users == 0 {
            println!(
                "\n{}",
                "No activity in the report window; report contains the header only.".yellow()
            );
        }

        println!(
            "\n{} report written to {}",
            "✅".bright_green(),
            stats.report_path.display().to_string().bright_green().bold()
        );
    }
}
