use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::debug;

use geocoder_usage::analyzer::UsageReportAnalyzer;
use geocoder_usage::display::DisplayManager;
use geocoder_usage::logging;
use geocoder_usage::window::ReportWindow;

#[derive(Parser)]
#[command(name = "geocoder-usage")]
#[command(about = "Per-user usage summary reports from geocoder batch job logs")]
#[command(version = "1.0.0")]
struct Cli {
    /// Service API key (accepted for operator workflows, unused by the report pipeline)
    #[arg(value_name = "API_KEY")]
    api_key: String,
    /// Path to the user directory lookup table (CSV)
    #[arg(value_name = "LOOKUP_CSV")]
    lookup_table: PathBuf,
    /// Path to the ZIP archive of daily TSV log files
    #[arg(value_name = "LOG_ARCHIVE")]
    archive: PathBuf,
    /// Inclusive report window start (YYYY-MM-DD)
    #[arg(value_name = "START_DATE")]
    start_date: String,
    /// Inclusive report window end (YYYY-MM-DD)
    #[arg(value_name = "END_DATE")]
    end_date: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logging_guard = logging::init_logging();

    debug!(
        api_key_present = !cli.api_key.is_empty(),
        "starting usage report run"
    );

    // An unparseable window aborts before the archive is touched.
    let window = match ReportWindow::parse(&cli.start_date, &cli.end_date) {
        Ok(window) => window,
        Err(e) => return handle_error(e),
    };

    let analyzer = UsageReportAnalyzer::new(cli.lookup_table, cli.archive, window);
    match analyzer.run() {
        Ok(stats) => {
            DisplayManager::new().display_run(&stats, &window);
            Ok(())
        }
        Err(e) => handle_error(e),
    }
}

fn handle_error(e: anyhow::Error) -> Result<()> {
    eprintln!("Error: {:#}", e);
    process::exit(1);
}
