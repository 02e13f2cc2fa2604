//! Configuration
//!
//! Centralized configuration with:
//! - Runtime defaults
//! - Optional TOML config file loading
//! - Environment variable overrides
//! - Validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Report output configuration
    pub output: OutputConfig,

    /// Paths configuration
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File name of the emitted report, created next to the log archive.
    pub report_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub log_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "ERROR".to_string(),
                format: "pretty".to_string(),
                output: "console".to_string(),
            },
            output: OutputConfig {
                report_name: "usage_report.csv".to_string(),
            },
            paths: PathsConfig {
                log_directory: PathBuf::from("logs"),
            },
        }
    }
}

impl Config {
    /// Load configuration from file, environment, and defaults.
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        let config_paths = [
            PathBuf::from("geocoder-usage.toml"),
            PathBuf::from(".geocoder-usage.toml"),
            dirs::config_dir()
                .map(|d| d.join("geocoder-usage").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                info!(config_file = %path.display(), "Loading configuration from file");
                config = Self::load_from_file(path)?;
                break;
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("LOG_OUTPUT") {
            self.logging.output = val;
        }

        if let Ok(val) = env::var("GEOCODER_USAGE_REPORT_NAME") {
            self.output.report_name = val;
        }
        if let Ok(val) = env::var("GEOCODER_USAGE_LOG_DIR") {
            self.paths.log_directory = PathBuf::from(val);
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.output.report_name.is_empty() {
            return Err(anyhow::anyhow!("Report name must not be empty"));
        }
        if self.output.report_name.contains(std::path::is_separator) {
            return Err(anyhow::anyhow!(
                "Report name must be a bare file name, got {}",
                self.output.report_name
            ));
        }

        // The log directory is only needed when file output is on.
        if self.logging.output != "console" && !self.paths.log_directory.exists() {
            fs::create_dir_all(&self.paths.log_directory)
                .context("Failed to create log directory")?;
        }

        Ok(())
    }
}

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration instance
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| Config::load().expect("Failed to load configuration"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "ERROR");
        assert_eq!(config.logging.output, "console");
        assert_eq!(config.output.report_name, "usage_report.csv");
    }

    #[test]
    fn test_env_override() {
        env::set_var("GEOCODER_USAGE_REPORT_NAME", "summary.csv");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.output.report_name, "summary.csv");
        env::remove_var("GEOCODER_USAGE_REPORT_NAME");
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        config.output.report_name = String::new();
        assert!(config.validate().is_err());

        config.output.report_name = "sub/dir.csv".to_string();
        assert!(config.validate().is_err());
    }
}
