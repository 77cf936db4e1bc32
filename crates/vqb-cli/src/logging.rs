//! Logging setup for the `vqb` binary
//!
//! Library crates only emit `tracing` events; this module installs the
//! subscriber. Console output goes to stderr so stdout stays valid JSON.
//! An optional JSON layer writes daily rolling files for bug reports.
//! `RUST_LOG` overrides the configured filter.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "vqb.log";

/// Logging section of the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset
    pub filter: String,
    /// Write JSON logs to daily rolling files
    pub json_file: bool,
    /// Directory for JSON log files
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            json_file: false,
            log_dir: None,
        }
    }
}

/// Resolved logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_dir: PathBuf,
    pub enable_json_logs: bool,
    pub enable_console_logs: bool,
    /// Include file/line information in console output
    pub include_location: bool,
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: log_directory(),
            enable_json_logs: false,
            enable_console_logs: true,
            include_location: false,
            default_filter: "warn".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Debug output from every pipeline crate
    pub fn verbose() -> Self {
        Self {
            include_location: cfg!(debug_assertions),
            default_filter: "info,vqb_cli=debug,vqb_core=debug,vqb_analyzer=debug,vqb_predictor=debug"
                .to_string(),
            ..Self::default()
        }
    }

    /// Builds the runtime config from the config file section. `--verbose`
    /// replaces the configured filter.
    pub fn from_settings(settings: &LoggingSettings, verbose: bool) -> Self {
        let mut config = if verbose {
            Self::verbose()
        } else {
            Self {
                default_filter: settings.filter.clone(),
                ..Self::default()
            }
        };
        config.enable_json_logs = settings.json_file;
        if let Some(dir) = &settings.log_dir {
            config.log_dir = dir.clone();
        }
        config
    }
}

/// Installs the global subscriber.
///
/// The returned guard flushes the JSON file writer on drop and must be held
/// until the program exits.
pub fn init(config: LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let mut layers = Vec::new();
    let mut guard = None;

    if config.enable_console_logs {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .with_filter(env_filter.clone())
            .boxed();

        layers.push(console_layer);
    }

    if config.enable_json_logs {
        std::fs::create_dir_all(&config.log_dir)?;

        let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);

        let json_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .json()
            .with_current_span(true)
            .with_writer(non_blocking)
            .with_filter(env_filter)
            .boxed();

        layers.push(json_layer);
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    tracing::debug!(
        log_dir = %config.log_dir.display(),
        json_enabled = config.enable_json_logs,
        console_enabled = config.enable_console_logs,
        "Logging system initialized"
    );

    Ok(guard)
}

/// Default directory for JSON log files
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vqb")
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert!(config.enable_console_logs);
        assert!(!config.enable_json_logs);
        assert_eq!(config.default_filter, "warn");
    }

    #[test]
    fn test_verbose_overrides_configured_filter() {
        let settings = LoggingSettings {
            filter: "error".to_string(),
            ..Default::default()
        };

        assert_eq!(LoggingConfig::from_settings(&settings, false).default_filter, "error");
        assert!(
            LoggingConfig::from_settings(&settings, true)
                .default_filter
                .contains("vqb_predictor=debug")
        );
    }

    #[test]
    fn test_settings_enable_json_file() {
        let settings = LoggingSettings {
            json_file: true,
            log_dir: Some(PathBuf::from("/var/log/vqb")),
            ..Default::default()
        };

        let config = LoggingConfig::from_settings(&settings, false);
        assert!(config.enable_json_logs);
        assert_eq!(config.log_dir, PathBuf::from("/var/log/vqb"));
    }
}
