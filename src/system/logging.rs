//! Logging system initialization
//!
//! This module provides functions to initialize the tracing/logging system
//! based on application configuration.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::StaticConfig;
use crate::errors::ReportError;

const DEFAULT_LOG_NAME: &str = "casino-reports.log";

/// Initialize logging system based on configuration
///
/// Console output goes to stderr so that command output on stdout stays
/// clean for piping.
///
/// # Returns
/// * `WorkerGuard` - Must be kept alive for the duration of the program
///   to ensure non-blocking log writes are flushed
pub fn init_logging(config: &StaticConfig) -> Result<WorkerGuard, ReportError> {
    let log_file = config
        .logging
        .file
        .as_deref()
        .filter(|f| !f.is_empty());

    let writer: Box<dyn std::io::Write + Send + Sync> = match log_file {
        Some(log_file) if config.logging.enable_rotation => {
            // Use rolling log files
            let path = Path::new(log_file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let filename = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or(DEFAULT_LOG_NAME);
            let appender = rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(filename.trim_end_matches(".log"))
                .filename_suffix("log")
                .max_log_files(config.logging.max_backups.max(1) as usize)
                .build(dir)
                .map_err(|e| {
                    ReportError::config(format!("Failed to create rolling log appender: {}", e))
                })?;
            Box::new(appender)
        }
        Some(log_file) => {
            // Non-rotating, append to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .map_err(|e| {
                    ReportError::file_operation(format!(
                        "Failed to open log file '{}': {}",
                        log_file, e
                    ))
                })?;
            Box::new(file)
        }
        None => Box::new(std::io::stderr()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_new(&config.logging.level)
        .map_err(|e| {
            ReportError::config(format!(
                "Invalid log level '{}': {}",
                config.logging.level, e
            ))
        })?;

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(log_file.is_none());

    let result = if config.logging.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    result.map_err(|e| ReportError::config(format!("Failed to install logger: {}", e)))?;

    Ok(guard)
}
