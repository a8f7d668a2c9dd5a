//! CLI interface module
//!
//! This module provides command-line interface functionality for
//! casino-reports.

pub mod commands;
mod context;

pub use context::CliContext;

use std::fmt;
use std::sync::Arc;

use crate::cli::{CasinoCommands, Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::ReportError;
use commands::{
    casino_add, casino_list, casino_remove, casino_rename, config_generate, delete_report,
    export_report, import_report, list_reports, new_report, set_value, show_report, show_stats,
};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<ReportError> for CliError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Validation(_) => CliError::ParseError(err.message().to_string()),
            ReportError::Http(_)
            | ReportError::Server { .. }
            | ReportError::FileOperation(_)
            | ReportError::Serialization(_) => CliError::StorageError(err.to_string()),
            _ => CliError::CommandError(err.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub fn run_cli_command(cmd: Commands, config: Arc<StaticConfig>) -> Result<(), CliError> {
    // Generate doesn't need a store or registry
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return config_generate(output_path, force);
    }

    let mut ctx = CliContext::from_config(config)?;

    match cmd {
        Commands::List { year } => list_reports(&ctx, year),

        Commands::Show { id } => show_report(&ctx, id),

        Commands::New { month, year, user } => new_report(&ctx, month, year, user),

        Commands::Set {
            id,
            casino,
            metric,
            value,
        } => set_value(&ctx, id, &casino, &metric, &value),

        Commands::Delete { id, force } => delete_report(&ctx, id, force),

        Commands::Export { id, output } => export_report(&ctx, id, output),

        Commands::Import { file_path, save } => import_report(&mut ctx, &file_path, save),

        Commands::Stats { year, json } => show_stats(&ctx, year, json),

        Commands::Casino { action } => match action {
            CasinoCommands::List => casino_list(&ctx),
            CasinoCommands::Add { name } => casino_add(&mut ctx, &name),
            CasinoCommands::Remove { name } => casino_remove(&mut ctx, &name),
            CasinoCommands::Rename {
                old_name,
                new_name,
                migrate,
            } => casino_rename(&mut ctx, &old_name, &new_name, migrate),
        },

        Commands::Config { .. } => unreachable!("handled above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_parse_error() {
        let err: CliError = ReportError::validation("Invalid amount: 'x'").into();
        match err {
            CliError::ParseError(msg) => assert_eq!(msg, "Invalid amount: 'x'"),
            other => panic!("Expected ParseError, got: {:?}", other),
        }
    }

    #[test]
    fn test_network_maps_to_storage_error() {
        let err: CliError = ReportError::server(500, "boom").into();
        assert!(matches!(err, CliError::StorageError(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_other_errors_map_to_command_error() {
        let err: CliError = ReportError::not_found("Report 3 not found").into();
        assert!(matches!(err, CliError::CommandError(_)));
    }

    #[test]
    fn test_format_simple() {
        assert_eq!(
            CliError::ParseError("bad".into()).format_simple(),
            "Parse error: bad"
        );
    }
}
