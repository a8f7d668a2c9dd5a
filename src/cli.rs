//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for casino-reports using clap's
//! derive macros.

use clap::{Parser, Subcommand};

/// casino-reports - Monthly casino-affiliate performance reports
#[derive(Parser)]
#[command(name = "casino-reports")]
#[command(version)]
#[command(about = "Record, analyse and export monthly casino performance reports", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List stored reports, newest first
    List {
        /// Only reports of this year
        #[arg(long)]
        year: Option<i32>,
    },

    /// Show one report with per-casino values and totals
    Show {
        /// Report id
        id: i64,
    },

    /// Create a blank report (current month unless given) and save it
    New {
        /// French month name (e.g. "février")
        #[arg(long)]
        month: Option<String>,

        /// Year (e.g. 2024)
        #[arg(long)]
        year: Option<i32>,

        /// Owning user id
        #[arg(long)]
        user: Option<String>,
    },

    /// Set one metric of one casino in a stored report
    ///
    /// Usage: set <ID> <CASINO> <METRIC> <VALUE>
    /// METRIC is one of TOTAL_DEPOSIT, SIGNUP, FTD, NGR, PROFITS
    Set {
        /// Report id
        id: i64,

        /// Casino name as listed by `casino list`
        casino: String,

        /// Metric identifier
        metric: String,

        /// New value; amounts accept a decimal comma
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Delete a report
    Delete {
        /// Report id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Export a report to Rapport_<month>_<year>.xlsx
    Export {
        /// Report id
        id: i64,

        /// Output directory or .xlsx file path (default: current directory)
        #[arg(long, short = 'o')]
        output: Option<String>,
    },

    /// Import a report from an .xlsx/.xls file
    Import {
        /// Input file path
        file_path: String,

        /// Save the imported report to the store
        #[arg(long)]
        save: bool,
    },

    /// Dashboard statistics for a year
    Stats {
        /// Year to analyse (default: most recent year with reports)
        #[arg(long)]
        year: Option<i32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the casino list
    Casino {
        #[command(subcommand)]
        action: CasinoCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Casino list commands
#[derive(Subcommand)]
pub enum CasinoCommands {
    /// List casinos in report order
    List,

    /// Add a casino (name is upper-cased)
    Add {
        name: String,
    },

    /// Remove a casino from the list; stored report values are kept
    Remove {
        name: String,
    },

    /// Rename a casino
    Rename {
        old_name: String,

        new_name: String,

        /// Also move stored report values to the new name
        #[arg(long)]
        migrate: bool,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}
