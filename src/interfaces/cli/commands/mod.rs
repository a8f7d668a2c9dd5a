//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod casino_management;
mod config_gen;
mod helpers;
mod import_export;
mod report_management;
mod stats;

pub use casino_management::{casino_add, casino_list, casino_remove, casino_rename};
pub use config_gen::config_generate;
pub use import_export::{export_report, import_report};
pub use report_management::{delete_report, list_reports, new_report, set_value, show_report};
pub use stats::{build_stats, show_stats};
