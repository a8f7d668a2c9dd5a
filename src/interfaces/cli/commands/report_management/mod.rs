//! Report management commands
//!
//! This module provides CLI commands for listing, creating, editing and
//! deleting stored reports.

mod edit;
mod list;

pub use edit::{delete_report, new_report, set_value};
pub use list::{list_reports, show_report};
