//! Spreadsheet codec
//!
//! Two-way mapping between a report and a fixed-layout worksheet. The
//! layout module owns every position and sentinel both directions share.

mod export;
mod import;
pub mod layout;

pub use export::{export_to_dir, export_to_file, to_xlsx_bytes};
pub use import::{import_bytes, import_from_file, parse_grid, read_rows};
