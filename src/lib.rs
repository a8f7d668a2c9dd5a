//! casino-reports - Monthly casino-affiliate performance reports
//!
//! This library provides the core functionality for recording monthly
//! per-casino figures, aggregating them into dashboard statistics and
//! moving them in and out of spreadsheets.
//!
//! # Features
//! - **cli**: Command-line interface and the `cli`/`interfaces` modules (default)
//!
//! # Architecture
//! - `report`: Report model, casino registry and in-memory editing
//! - `client`: Report stores (remote REST API or local JSON file)
//! - `analytics`: Totals, annual statistics and trends
//! - `spreadsheet`: `.xlsx` export and `.xlsx`/`.xls` import
//! - `interfaces`: Command-line interface (requires `cli`)
//! - `config`: Configuration management
//! - `system`: Logging setup

pub mod analytics;
#[cfg(feature = "cli")]
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
#[cfg(feature = "cli")]
pub mod interfaces;
pub mod report;
pub mod spreadsheet;
pub mod system;
pub mod utils;
