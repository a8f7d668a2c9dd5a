//! Report store layer
//!
//! CLI commands talk to reports through the [`ReportStore`] trait. Two
//! backends implement it:
//!
//! ```text
//! CLI → ReportStore ──→ HttpReportStore  (api.base_url configured)
//!                   └→ LocalReportStore (JSON file fallback)
//! ```
//!
//! Both apply the same server-side defaults on save: the template stamp is
//! filled in when missing and the returned record is the canonical one.
//! Each store accepts a single pending save at a time.

mod guard;
mod http;
mod local;

pub use guard::{SaveFlag, SaveGuard};
pub use http::HttpReportStore;
pub use local::LocalReportStore;

use tracing::debug;

use crate::config::StaticConfig;
use crate::errors::ReportError;
use crate::report::{CasinoRegistry, CasinoReport};

/// CRUD access to casino reports
pub trait ReportStore {
    /// Short backend name for log and status output
    fn backend_name(&self) -> &'static str;

    /// All reports, newest first
    fn fetch_reports(&self) -> Result<Vec<CasinoReport>, ReportError>;

    fn get_report(&self, id: i64) -> Result<CasinoReport, ReportError>;

    /// Create when `id` is `None`, update otherwise; returns the stored record
    fn save_report(&self, report: &CasinoReport) -> Result<CasinoReport, ReportError>;

    fn delete_report(&self, id: i64) -> Result<(), ReportError>;
}

/// Blank report for the current month, no I/O
pub fn create_new_report(registry: &CasinoRegistry, user_id: Option<String>) -> CasinoReport {
    CasinoReport::new_for_current_month(registry, user_id)
}

/// Pick the backend from configuration
pub fn create_store(config: &StaticConfig) -> Result<Box<dyn ReportStore>, ReportError> {
    if config.api.is_remote() {
        debug!("Using HTTP report store at {}", config.api.base_url);
        Ok(Box::new(HttpReportStore::new(
            &config.api.base_url,
            config.api.token.clone(),
            config.api.timeout_secs,
        )?))
    } else {
        debug!(
            "Using local report store at {}",
            config.storage.reports_file
        );
        Ok(Box::new(LocalReportStore::new(&config.storage.reports_file)))
    }
}
