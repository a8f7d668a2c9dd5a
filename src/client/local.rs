//! 本地 JSON 文件存储
//!
//! Used when no API base URL is configured. Mirrors the backend contract:
//! ids are assigned on create, the template stamp is filled in, and the
//! list comes back newest first.

use std::path::{Path, PathBuf};

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, info};

use super::ReportStore;
use super::guard::SaveFlag;
use crate::errors::ReportError;
use crate::report::CasinoReport;

pub struct LocalReportStore {
    path: PathBuf,
    // 文件读写串行化
    io_lock: Mutex<()>,
    save_flag: SaveFlag,
}

impl LocalReportStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            io_lock: Mutex::new(()),
            save_flag: SaveFlag::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<CasinoReport>, ReportError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            ReportError::file_operation(format!(
                "Failed to read reports file '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, reports: &[CasinoReport]) -> Result<(), ReportError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(reports)?;
        std::fs::write(&self.path, content).map_err(|e| {
            ReportError::file_operation(format!(
                "Failed to write reports file '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

/// Newest first: `created_at` descending, then id descending
fn sort_newest_first(reports: &mut [CasinoReport]) {
    reports.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

impl ReportStore for LocalReportStore {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    fn fetch_reports(&self) -> Result<Vec<CasinoReport>, ReportError> {
        let _lock = self.io_lock.lock();
        let mut reports = self.read_all()?;
        sort_newest_first(&mut reports);
        debug!("Loaded {} reports from {}", reports.len(), self.path.display());
        Ok(reports)
    }

    fn get_report(&self, id: i64) -> Result<CasinoReport, ReportError> {
        let _lock = self.io_lock.lock();
        self.read_all()?
            .into_iter()
            .find(|r| r.id == Some(id))
            .ok_or_else(|| ReportError::not_found(format!("Report {} not found", id)))
    }

    fn save_report(&self, report: &CasinoReport) -> Result<CasinoReport, ReportError> {
        self.save_flag.run(|| {
            let _lock = self.io_lock.lock();
            let mut reports = self.read_all()?;

            let mut saved = report.clone();
            saved.apply_template_defaults();
            if saved.created_at.is_empty() {
                saved.created_at = Utc::now().to_rfc3339();
            }

            match saved.id {
                Some(id) => {
                    let slot = reports
                        .iter_mut()
                        .find(|r| r.id == Some(id))
                        .ok_or_else(|| ReportError::not_found(format!("Report {} not found", id)))?;
                    *slot = saved.clone();
                }
                None => {
                    let next_id = reports.iter().filter_map(|r| r.id).max().unwrap_or(0) + 1;
                    saved.id = Some(next_id);
                    reports.push(saved.clone());
                }
            }

            self.write_all(&reports)?;
            info!(
                "Report saved: id={:?} period={}",
                saved.id,
                saved.period_label()
            );
            Ok(saved)
        })
    }

    fn delete_report(&self, id: i64) -> Result<(), ReportError> {
        let _lock = self.io_lock.lock();
        let mut reports = self.read_all()?;
        let before = reports.len();
        reports.retain(|r| r.id != Some(id));
        if reports.len() == before {
            return Err(ReportError::not_found(format!("Report {} not found", id)));
        }
        self.write_all(&reports)?;
        info!("Report deleted: id={}", id);
        Ok(())
    }
}
