//! In-memory report editing
//!
//! Changes stay local until the caller saves the report through a
//! `ReportStore`. Every value entering here is parsed strictly; the stored
//! string is the canonical rendering of the parsed number.

use tracing::debug;

use super::{CasinoRegistry, CasinoReport, Metric, MetricKind, month_index};
use crate::analytics::{ReportTotals, report_totals};
use crate::errors::ReportError;
use crate::utils::number::{parse_amount_strict, parse_count_strict};

#[derive(Debug, Clone)]
pub struct ReportEditor {
    report: CasinoReport,
    dirty: bool,
}

impl ReportEditor {
    pub fn new(report: CasinoReport) -> Self {
        Self {
            report,
            dirty: false,
        }
    }

    pub fn report(&self) -> &CasinoReport {
        &self.report
    }

    pub fn into_report(self) -> CasinoReport {
        self.report
    }

    /// `true` once any field changed since construction or the last save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace the draft with the record the server returned
    pub fn mark_saved(&mut self, saved: CasinoReport) {
        self.report = saved;
        self.dirty = false;
    }

    /// Set one metric from user input
    ///
    /// Currency accepts a decimal comma and is stored with two decimals;
    /// counts must be non-negative integers.
    pub fn set_value(&mut self, casino: &str, metric: Metric, input: &str) -> Result<(), ReportError> {
        let stored = match metric.kind() {
            MetricKind::Currency => format!("{:.2}", parse_amount_strict(input)?),
            MetricKind::Number => parse_count_strict(input)?.to_string(),
            MetricKind::Text => input.trim().to_string(),
        };
        debug!("Editor: {} = {}", metric.key(casino), stored);
        self.report.data.insert(metric.key(casino), stored);
        self.dirty = true;
        Ok(())
    }

    pub fn set_month(&mut self, month: &str) -> Result<(), ReportError> {
        let index = month_index(month)
            .ok_or_else(|| ReportError::validation(format!("Unknown month: '{}'", month)))?;
        self.report.month = super::MONTHS[index].to_string();
        self.dirty = true;
        Ok(())
    }

    pub fn set_year(&mut self, year: i32) -> Result<(), ReportError> {
        if !(1970..=9999).contains(&year) {
            return Err(ReportError::validation(format!("Invalid year: {}", year)));
        }
        self.report.year = year;
        self.dirty = true;
        Ok(())
    }

    /// Register a new casino and zero its fields in this report
    pub fn add_casino(&mut self, registry: &mut CasinoRegistry, input: &str) -> Result<String, ReportError> {
        let name = registry.add_validated(input)?;
        self.report.zero_casino(&name);
        self.dirty = true;
        Ok(name)
    }

    /// Rename a casino and carry its values to the new keys
    pub fn rename_casino(
        &mut self,
        registry: &mut CasinoRegistry,
        old: &str,
        new_input: &str,
    ) -> Result<String, ReportError> {
        let new_name = registry.rename(old, new_input)?;
        if new_name != old {
            migrate_casino_keys(&mut self.report, old, &new_name);
            self.dirty = true;
        }
        Ok(new_name)
    }

    /// Unregister a casino and drop its values from this report
    pub fn remove_casino(&mut self, registry: &mut CasinoRegistry, name: &str) -> Result<(), ReportError> {
        if !registry.remove(name) {
            return Err(ReportError::not_found(format!("Casino '{}' not found", name)));
        }
        for metric in Metric::all() {
            self.report.data.remove(&metric.key(name));
        }
        self.dirty = true;
        Ok(())
    }

    /// Live totals over the registry casinos
    pub fn totals(&self, registry: &CasinoRegistry) -> ReportTotals {
        report_totals(&self.report, registry)
    }
}

/// Move `<old>_<METRIC>` values to `<new>_<METRIC>`; absent keys are skipped
pub fn migrate_casino_keys(report: &mut CasinoReport, old: &str, new: &str) {
    for metric in Metric::all() {
        if let Some(value) = report.data.remove(&metric.key(old)) {
            report.data.insert(metric.key(new), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> (ReportEditor, CasinoRegistry) {
        let registry = CasinoRegistry::default();
        let report = CasinoReport::blank(&registry, "avril", 2024, None);
        (ReportEditor::new(report), registry)
    }

    #[test]
    fn test_set_value_canonicalizes() {
        let (mut ed, _) = editor();
        ed.set_value("AZUR", Metric::TotalDeposit, "1234,5").unwrap();
        ed.set_value("AZUR", Metric::Signup, " 12 ").unwrap();
        assert_eq!(ed.report().raw_value("AZUR", Metric::TotalDeposit), Some("1234.50"));
        assert_eq!(ed.report().raw_value("AZUR", Metric::Signup), Some("12"));
        assert!(ed.is_dirty());
    }

    #[test]
    fn test_set_value_rejects_garbage_without_mutation() {
        let (mut ed, _) = editor();
        assert!(ed.set_value("AZUR", Metric::Ngr, "12abc").is_err());
        assert!(ed.set_value("AZUR", Metric::Ftd, "-2").is_err());
        assert_eq!(ed.report().raw_value("AZUR", Metric::Ngr), Some("0.00"));
        assert!(!ed.is_dirty());
    }

    #[test]
    fn test_set_month_and_year() {
        let (mut ed, _) = editor();
        ed.set_month("Février").unwrap();
        assert_eq!(ed.report().month, "février");
        assert!(ed.set_month("february").is_err());
        ed.set_year(2025).unwrap();
        assert!(ed.set_year(12).is_err());
        assert_eq!(ed.report().year, 2025);
    }

    #[test]
    fn test_add_casino_zeroes_fields() {
        let (mut ed, mut registry) = editor();
        let name = ed.add_casino(&mut registry, "lucky").unwrap();
        assert_eq!(name, "LUCKY");
        assert_eq!(ed.report().raw_value("LUCKY", Metric::Profits), Some("0.00"));
        assert!(ed.add_casino(&mut registry, "LUCKY").is_err());
    }

    #[test]
    fn test_rename_casino_migrates_keys() {
        let (mut ed, mut registry) = editor();
        ed.set_value("AZUR", Metric::TotalDeposit, "500").unwrap();
        let before = ed.totals(&registry);

        ed.rename_casino(&mut registry, "AZUR", "azur palace").unwrap();
        assert!(ed.report().raw_value("AZUR", Metric::TotalDeposit).is_none());
        assert_eq!(
            ed.report().raw_value("AZUR PALACE", Metric::TotalDeposit),
            Some("500.00")
        );
        assert_eq!(ed.totals(&registry), before);
    }

    #[test]
    fn test_remove_casino_drops_keys() {
        let (mut ed, mut registry) = editor();
        ed.remove_casino(&mut registry, "BANZAI").unwrap();
        assert!(ed.report().raw_value("BANZAI", Metric::Ftd).is_none());
        assert!(ed.remove_casino(&mut registry, "BANZAI").is_err());
    }

    #[test]
    fn test_mark_saved_clears_dirty() {
        let (mut ed, _) = editor();
        ed.set_value("AZUR", Metric::Ftd, "3").unwrap();
        let mut saved = ed.report().clone();
        saved.id = Some(7);
        ed.mark_saved(saved);
        assert!(!ed.is_dirty());
        assert_eq!(ed.report().id, Some(7));
    }
}
