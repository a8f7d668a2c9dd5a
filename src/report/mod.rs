//! Casino report data model
//!
//! A report covers one month of one year. Its `data` map is keyed by
//! `"<CASINO>_<METRIC_ID>"` and stores every value as a string, the way the
//! backend table does.

mod editor;
mod registry;

pub use editor::{ReportEditor, migrate_casino_keys};
pub use registry::{CasinoRegistry, DEFAULT_CASINOS};

use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use crate::utils::number::{parse_float, parse_int};

pub const DEFAULT_TEMPLATE_ID: i64 = 1;
pub const DEFAULT_TEMPLATE_NAME: &str = "Rapport Performances Mensuelles";

/// French month names, calendar order
pub const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Zero-based calendar index of a month name (case-insensitive)
pub fn month_index(name: &str) -> Option<usize> {
    let lower = name.trim().to_lowercase();
    MONTHS.iter().position(|m| *m == lower)
}

/// How a metric value is stored and displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Currency,
    Number,
    Text,
}

/// The five tracked metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Metric {
    TotalDeposit,
    Signup,
    Ftd,
    Ngr,
    Profits,
}

impl Metric {
    /// Identifier used in report keys, e.g. `TOTAL_DEPOSIT`
    pub fn id(&self) -> &'static str {
        match self {
            Self::TotalDeposit => "TOTAL_DEPOSIT",
            Self::Signup => "SIGNUP",
            Self::Ftd => "FTD",
            Self::Ngr => "NGR",
            Self::Profits => "PROFITS",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TotalDeposit => "TOTAL DEPOSIT",
            Self::Signup => "SIGNUP",
            Self::Ftd => "FTD",
            Self::Ngr => "NGR",
            Self::Profits => "PROFITS",
        }
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            Self::TotalDeposit | Self::Ngr | Self::Profits => MetricKind::Currency,
            Self::Signup | Self::Ftd => MetricKind::Number,
        }
    }

    /// Value written into a blank report
    pub fn zero_value(&self) -> &'static str {
        match self.kind() {
            MetricKind::Currency => "0.00",
            MetricKind::Number | MetricKind::Text => "0",
        }
    }

    /// `"<casino>_<metric id>"`
    pub fn key(&self, casino: &str) -> String {
        format!("{}_{}", casino, self.id())
    }

    pub fn all() -> impl Iterator<Item = Metric> {
        Metric::iter()
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for Metric {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");
        Metric::iter()
            .find(|m| m.id() == normalized)
            .ok_or_else(|| {
                format!(
                    "Invalid metric: '{}'. Valid: TOTAL_DEPOSIT, SIGNUP, FTD, NGR, PROFITS",
                    s
                )
            })
    }
}

/// One monthly report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasinoReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub template_id: i64,
    #[serde(default)]
    pub template_name: String,
    pub month: String,
    pub year: i32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl CasinoReport {
    /// Blank report for the current month, every registry casino zeroed
    pub fn new_for_current_month(registry: &CasinoRegistry, user_id: Option<String>) -> Self {
        let now = Utc::now();
        let month = MONTHS[now.month0() as usize].to_string();
        Self::blank(registry, month, now.year(), user_id)
    }

    /// Blank report for the given month and year
    pub fn blank(
        registry: &CasinoRegistry,
        month: impl Into<String>,
        year: i32,
        user_id: Option<String>,
    ) -> Self {
        let mut report = Self {
            id: None,
            user_id,
            template_id: DEFAULT_TEMPLATE_ID,
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            month: month.into(),
            year,
            created_at: Utc::now().to_rfc3339(),
            data: BTreeMap::new(),
        };
        for casino in registry.iter() {
            report.zero_casino(casino);
        }
        report
    }

    /// Insert zeroed values for one casino
    pub fn zero_casino(&mut self, casino: &str) {
        for metric in Metric::all() {
            self.data
                .insert(metric.key(casino), metric.zero_value().to_string());
        }
    }

    /// Raw stored value, if present
    pub fn raw_value(&self, casino: &str, metric: Metric) -> Option<&str> {
        self.data.get(&metric.key(casino)).map(String::as_str)
    }

    /// Numeric value of a metric; absent reads as 0, malformed reads as NaN
    pub fn value(&self, casino: &str, metric: Metric) -> f64 {
        let raw = self.raw_value(casino, metric).unwrap_or("0");
        match metric.kind() {
            MetricKind::Currency => parse_float(raw),
            MetricKind::Number | MetricKind::Text => parse_int(raw),
        }
    }

    /// Fill in the template stamp when the caller left it empty
    pub fn apply_template_defaults(&mut self) {
        if self.template_id == 0 {
            self.template_id = DEFAULT_TEMPLATE_ID;
        }
        if self.template_name.is_empty() {
            self.template_name = DEFAULT_TEMPLATE_NAME.to_string();
        }
    }

    /// Calendar index of the report month, `None` if the name is unknown
    pub fn month_index(&self) -> Option<usize> {
        month_index(&self.month)
    }

    /// `"<month> <year>"`
    pub fn period_label(&self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_ids_and_keys() {
        let ids: Vec<&str> = Metric::all().map(|m| m.id()).collect();
        assert_eq!(ids, vec!["TOTAL_DEPOSIT", "SIGNUP", "FTD", "NGR", "PROFITS"]);
        assert_eq!(Metric::Ftd.key("AZUR"), "AZUR_FTD");
        assert_eq!(Metric::TotalDeposit.as_ref(), "TOTAL_DEPOSIT");
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("total deposit".parse::<Metric>().unwrap(), Metric::TotalDeposit);
        assert_eq!("ngr".parse::<Metric>().unwrap(), Metric::Ngr);
        assert!("revenue".parse::<Metric>().is_err());
    }

    #[test]
    fn test_month_index() {
        assert_eq!(month_index("janvier"), Some(0));
        assert_eq!(month_index("Février"), Some(1));
        assert_eq!(month_index("décembre"), Some(11));
        assert_eq!(month_index("january"), None);
    }

    #[test]
    fn test_blank_report_zeroes_every_casino() {
        let registry = CasinoRegistry::default();
        let report = CasinoReport::blank(&registry, "mars", 2024, None);
        assert_eq!(report.data.len(), registry.len() * 5);
        assert_eq!(report.raw_value("AZUR", Metric::TotalDeposit), Some("0.00"));
        assert_eq!(report.raw_value("AZUR", Metric::Signup), Some("0"));
        assert_eq!(report.template_id, DEFAULT_TEMPLATE_ID);
        assert!(report.id.is_none());
    }

    #[test]
    fn test_new_for_current_month_uses_french_month() {
        let registry = CasinoRegistry::default();
        let report = CasinoReport::new_for_current_month(&registry, Some("user-1".into()));
        assert!(report.month_index().is_some());
        assert_eq!(report.year, Utc::now().year());
        assert_eq!(report.user_id.as_deref(), Some("user-1"));
    }

    #[test]
    fn test_value_absent_is_zero_and_malformed_is_nan() {
        let registry = CasinoRegistry::default();
        let mut report = CasinoReport::blank(&registry, "mai", 2024, None);
        assert_eq!(report.value("UNKNOWN", Metric::Ngr), 0.0);
        report
            .data
            .insert(Metric::Ngr.key("AZUR"), "n/a".to_string());
        assert!(report.value("AZUR", Metric::Ngr).is_nan());
        report
            .data
            .insert(Metric::Signup.key("AZUR"), "12.7".to_string());
        assert_eq!(report.value("AZUR", Metric::Signup), 12.0);
    }

    #[test]
    fn test_apply_template_defaults() {
        let json = r#"{"month":"mai","year":2024,"data":{}}"#;
        let mut report: CasinoReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.template_id, 0);
        report.apply_template_defaults();
        assert_eq!(report.template_id, 1);
        assert_eq!(report.template_name, DEFAULT_TEMPLATE_NAME);
    }

    #[test]
    fn test_serialization_skips_missing_id() {
        let registry = CasinoRegistry::default();
        let report = CasinoReport::blank(&registry, "mai", 2024, None);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["month"], "mai");
        assert_eq!(json["data"]["AZUR_FTD"], "0");
    }
}
