//! 年度统计
//!
//! Year-level folds used by the dashboard: global totals, per-casino stats
//! with their monthly series, the 12-month breakdown and the per-year table.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Utc};
use serde::Serialize;

use super::totals::{ReportTotals, ratio};
use crate::report::{CasinoRegistry, CasinoReport, MONTHS, Metric};

/// 某个月份的数据点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    /// 月份序号（0 = janvier）
    pub month_index: usize,
    pub month: String,
    pub totals: ReportTotals,
}

impl MonthlyPoint {
    pub fn new(month_index: usize, totals: ReportTotals) -> Self {
        Self {
            month_index,
            month: MONTHS[month_index % 12].to_string(),
            totals,
        }
    }
}

/// 全部娱乐场的年度合计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualTotals {
    pub year: i32,
    pub totals: ReportTotals,
    /// 至少一个娱乐场存款为正的不同月份数
    pub months_with_deposit: usize,
    pub report_count: usize,
}

impl AnnualTotals {
    pub fn avg_monthly_deposit(&self) -> f64 {
        ratio(self.totals.total_deposit, self.months_with_deposit as f64)
    }
}

/// 单个娱乐场的年度统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CasinoAnnualStats {
    pub casino: String,
    pub totals: ReportTotals,
    pub months_with_deposit: usize,
    /// 仅包含有报表的月份，按月份顺序
    pub monthly: Vec<MonthlyPoint>,
}

impl CasinoAnnualStats {
    pub fn avg_monthly_deposit(&self) -> f64 {
        ratio(self.totals.total_deposit, self.months_with_deposit as f64)
    }

    /// `(month_index, value)` pairs for one metric
    pub fn series(&self, metric: Metric) -> Vec<(usize, f64)> {
        self.monthly
            .iter()
            .map(|p| (p.month_index, p.totals.get(metric)))
            .collect()
    }
}

/// 月度明细中的一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub month_index: usize,
    pub month: String,
    pub report_count: usize,
    pub totals: ReportTotals,
}

impl MonthSummary {
    pub fn has_data(&self) -> bool {
        self.report_count > 0
    }
}

/// 单个年份的合计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTotals {
    pub year: i32,
    pub totals: ReportTotals,
    pub report_count: usize,
}

fn reports_for_year(reports: &[CasinoReport], year: i32) -> impl Iterator<Item = &CasinoReport> {
    reports.iter().filter(move |r| r.year == year)
}

/// Totals over every registry casino for one year
pub fn annual_totals(reports: &[CasinoReport], registry: &CasinoRegistry, year: i32) -> AnnualTotals {
    let mut totals = ReportTotals::default();
    let mut deposit_months = BTreeSet::new();
    let mut report_count = 0;

    for report in reports_for_year(reports, year) {
        let report_totals = super::report_totals(report, registry);
        // 任一娱乐场存款为正即计入该月
        if registry
            .iter()
            .any(|casino| report.value(casino, Metric::TotalDeposit) > 0.0)
        {
            deposit_months.insert(report.month.to_lowercase());
        }
        totals.merge(&report_totals);
        report_count += 1;
    }

    AnnualTotals {
        year,
        totals,
        months_with_deposit: deposit_months.len(),
        report_count,
    }
}

/// Per-casino stats for one year, highest total deposit first
///
/// Reports whose month name is unknown still count towards the totals but
/// are left out of the monthly series.
pub fn casino_annual_stats(
    reports: &[CasinoReport],
    registry: &CasinoRegistry,
    year: i32,
) -> Vec<CasinoAnnualStats> {
    let year_reports: Vec<&CasinoReport> = reports_for_year(reports, year).collect();

    let mut stats: Vec<CasinoAnnualStats> = registry
        .iter()
        .map(|casino| {
            let mut totals = ReportTotals::default();
            let mut by_month: BTreeMap<usize, ReportTotals> = BTreeMap::new();
            let mut deposit_months = BTreeSet::new();

            for report in &year_reports {
                let mut point = ReportTotals::default();
                point.add_casino(report, casino);
                totals.merge(&point);
                if point.total_deposit > 0.0 {
                    deposit_months.insert(report.month.to_lowercase());
                }
                if let Some(index) = report.month_index() {
                    by_month.entry(index).or_default().merge(&point);
                }
            }

            CasinoAnnualStats {
                casino: casino.to_string(),
                totals,
                months_with_deposit: deposit_months.len(),
                monthly: by_month
                    .into_iter()
                    .map(|(index, totals)| MonthlyPoint::new(index, totals))
                    .collect(),
            }
        })
        .collect();

    stats.sort_by(|a, b| {
        b.totals
            .total_deposit
            .total_cmp(&a.totals.total_deposit)
    });
    stats
}

/// The 12 calendar months of a year with their totals
pub fn monthly_breakdown(
    reports: &[CasinoReport],
    registry: &CasinoRegistry,
    year: i32,
) -> Vec<MonthSummary> {
    let mut months: Vec<MonthSummary> = MONTHS
        .iter()
        .enumerate()
        .map(|(index, name)| MonthSummary {
            month_index: index,
            month: name.to_string(),
            report_count: 0,
            totals: ReportTotals::default(),
        })
        .collect();

    for report in reports_for_year(reports, year) {
        if let Some(index) = report.month_index() {
            let summary = &mut months[index];
            summary.report_count += 1;
            summary
                .totals
                .merge(&super::report_totals(report, registry));
        }
    }
    months
}

/// Totals per year, newest year first
pub fn yearly_totals(reports: &[CasinoReport], registry: &CasinoRegistry) -> Vec<YearTotals> {
    let mut by_year: BTreeMap<i32, YearTotals> = BTreeMap::new();
    for report in reports {
        let entry = by_year.entry(report.year).or_insert_with(|| YearTotals {
            year: report.year,
            totals: ReportTotals::default(),
            report_count: 0,
        });
        entry.totals.merge(&super::report_totals(report, registry));
        entry.report_count += 1;
    }
    by_year.into_values().rev().collect()
}

/// Distinct years present, newest first
pub fn available_years(reports: &[CasinoReport]) -> Vec<i32> {
    let years: BTreeSet<i32> = reports.iter().map(|r| r.year).collect();
    years.into_iter().rev().collect()
}

/// Most recent year with a report, or the current year when there are none
pub fn default_year(reports: &[CasinoReport]) -> i32 {
    available_years(reports)
        .first()
        .copied()
        .unwrap_or_else(|| Utc::now().year())
}
