//! 报表统计
//!
//! Pure folds over report slices. Nothing here mutates a report or touches
//! the network; malformed stored values surface as `NaN` in the results.

mod annual;
mod totals;
mod trend;

pub use annual::{
    AnnualTotals, CasinoAnnualStats, MonthSummary, MonthlyPoint, YearTotals, annual_totals,
    available_years, casino_annual_stats, default_year, monthly_breakdown, yearly_totals,
};
pub use totals::{ReportTotals, report_metric_total, report_totals};
pub use trend::{
    PeriodComparison, Trend, TrendDirection, calculate_trend, period_comparison,
    year_over_year_growth,
};
