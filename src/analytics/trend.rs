//! 趋势计算

use std::fmt;

use serde::Serialize;

use super::annual::{MonthlyPoint, YearTotals};
use super::totals::ReportTotals;
use crate::report::Metric;
use crate::utils::format::format_percent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

impl TrendDirection {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Neutral => "→",
        }
    }
}

/// Percentage change between two values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trend {
    pub percent: f64,
    pub direction: TrendDirection,
}

impl Trend {
    pub fn neutral() -> Self {
        Self {
            percent: 0.0,
            direction: TrendDirection::Neutral,
        }
    }

    /// `(latest - previous) / previous * 100`; neutral 0 when `previous` is 0
    pub fn between(previous: f64, latest: f64) -> Self {
        if previous == 0.0 {
            return Self::neutral();
        }
        let percent = (latest - previous) / previous * 100.0;
        let direction = if percent > 0.0 {
            TrendDirection::Up
        } else if percent < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Neutral
        };
        Self { percent, direction }
    }

    /// Like [`between`](Self::between), but neutral unless `previous > 0`
    ///
    /// A zero or negative base has no meaningful percentage change.
    pub fn against_positive(previous: f64, latest: f64) -> Self {
        if previous > 0.0 {
            Self::between(previous, latest)
        } else {
            Self::neutral()
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.direction.symbol(), format_percent(self.percent))
    }
}

/// Trend of the last two points of a monthly series
///
/// The series is ordered by calendar month first; fewer than two points
/// yields a neutral trend.
pub fn calculate_trend(series: &[MonthlyPoint], metric: Metric) -> Trend {
    let mut points: Vec<&MonthlyPoint> = series.iter().collect();
    points.sort_by_key(|p| p.month_index);

    match points.as_slice() {
        [.., previous, latest] => Trend::between(previous.totals.get(metric), latest.totals.get(metric)),
        _ => Trend::neutral(),
    }
}

/// Growth of the newest year against the year listed after it
///
/// Expects the newest-first order returned by `yearly_totals`.
pub fn year_over_year_growth(years: &[YearTotals], metric: Metric) -> Trend {
    match years {
        [latest, previous, ..] => Trend::between(previous.totals.get(metric), latest.totals.get(metric)),
        _ => Trend::neutral(),
    }
}

/// 当前周期与上一周期的对比
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodComparison {
    pub current: ReportTotals,
    pub trends: Vec<(Metric, Trend)>,
    /// profits / deposits * 100
    pub profit_per_deposit: f64,
}

impl PeriodComparison {
    pub fn trend(&self, metric: Metric) -> Trend {
        self.trends
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, t)| *t)
            .unwrap_or_else(Trend::neutral)
    }
}

/// Compare a period's totals with the previous one; no previous period, or
/// a previous value that is not positive, gives a neutral trend.
pub fn period_comparison(current: &ReportTotals, previous: Option<&ReportTotals>) -> PeriodComparison {
    let trends = Metric::all()
        .map(|metric| {
            let trend = match previous {
                Some(prev) => Trend::against_positive(prev.get(metric), current.get(metric)),
                None => Trend::neutral(),
            };
            (metric, trend)
        })
        .collect();

    PeriodComparison {
        current: *current,
        trends,
        profit_per_deposit: current.profit_per_deposit(),
    }
}
