use serde::Serialize;

use crate::report::{CasinoRegistry, CasinoReport, Metric};

/// 单份报表（或一组报表）的五项指标合计
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ReportTotals {
    pub total_deposit: f64,
    pub signup: f64,
    pub ftd: f64,
    pub ngr: f64,
    pub profits: f64,
}

impl ReportTotals {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::TotalDeposit => self.total_deposit,
            Metric::Signup => self.signup,
            Metric::Ftd => self.ftd,
            Metric::Ngr => self.ngr,
            Metric::Profits => self.profits,
        }
    }

    fn slot(&mut self, metric: Metric) -> &mut f64 {
        match metric {
            Metric::TotalDeposit => &mut self.total_deposit,
            Metric::Signup => &mut self.signup,
            Metric::Ftd => &mut self.ftd,
            Metric::Ngr => &mut self.ngr,
            Metric::Profits => &mut self.profits,
        }
    }

    /// Add one casino's values from a report
    pub fn add_casino(&mut self, report: &CasinoReport, casino: &str) {
        for metric in Metric::all() {
            *self.slot(metric) += report.value(casino, metric);
        }
    }

    pub fn merge(&mut self, other: &ReportTotals) {
        for metric in Metric::all() {
            *self.slot(metric) += other.get(metric);
        }
    }

    /// deposit / signup, 0 when there are no signups
    pub fn avg_deposit_per_signup(&self) -> f64 {
        ratio(self.total_deposit, self.signup)
    }

    /// deposit / ftd, 0 when there are no first deposits
    pub fn avg_deposit_per_ftd(&self) -> f64 {
        ratio(self.total_deposit, self.ftd)
    }

    /// ftd / signup * 100, 0 when there are no signups
    pub fn conversion_rate(&self) -> f64 {
        ratio(self.ftd, self.signup) * 100.0
    }

    /// profits / deposit * 100, 0 when nothing was deposited
    pub fn profit_per_deposit(&self) -> f64 {
        ratio(self.profits, self.total_deposit) * 100.0
    }
}

// NaN denominators fail the `> 0` test as well
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Sum one metric over every registry casino of one report
pub fn report_metric_total(report: &CasinoReport, registry: &CasinoRegistry, metric: Metric) -> f64 {
    registry.iter().map(|casino| report.value(casino, metric)).sum()
}

/// All five totals of one report over the registry casinos
pub fn report_totals(report: &CasinoReport, registry: &CasinoRegistry) -> ReportTotals {
    let mut totals = ReportTotals::default();
    for casino in registry.iter() {
        totals.add_casino(report, casino);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (CasinoReport, CasinoRegistry) {
        let registry = CasinoRegistry::default();
        let mut report = CasinoReport::blank(&registry, "mars", 2024, None);
        for (key, value) in [
            ("AZUR_TOTAL_DEPOSIT", "1000.50"),
            ("AZUR_SIGNUP", "10"),
            ("AZUR_FTD", "4"),
            ("BANZAI_TOTAL_DEPOSIT", "500"),
            ("BANZAI_SIGNUP", "5"),
            ("BANZAI_PROFITS", "-20.25"),
        ] {
            report.data.insert(key.to_string(), value.to_string());
        }
        (report, registry)
    }

    #[test]
    fn test_metric_total_matches_per_casino_sum() {
        let (report, registry) = sample();
        let manual: f64 = registry
            .iter()
            .map(|c| report.value(c, Metric::TotalDeposit))
            .sum();
        assert_eq!(
            report_metric_total(&report, &registry, Metric::TotalDeposit),
            manual
        );
        assert_eq!(manual, 1500.5);
    }

    #[test]
    fn test_report_totals() {
        let (report, registry) = sample();
        let totals = report_totals(&report, &registry);
        assert_eq!(totals.total_deposit, 1500.5);
        assert_eq!(totals.signup, 15.0);
        assert_eq!(totals.ftd, 4.0);
        assert_eq!(totals.profits, -20.25);
        assert_eq!(totals.ngr, 0.0);
    }

    #[test]
    fn test_casinos_outside_registry_are_ignored() {
        let (mut report, registry) = sample();
        report
            .data
            .insert("GHOST_TOTAL_DEPOSIT".to_string(), "9999".to_string());
        assert_eq!(
            report_metric_total(&report, &registry, Metric::TotalDeposit),
            1500.5
        );
    }

    #[test]
    fn test_nan_propagates_through_sum() {
        let (mut report, registry) = sample();
        report
            .data
            .insert("AZUR_NGR".to_string(), "not a number".to_string());
        assert!(report_metric_total(&report, &registry, Metric::Ngr).is_nan());
        assert!(report_totals(&report, &registry).ngr.is_nan());
    }

    #[test]
    fn test_ratios_guard_zero_denominator() {
        let totals = ReportTotals {
            total_deposit: 100.0,
            ..Default::default()
        };
        assert_eq!(totals.conversion_rate(), 0.0);
        assert_eq!(totals.avg_deposit_per_signup(), 0.0);
        assert_eq!(totals.avg_deposit_per_ftd(), 0.0);

        let nan_signup = ReportTotals {
            signup: f64::NAN,
            ftd: 3.0,
            ..Default::default()
        };
        assert_eq!(nan_signup.conversion_rate(), 0.0);
    }

    #[test]
    fn test_ratios() {
        let totals = ReportTotals {
            total_deposit: 1000.0,
            signup: 20.0,
            ftd: 5.0,
            ngr: 0.0,
            profits: 150.0,
        };
        assert_eq!(totals.avg_deposit_per_signup(), 50.0);
        assert_eq!(totals.avg_deposit_per_ftd(), 200.0);
        assert_eq!(totals.conversion_rate(), 25.0);
        assert_eq!(totals.profit_per_deposit(), 15.0);
    }
}
