//! 表格布局
//!
//! The exported sheet is a positional contract read back by the importer:
//!
//! ```text
//! 0  Rapport mensuel - <month> <year>
//! 1
//! 2  CASINO | TOTAL DEPOSIT | SIGNUP | FTD | | DEPOSIT/SIGNUP | DEPOSIT/FTD |
//! 3… one row per casino
//!    TOTAL : | …
//!
//!    CASINO | NGR | PROFITS
//!    one row per casino
//!    TOTAL : | …
//! ```

use crate::analytics::{ReportTotals, report_totals};
use crate::report::{CasinoRegistry, CasinoReport};
use crate::utils::format::format_euro_cell;

pub const TITLE_PREFIX: &str = "Rapport mensuel - ";
pub const TOTAL_LABEL: &str = "TOTAL :";
pub const CASINO_HEADER: &str = "CASINO";

pub const DEPOSIT_SECTION_HEADER: [&str; 8] = [
    CASINO_HEADER,
    "TOTAL DEPOSIT",
    "SIGNUP",
    "FTD",
    "",
    "DEPOSIT/SIGNUP",
    "DEPOSIT/FTD",
    "",
];
pub const REVENUE_SECTION_HEADER: [&str; 3] = [CASINO_HEADER, "NGR", "PROFITS"];

/// First data row of the deposit section
pub const DEPOSIT_SECTION_FIRST_ROW: usize = 3;
/// Minimum cells of a deposit-section data row
pub const DEPOSIT_ROW_MIN_CELLS: usize = 4;
/// Minimum cells of a revenue-section data row
pub const REVENUE_ROW_MIN_CELLS: usize = 3;

pub const COLUMN_WIDTHS: [f64; 7] = [20.0, 15.0, 10.0, 10.0, 5.0, 15.0, 15.0];

pub type Grid = Vec<Vec<String>>;

pub fn title(report: &CasinoReport) -> String {
    format!("{}{} {}", TITLE_PREFIX, report.month, report.year)
}

/// First three characters of the month, `_`, year: `fév_2024`
pub fn sheet_name(report: &CasinoReport) -> String {
    let prefix: String = report.month.chars().take(3).collect();
    format!("{}_{}", prefix, report.year)
}

pub fn export_filename(report: &CasinoReport) -> String {
    format!("Rapport_{}_{}.xlsx", report.month, report.year)
}

fn deposit_row(label: &str, totals: &ReportTotals) -> Vec<String> {
    vec![
        label.to_string(),
        format_euro_cell(totals.total_deposit),
        totals.signup.to_string(),
        totals.ftd.to_string(),
        String::new(),
        format_euro_cell(totals.avg_deposit_per_signup()),
        format_euro_cell(totals.avg_deposit_per_ftd()),
        String::new(),
    ]
}

fn revenue_row(label: &str, totals: &ReportTotals) -> Vec<String> {
    vec![
        label.to_string(),
        format_euro_cell(totals.ngr),
        format_euro_cell(totals.profits),
    ]
}

fn header(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

/// Build the cell grid of one report over the registry casinos
pub fn build_grid(report: &CasinoReport, registry: &CasinoRegistry) -> Grid {
    let per_casino: Vec<(&str, ReportTotals)> = registry
        .iter()
        .map(|casino| {
            let mut totals = ReportTotals::default();
            totals.add_casino(report, casino);
            (casino, totals)
        })
        .collect();
    let totals = report_totals(report, registry);

    let mut grid: Grid = vec![vec![title(report)], Vec::new()];

    // 第一部分：存款 / 注册 / 首存
    grid.push(header(&DEPOSIT_SECTION_HEADER));
    for (casino, casino_totals) in &per_casino {
        grid.push(deposit_row(casino, casino_totals));
    }
    grid.push(deposit_row(TOTAL_LABEL, &totals));

    grid.push(Vec::new());

    // 第二部分：NGR / 利润
    grid.push(header(&REVENUE_SECTION_HEADER));
    for (casino, casino_totals) in &per_casino {
        grid.push(revenue_row(casino, casino_totals));
    }
    grid.push(revenue_row(TOTAL_LABEL, &totals));

    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (CasinoReport, CasinoRegistry) {
        let registry = CasinoRegistry::new(vec!["AZUR".to_string(), "BANZAI".to_string()]);
        let mut report = CasinoReport::blank(&registry, "février", 2024, None);
        for (key, value) in [
            ("AZUR_TOTAL_DEPOSIT", "1000"),
            ("AZUR_SIGNUP", "10"),
            ("AZUR_FTD", "4"),
            ("AZUR_NGR", "250.5"),
            ("BANZAI_PROFITS", "-12.346"),
        ] {
            report.data.insert(key.to_string(), value.to_string());
        }
        (report, registry)
    }

    #[test]
    fn test_names() {
        let (report, _) = sample();
        assert_eq!(title(&report), "Rapport mensuel - février 2024");
        assert_eq!(sheet_name(&report), "fév_2024");
        assert_eq!(export_filename(&report), "Rapport_février_2024.xlsx");
    }

    #[test]
    fn test_grid_layout() {
        let (report, registry) = sample();
        let grid = build_grid(&report, &registry);

        assert_eq!(grid[0], vec!["Rapport mensuel - février 2024"]);
        assert!(grid[1].is_empty());
        assert_eq!(grid[2], header(&DEPOSIT_SECTION_HEADER));
        assert_eq!(
            grid[3],
            vec!["AZUR", "1000.00 €", "10", "4", "", "100.00 €", "250.00 €", ""]
        );
        assert_eq!(
            grid[4],
            vec!["BANZAI", "0.00 €", "0", "0", "", "0.00 €", "0.00 €", ""]
        );
        assert_eq!(grid[5][0], TOTAL_LABEL);
        assert!(grid[6].is_empty());
        assert_eq!(grid[7], header(&REVENUE_SECTION_HEADER));
        assert_eq!(grid[8], vec!["AZUR", "250.50 €", "0.00 €"]);
        assert_eq!(grid[9], vec!["BANZAI", "0.00 €", "-12.35 €"]);
        assert_eq!(grid[10], vec![TOTAL_LABEL, "250.50 €", "-12.35 €"]);
        assert_eq!(grid.len(), 11);
    }
}
