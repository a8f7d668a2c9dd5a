//! xlsx / xls 导入
//!
//! Reads the first worksheet back into a report. Unknown casinos found in
//! the deposit section are added to the registry; the revenue section only
//! fills casinos the registry knows at that point.

use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::{Datelike, Utc};
use regex::Regex;
use tracing::{debug, info, warn};

use super::layout::{
    DEPOSIT_ROW_MIN_CELLS, DEPOSIT_SECTION_FIRST_ROW, Grid, REVENUE_ROW_MIN_CELLS,
    REVENUE_SECTION_HEADER, TOTAL_LABEL,
};
use crate::errors::ReportError;
use crate::report::{CasinoRegistry, CasinoReport, MONTHS, Metric, month_index};
use crate::utils::number::{parse_amount_strict, strip_non_numeric};

static TITLE_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s+(\d{4})").expect("valid regex"));

fn import_failed(err: impl std::fmt::Display) -> ReportError {
    ReportError::spreadsheet_import(format!("Failed to read spreadsheet: {}", err))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// Decode the first worksheet into rows of cell text
///
/// Trailing empty cells of each row are dropped. Leading rows and columns
/// the sheet does not use are kept as empty cells so positions stay
/// absolute.
pub fn read_rows(bytes: &[u8]) -> Result<Grid, ReportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(import_failed)?;
    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ReportError::spreadsheet_import("Spreadsheet has no worksheet"))?;
    let range = workbook.worksheet_range(&first).map_err(import_failed)?;

    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut grid: Grid = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells: Vec<String> = vec![String::new(); col_offset];
        cells.extend(row.iter().map(cell_text));
        while cells.last().is_some_and(|c| c.trim().is_empty()) {
            cells.pop();
        }
        grid.push(cells);
    }
    debug!("Read {} rows from worksheet '{}'", grid.len(), first);
    Ok(grid)
}

/// Month and year from the title; the current period when it cannot be read
fn parse_period(title: &str) -> (String, i32) {
    let now = Utc::now();
    let current = (MONTHS[now.month0() as usize].to_string(), now.year());

    let Some(caps) = TITLE_PERIOD.captures(title) else {
        warn!("No period found in title '{}', using current month", title);
        return current;
    };
    let month = month_index(&caps[1]);
    let year = caps[2].parse::<i32>().ok();
    match (month, year) {
        (Some(index), Some(year)) => (MONTHS[index].to_string(), year),
        _ => {
            warn!("Unrecognized period in title '{}', using current month", title);
            current
        }
    }
}

fn cell<'a>(row: &'a [String], index: usize) -> &'a str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Currency cell: symbols stripped, blank reads as 0
fn amount_cell(raw: &str) -> Result<f64, ReportError> {
    if raw.trim().is_empty() {
        return Ok(0.0);
    }
    let stripped = strip_non_numeric(raw);
    parse_amount_strict(&stripped)
        .map_err(|_| ReportError::spreadsheet_import(format!("Invalid amount cell: '{}'", raw.trim())))
}

/// Count cell: blank reads as 0
///
/// Signed, since stored counts are exported as-is.
fn count_cell(raw: &str) -> Result<i64, ReportError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ReportError::spreadsheet_import(format!("Invalid count cell: '{}'", trimmed)))
}

fn is_addable_casino(name: &str) -> bool {
    !name.trim().is_empty() && !name.to_lowercase().contains("total")
}

/// Build a report from decoded rows
///
/// Registry additions made here persist even if a later row fails.
pub fn parse_grid(rows: &Grid, registry: &mut CasinoRegistry) -> Result<CasinoReport, ReportError> {
    let title = rows
        .first()
        .and_then(|r| r.first())
        .ok_or_else(|| ReportError::spreadsheet_import("Spreadsheet is empty"))?;
    let (month, year) = parse_period(title);

    let mut report = CasinoReport::blank(&CasinoRegistry::new(Vec::<String>::new()), month, year, None);

    // 第一部分：存款 / 注册 / 首存
    for row in rows.iter().skip(DEPOSIT_SECTION_FIRST_ROW) {
        if row.len() < DEPOSIT_ROW_MIN_CELLS {
            continue;
        }
        let casino = cell(row, 0);
        if casino == TOTAL_LABEL {
            break;
        }
        if !registry.contains(casino) && is_addable_casino(casino) {
            registry.add(casino);
            info!("Casino '{}' added from spreadsheet", casino);
        }
        if registry.contains(casino) {
            let deposit = amount_cell(cell(row, 1))?;
            let signup = count_cell(cell(row, 2))?;
            let ftd = count_cell(cell(row, 3))?;
            report
                .data
                .insert(Metric::TotalDeposit.key(casino), deposit.to_string());
            report.data.insert(Metric::Signup.key(casino), signup.to_string());
            report.data.insert(Metric::Ftd.key(casino), ftd.to_string());
        }
    }

    // 第二部分：NGR / 利润，从头查找表头
    let mut in_revenue_section = false;
    for row in rows {
        if row.len() < REVENUE_ROW_MIN_CELLS {
            continue;
        }
        if !in_revenue_section {
            in_revenue_section = row
                .iter()
                .map(String::as_str)
                .take(REVENUE_SECTION_HEADER.len())
                .eq(REVENUE_SECTION_HEADER.iter().copied());
            continue;
        }
        let casino = cell(row, 0);
        if casino == TOTAL_LABEL {
            break;
        }
        if !registry.contains(casino) {
            debug!("Skipping unknown casino '{}' in revenue section", casino);
            continue;
        }
        let ngr = amount_cell(cell(row, 1))?;
        let profits = amount_cell(cell(row, 2))?;
        report.data.insert(Metric::Ngr.key(casino), ngr.to_string());
        report
            .data
            .insert(Metric::Profits.key(casino), profits.to_string());
    }

    if !in_revenue_section {
        debug!("No NGR/PROFITS section found");
    }
    Ok(report)
}

/// Decode xlsx/xls bytes into a report
pub fn import_bytes(bytes: &[u8], registry: &mut CasinoRegistry) -> Result<CasinoReport, ReportError> {
    let rows = read_rows(bytes)?;
    parse_grid(&rows, registry)
}

pub fn import_from_file<P: AsRef<Path>>(
    path: P,
    registry: &mut CasinoRegistry,
) -> Result<CasinoReport, ReportError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        ReportError::spreadsheet_import(format!(
            "Failed to read spreadsheet '{}': {}",
            path.display(),
            e
        ))
    })?;
    let report = import_bytes(&bytes, registry)?;
    info!(
        "Imported report {} from {}",
        report.period_label(),
        path.display()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn sample_grid() -> Grid {
        vec![
            row(&["Rapport mensuel - mars 2024"]),
            Vec::new(),
            row(&["CASINO", "TOTAL DEPOSIT", "SIGNUP", "FTD", "", "DEPOSIT/SIGNUP", "DEPOSIT/FTD"]),
            row(&["AZUR", "1234.50 €", "12", "3", "", "102.88 €", "411.50 €"]),
            row(&["NEW ONE", "10.00 €", "1", "1", "", "10.00 €", "10.00 €"]),
            row(&["TOTAL :", "1244.50 €", "13", "4", "", "95.73 €", "311.13 €"]),
            Vec::new(),
            row(&["CASINO", "NGR", "PROFITS"]),
            row(&["AZUR", "100.00 €", "-5.50 €"]),
            row(&["NEW ONE", "1.00 €", "2.00 €"]),
            row(&["GHOST", "9.00 €", "9.00 €"]),
            row(&["TOTAL :", "110.00 €", "5.50 €"]),
        ]
    }

    #[test]
    fn test_parse_period() {
        assert_eq!(
            parse_period("Rapport mensuel - février 2024"),
            ("février".to_string(), 2024)
        );
        assert_eq!(parse_period("Rapport mensuel - MARS 2023").0, "mars");
        let now = Utc::now();
        assert_eq!(parse_period("no date here").1, now.year());
        assert_eq!(
            parse_period("Rapport mensuel - february 2020"),
            (MONTHS[now.month0() as usize].to_string(), now.year())
        );
    }

    #[test]
    fn test_parse_grid_fills_both_sections() {
        let mut registry = CasinoRegistry::default();
        let report = parse_grid(&sample_grid(), &mut registry).unwrap();

        assert_eq!(report.month, "mars");
        assert_eq!(report.year, 2024);
        assert_eq!(report.raw_value("AZUR", Metric::TotalDeposit), Some("1234.5"));
        assert_eq!(report.raw_value("AZUR", Metric::Signup), Some("12"));
        assert_eq!(report.raw_value("AZUR", Metric::Profits), Some("-5.5"));
        assert!(report.id.is_none());
    }

    #[test]
    fn test_unknown_casino_added_once_and_filled() {
        let mut registry = CasinoRegistry::default();
        let before = registry.len();
        let report = parse_grid(&sample_grid(), &mut registry).unwrap();

        assert_eq!(registry.len(), before + 1);
        assert!(registry.contains("NEW ONE"));
        for metric in Metric::all() {
            assert!(report.raw_value("NEW ONE", metric).is_some(), "{}", metric);
        }
    }

    #[test]
    fn test_revenue_only_casino_is_skipped() {
        let mut registry = CasinoRegistry::default();
        let report = parse_grid(&sample_grid(), &mut registry).unwrap();
        assert!(!registry.contains("GHOST"));
        assert!(report.raw_value("GHOST", Metric::Ngr).is_none());
    }

    #[test]
    fn test_short_and_total_like_rows() {
        let mut grid = sample_grid();
        grid.insert(3, row(&["SHORT", "1"]));
        grid.insert(3, row(&["Sub total", "1", "1", "1"]));
        let mut registry = CasinoRegistry::default();
        parse_grid(&grid, &mut registry).unwrap();
        assert!(!registry.contains("SHORT"));
        assert!(!registry.contains("Sub total"));
    }

    #[test]
    fn test_blank_cells_read_as_zero() {
        let mut grid = sample_grid();
        grid[3] = row(&["AZUR", "", "", "3"]);
        let mut registry = CasinoRegistry::default();
        let report = parse_grid(&grid, &mut registry).unwrap();
        assert_eq!(report.raw_value("AZUR", Metric::TotalDeposit), Some("0"));
        assert_eq!(report.raw_value("AZUR", Metric::Signup), Some("0"));
    }

    #[test]
    fn test_garbage_cell_aborts_import() {
        let mut grid = sample_grid();
        grid[8] = row(&["AZUR", "n/a", "1.00 €"]);
        let mut registry = CasinoRegistry::default();
        assert!(matches!(
            parse_grid(&grid, &mut registry),
            Err(ReportError::SpreadsheetImport(_))
        ));
        // 第一部分新增的娱乐场不会回滚
        assert!(registry.contains("NEW ONE"));
    }

    #[test]
    fn test_empty_grid_is_error() {
        let mut registry = CasinoRegistry::default();
        assert!(parse_grid(&Vec::new(), &mut registry).is_err());
    }

    #[test]
    fn test_read_rows_rejects_non_spreadsheet() {
        assert!(matches!(
            read_rows(b"definitely not a workbook"),
            Err(ReportError::SpreadsheetImport(_))
        ));
    }
}
