//! xlsx 导出

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tracing::info;

use super::layout::{COLUMN_WIDTHS, Grid, build_grid, export_filename, sheet_name};
use crate::errors::ReportError;
use crate::report::{CasinoRegistry, CasinoReport};

fn export_failed(err: impl std::fmt::Display) -> ReportError {
    ReportError::spreadsheet_export(format!("Failed to generate spreadsheet: {}", err))
}

fn write_workbook(name: &str, grid: &Grid) -> Result<Workbook, ReportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(name).map_err(export_failed)?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(export_failed)?;
    }

    for (row, cells) in grid.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            // 空单元格不写入
            if cell.is_empty() {
                continue;
            }
            worksheet
                .write_string(row as u32, col as u16, cell)
                .map_err(export_failed)?;
        }
    }
    Ok(workbook)
}

/// Render a report as xlsx bytes
pub fn to_xlsx_bytes(report: &CasinoReport, registry: &CasinoRegistry) -> Result<Vec<u8>, ReportError> {
    let grid = build_grid(report, registry);
    let mut workbook = write_workbook(&sheet_name(report), &grid)?;
    workbook.save_to_buffer().map_err(export_failed)
}

/// Write `Rapport_<month>_<year>.xlsx` into `dir`; returns the file path
pub fn export_to_dir<P: AsRef<Path>>(
    report: &CasinoReport,
    registry: &CasinoRegistry,
    dir: P,
) -> Result<PathBuf, ReportError> {
    let path = dir.as_ref().join(export_filename(report));
    export_to_file(report, registry, &path)?;
    Ok(path)
}

/// Write the report to an explicit path
pub fn export_to_file<P: AsRef<Path>>(
    report: &CasinoReport,
    registry: &CasinoRegistry,
    path: P,
) -> Result<(), ReportError> {
    let path = path.as_ref();
    let bytes = to_xlsx_bytes(report, registry)?;
    std::fs::write(path, bytes).map_err(|e| {
        ReportError::spreadsheet_export(format!(
            "Failed to write spreadsheet '{}': {}",
            path.display(),
            e
        ))
    })?;
    info!("Report {} exported to {}", report.period_label(), path.display());
    Ok(())
}
