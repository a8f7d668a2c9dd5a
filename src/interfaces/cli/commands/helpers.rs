//! Helper functions shared by CLI commands

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::analytics::{ReportTotals, report_totals};
use crate::interfaces::cli::CliError;
use crate::report::{CasinoRegistry, CasinoReport, Metric};
use crate::spreadsheet::layout::export_filename;
use crate::utils::format::format_euro;

/// Ask a yes/no question on stdin; anything but `y` is a no
pub fn confirm(prompt: &str) -> Result<bool, CliError> {
    print!("{} {} ", prompt.yellow(), "[y/N]".yellow());
    io::stdout()
        .flush()
        .map_err(|e| CliError::CommandError(format!("Failed to write prompt: {}", e)))?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(|e| CliError::CommandError(format!("Failed to read answer: {}", e)))?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Registry spelling of a casino typed on the command line
///
/// Exact matches win; otherwise the trimmed, upper-cased form is used.
pub fn resolve_casino(registry: &CasinoRegistry, input: &str) -> String {
    let trimmed = input.trim();
    if registry.contains(trimmed) {
        trimmed.to_string()
    } else {
        trimmed.to_uppercase()
    }
}

pub fn parse_metric(input: &str) -> Result<Metric, CliError> {
    input.parse::<Metric>().map_err(CliError::ParseError)
}

/// `--output` may name a directory or an `.xlsx` file
pub fn resolve_export_path(report: &CasinoReport, output: Option<&str>) -> PathBuf {
    match output {
        Some(out) if out.to_lowercase().ends_with(".xlsx") => PathBuf::from(out),
        Some(dir) => Path::new(dir).join(export_filename(report)),
        None => PathBuf::from(export_filename(report)),
    }
}

fn metric_display(totals: &ReportTotals, metric: Metric) -> String {
    match metric {
        Metric::Signup | Metric::Ftd => totals.get(metric).to_string(),
        _ => format_euro(totals.get(metric)),
    }
}

/// Per-casino table of one report followed by its totals
pub fn print_report_table(report: &CasinoReport, registry: &CasinoRegistry) {
    let id = report
        .id
        .map(|id| format!("#{}", id))
        .unwrap_or_else(|| "(unsaved)".to_string());
    println!(
        "{} {} {}",
        "Report".bold().green(),
        id.cyan(),
        report.period_label().bold()
    );
    if !report.template_name.is_empty() {
        println!("  {}", report.template_name.dimmed());
    }
    println!();

    let header: Vec<String> = Metric::all().map(|m| format!("{:>16}", m.label())).collect();
    println!("  {:<20}{}", "CASINO".bold(), header.join("").bold());

    for casino in registry.iter() {
        let mut totals = ReportTotals::default();
        totals.add_casino(report, casino);
        let cells: Vec<String> = Metric::all()
            .map(|m| format!("{:>16}", metric_display(&totals, m)))
            .collect();
        println!("  {:<20}{}", casino.cyan(), cells.join(""));
    }

    let totals = report_totals(report, registry);
    let cells: Vec<String> = Metric::all()
        .map(|m| format!("{:>16}", metric_display(&totals, m)))
        .collect();
    println!("  {:<20}{}", "TOTAL".bold(), cells.join("").bold());
    println!();
    println!(
        "  {} deposit/signup {}  deposit/ftd {}  conversion {:.1}%",
        "ℹ".bold().blue(),
        format_euro(totals.avg_deposit_per_signup()),
        format_euro(totals.avg_deposit_per_ftd()),
        totals.conversion_rate()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metric() {
        assert_eq!(parse_metric("ftd").unwrap(), Metric::Ftd);
        assert!(matches!(parse_metric("clicks"), Err(CliError::ParseError(_))));
    }

    #[test]
    fn test_resolve_casino() {
        let mut registry = CasinoRegistry::default();
        registry.add("Imported Casino");
        assert_eq!(resolve_casino(&registry, " azur "), "AZUR");
        assert_eq!(resolve_casino(&registry, "Imported Casino"), "Imported Casino");
    }

    #[test]
    fn test_resolve_export_path() {
        let registry = CasinoRegistry::default();
        let report = CasinoReport::blank(&registry, "mai", 2024, None);
        assert_eq!(
            resolve_export_path(&report, None),
            PathBuf::from("Rapport_mai_2024.xlsx")
        );
        assert_eq!(
            resolve_export_path(&report, Some("out")),
            Path::new("out").join("Rapport_mai_2024.xlsx")
        );
        assert_eq!(
            resolve_export_path(&report, Some("custom.XLSX")),
            PathBuf::from("custom.XLSX")
        );
    }
}
