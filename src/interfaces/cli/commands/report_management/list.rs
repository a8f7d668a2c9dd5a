//! List and show report commands

use colored::Colorize;

use crate::analytics::report_totals;
use crate::interfaces::cli::commands::helpers::print_report_table;
use crate::interfaces::cli::{CliContext, CliError};
use crate::utils::format::format_euro;

pub fn list_reports(ctx: &CliContext, year: Option<i32>) -> Result<(), CliError> {
    let reports: Vec<_> = ctx
        .store()
        .fetch_reports()?
        .into_iter()
        .filter(|r| year.is_none_or(|y| r.year == y))
        .collect();

    if reports.is_empty() {
        println!("{} No reports found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Report list:".bold().green());
    println!();
    for report in &reports {
        let totals = report_totals(report, &ctx.registry);
        let id = report
            .id
            .map(|id| format!("#{}", id))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>5} {:<16} {} {}  {} {}",
            id.cyan(),
            report.period_label(),
            "deposit".dimmed(),
            format_euro(totals.total_deposit).green(),
            "profits".dimmed(),
            format_euro(totals.profits).yellow()
        );
    }
    println!();
    println!(
        "{} Total {} reports",
        "ℹ".bold().blue(),
        reports.len().to_string().green()
    );
    Ok(())
}

pub fn show_report(ctx: &CliContext, id: i64) -> Result<(), CliError> {
    let report = ctx.store().get_report(id)?;
    print_report_table(&report, &ctx.registry);
    Ok(())
}
