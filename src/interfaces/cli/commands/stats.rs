//! Dashboard statistics command

use colored::Colorize;
use serde::Serialize;

use crate::analytics::{
    AnnualTotals, CasinoAnnualStats, MonthSummary, PeriodComparison, Trend, annual_totals,
    available_years, calculate_trend, casino_annual_stats, default_year, monthly_breakdown,
    period_comparison, year_over_year_growth, yearly_totals,
};
use crate::interfaces::cli::{CliContext, CliError};
use crate::report::{CasinoRegistry, CasinoReport, Metric};
use crate::utils::format::format_euro;

/// Per-casino row of the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct CasinoStatsRow {
    #[serde(flatten)]
    pub stats: CasinoAnnualStats,
    pub conversion_rate: f64,
    pub avg_monthly_deposit: f64,
    pub deposit_trend: Trend,
}

/// Everything the dashboard shows for one year
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub year: i32,
    pub available_years: Vec<i32>,
    pub annual: AnnualTotals,
    pub conversion_rate: f64,
    pub avg_deposit_per_signup: f64,
    pub avg_deposit_per_ftd: f64,
    pub avg_monthly_deposit: f64,
    /// Newest year against the year before it
    pub year_over_year: Vec<(Metric, Trend)>,
    /// Latest month with data against the month with data before it
    pub latest_month: Option<String>,
    pub latest_period: Option<PeriodComparison>,
    pub casinos: Vec<CasinoStatsRow>,
    pub months: Vec<MonthSummary>,
}

pub fn build_stats(reports: &[CasinoReport], registry: &CasinoRegistry, year: i32) -> StatsSummary {
    let annual = annual_totals(reports, registry, year);
    let years = yearly_totals(reports, registry);
    let months = monthly_breakdown(reports, registry, year);

    let with_data: Vec<&MonthSummary> = months.iter().filter(|m| m.has_data()).collect();
    let (latest_month, latest_period) = match with_data.as_slice() {
        [] => (None, None),
        [.., previous, latest] => (
            Some(latest.month.clone()),
            Some(period_comparison(&latest.totals, Some(&previous.totals))),
        ),
        [latest] => (
            Some(latest.month.clone()),
            Some(period_comparison(&latest.totals, None)),
        ),
    };

    let casinos = casino_annual_stats(reports, registry, year)
        .into_iter()
        .map(|stats| CasinoStatsRow {
            conversion_rate: stats.totals.conversion_rate(),
            avg_monthly_deposit: stats.avg_monthly_deposit(),
            deposit_trend: calculate_trend(&stats.monthly, Metric::TotalDeposit),
            stats,
        })
        .collect();

    StatsSummary {
        year,
        available_years: available_years(reports),
        conversion_rate: annual.totals.conversion_rate(),
        avg_deposit_per_signup: annual.totals.avg_deposit_per_signup(),
        avg_deposit_per_ftd: annual.totals.avg_deposit_per_ftd(),
        avg_monthly_deposit: annual.avg_monthly_deposit(),
        annual,
        year_over_year: Metric::all()
            .map(|m| (m, year_over_year_growth(&years, m)))
            .collect(),
        latest_month,
        latest_period,
        casinos,
        months,
    }
}

fn colored_trend(trend: &Trend) -> String {
    use crate::analytics::TrendDirection;
    let text = trend.to_string();
    match trend.direction {
        TrendDirection::Up => text.green().to_string(),
        TrendDirection::Down => text.red().to_string(),
        TrendDirection::Neutral => text.dimmed().to_string(),
    }
}

pub fn show_stats(ctx: &CliContext, year: Option<i32>, json: bool) -> Result<(), CliError> {
    let reports = ctx.store().fetch_reports()?;
    let year = year.unwrap_or_else(|| default_year(&reports));
    let summary = build_stats(&reports, &ctx.registry, year);

    if json {
        let output = serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError::CommandError(format!("Failed to serialize stats: {}", e)))?;
        println!("{}", output);
        return Ok(());
    }

    if summary.annual.report_count == 0 {
        println!("{} No reports for {}", "ℹ".bold().blue(), year);
        return Ok(());
    }

    let totals = &summary.annual.totals;
    println!("{} {}", "Statistics for".bold().green(), year.to_string().bold());
    println!();
    println!("  {:<24}{}", "Total deposit", format_euro(totals.total_deposit).green());
    println!("  {:<24}{}", "Signups", totals.signup);
    println!("  {:<24}{}", "FTD", totals.ftd);
    println!("  {:<24}{}", "NGR", format_euro(totals.ngr));
    println!("  {:<24}{}", "Profits", format_euro(totals.profits).yellow());
    println!("  {:<24}{:.1}%", "Conversion rate", summary.conversion_rate);
    println!("  {:<24}{}", "Deposit / signup", format_euro(summary.avg_deposit_per_signup));
    println!("  {:<24}{}", "Deposit / FTD", format_euro(summary.avg_deposit_per_ftd));
    println!(
        "  {:<24}{} ({} months)",
        "Avg monthly deposit",
        format_euro(summary.avg_monthly_deposit),
        summary.annual.months_with_deposit
    );

    if let (Some(month), Some(period)) = (&summary.latest_month, &summary.latest_period) {
        println!();
        println!("{} {}", "Latest month:".bold(), month.cyan());
        for (metric, trend) in &period.trends {
            println!("  {:<24}{}", metric.label(), colored_trend(trend));
        }
        println!(
            "  {:<24}{:.1}%",
            "Profit per deposit", period.profit_per_deposit
        );
    }

    if summary.available_years.len() > 1 {
        println!();
        println!("{}", "Year over year:".bold());
        for (metric, trend) in &summary.year_over_year {
            println!("  {:<24}{}", metric.label(), colored_trend(trend));
        }
    }

    println!();
    println!("{}", "By casino:".bold());
    for row in &summary.casinos {
        println!(
            "  {:<20} {:>16}  conv {:>6.1}%  avg/month {:>14}  {}",
            row.stats.casino.cyan(),
            format_euro(row.stats.totals.total_deposit),
            row.conversion_rate,
            format_euro(row.avg_monthly_deposit),
            colored_trend(&row.deposit_trend)
        );
    }
    Ok(())
}
