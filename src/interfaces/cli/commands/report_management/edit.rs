//! Create, edit and delete report commands

use colored::Colorize;
use tracing::debug;

use crate::client::create_new_report;
use crate::interfaces::cli::commands::helpers::{confirm, parse_metric, resolve_casino};
use crate::interfaces::cli::{CliContext, CliError};
use crate::report::ReportEditor;

pub fn new_report(
    ctx: &CliContext,
    month: Option<String>,
    year: Option<i32>,
    user: Option<String>,
) -> Result<(), CliError> {
    let mut editor = ReportEditor::new(create_new_report(&ctx.registry, user));
    if let Some(month) = month {
        editor.set_month(&month)?;
    }
    if let Some(year) = year {
        editor.set_year(year)?;
    }

    let period = editor.report().period_label();
    let duplicate = ctx
        .store()
        .fetch_reports()?
        .into_iter()
        .any(|r| r.period_label() == period);
    if duplicate {
        println!(
            "{} A report for {} already exists",
            "⚠".bold().yellow(),
            period.cyan()
        );
    }

    let saved = ctx.store().save_report(editor.report())?;
    println!(
        "{} Created report {} for {}",
        "✓".bold().green(),
        saved
            .id
            .map(|id| format!("#{}", id))
            .unwrap_or_default()
            .cyan(),
        saved.period_label().bold()
    );
    Ok(())
}

pub fn set_value(
    ctx: &CliContext,
    id: i64,
    casino: &str,
    metric: &str,
    value: &str,
) -> Result<(), CliError> {
    let metric = parse_metric(metric)?;
    let casino = resolve_casino(&ctx.registry, casino);
    if !ctx.registry.contains(&casino) {
        return Err(CliError::CommandError(format!(
            "Unknown casino: {} (see `casino list`)",
            casino
        )));
    }

    let mut editor = ReportEditor::new(ctx.store().get_report(id)?);
    editor.set_value(&casino, metric, value)?;
    debug!("Saving report {} after editing {}", id, metric.key(&casino));
    let saved = ctx.store().save_report(editor.report())?;

    println!(
        "{} {} {} = {} ({})",
        "✓".bold().green(),
        casino.cyan(),
        metric.label(),
        saved.raw_value(&casino, metric).unwrap_or("0").green(),
        saved.period_label()
    );
    Ok(())
}

pub fn delete_report(ctx: &CliContext, id: i64, force: bool) -> Result<(), CliError> {
    let report = ctx.store().get_report(id)?;
    if !force {
        let prompt = format!("Delete report #{} ({})?", id, report.period_label());
        if !confirm(&prompt)? {
            println!("{}", "Aborted.".red());
            return Ok(());
        }
    }

    ctx.store().delete_report(id)?;
    println!(
        "{} Deleted report {} ({})",
        "✓".bold().green(),
        format!("#{}", id).cyan(),
        report.period_label()
    );
    Ok(())
}

