//! Spreadsheet import/export commands

use colored::Colorize;

use crate::interfaces::cli::commands::helpers::{print_report_table, resolve_export_path};
use crate::interfaces::cli::{CliContext, CliError};
use crate::spreadsheet::{export_to_file, import_from_file};

pub fn export_report(ctx: &CliContext, id: i64, output: Option<String>) -> Result<(), CliError> {
    let report = ctx.store().get_report(id)?;
    let path = resolve_export_path(&report, output.as_deref());

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            CliError::CommandError(format!(
                "Failed to create output directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    export_to_file(&report, &ctx.registry, &path)?;
    println!(
        "{} Exported {} to {}",
        "✓".bold().green(),
        report.period_label().bold(),
        path.display().to_string().cyan()
    );
    Ok(())
}

pub fn import_report(ctx: &mut CliContext, file_path: &str, save: bool) -> Result<(), CliError> {
    let casinos_before = ctx.registry.len();
    let result = import_from_file(file_path, &mut ctx.registry);

    // 新增的娱乐场即使导入失败也会保留
    if ctx.registry.len() != casinos_before {
        ctx.save_registry()?;
        println!(
            "{} {} new casino(s) added to the list",
            "ℹ".bold().blue(),
            (ctx.registry.len() - casinos_before).to_string().green()
        );
    }
    let report = result?;

    print_report_table(&report, &ctx.registry);

    if save {
        let saved = ctx.store().save_report(&report)?;
        println!(
            "{} Imported report saved as {}",
            "✓".bold().green(),
            saved
                .id
                .map(|id| format!("#{}", id))
                .unwrap_or_default()
                .cyan()
        );
    } else {
        println!(
            "{} Preview only; run again with {} to store it",
            "ℹ".bold().blue(),
            "--save".cyan()
        );
    }
    Ok(())
}
