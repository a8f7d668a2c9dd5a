//! Casino list commands

use colored::Colorize;
use tracing::info;

use crate::interfaces::cli::{CliContext, CliError};
use crate::interfaces::cli::commands::helpers::resolve_casino;
use crate::report::migrate_casino_keys;

pub fn casino_list(ctx: &CliContext) -> Result<(), CliError> {
    if ctx.registry.is_empty() {
        println!("{} No casinos configured", "ℹ".bold().blue());
        return Ok(());
    }
    println!("{}", "Casino list:".bold().green());
    for (i, casino) in ctx.registry.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, casino.cyan());
    }
    Ok(())
}

pub fn casino_add(ctx: &mut CliContext, name: &str) -> Result<(), CliError> {
    let name = ctx.registry.add_validated(name)?;
    ctx.save_registry()?;
    println!("{} Added casino {}", "✓".bold().green(), name.cyan());
    Ok(())
}

pub fn casino_remove(ctx: &mut CliContext, name: &str) -> Result<(), CliError> {
    let name = resolve_casino(&ctx.registry, name);
    if !ctx.registry.remove(&name) {
        return Err(CliError::CommandError(format!(
            "Casino does not exist: {}",
            name
        )));
    }
    ctx.save_registry()?;
    println!("{} Removed casino {}", "✓".bold().green(), name.cyan());
    Ok(())
}

/// Rename in the registry; with `migrate`, move stored values too
pub fn casino_rename(
    ctx: &mut CliContext,
    old_name: &str,
    new_name: &str,
    migrate: bool,
) -> Result<(), CliError> {
    let old_name = resolve_casino(&ctx.registry, old_name);
    let new_name = ctx.registry.rename(&old_name, new_name)?;
    ctx.save_registry()?;
    println!(
        "{} Renamed casino {} -> {}",
        "✓".bold().green(),
        old_name.cyan(),
        new_name.cyan()
    );

    if !migrate || new_name == old_name {
        if !migrate {
            println!(
                "{} Stored reports still use the old name; pass {} to move them",
                "⚠".bold().yellow(),
                "--migrate".cyan()
            );
        }
        return Ok(());
    }

    let mut migrated = 0;
    for mut report in ctx.store().fetch_reports()? {
        let before = report.data.clone();
        migrate_casino_keys(&mut report, &old_name, &new_name);
        if report.data != before {
            ctx.store().save_report(&report)?;
            migrated += 1;
        }
    }
    info!("Migrated {} reports from {} to {}", migrated, old_name, new_name);
    println!(
        "{} Migrated {} stored report(s)",
        "✓".bold().green(),
        migrated.to_string().green()
    );
    Ok(())
}
