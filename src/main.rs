use clap::Parser;
use colored::Colorize;
use tracing::debug;

use casino_reports::cli::Cli;
use casino_reports::config::{StaticConfig, get_config, init_config_with};
use casino_reports::interfaces::cli::run_cli_command;
use casino_reports::system::init_logging;

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // 加载配置
    let loaded = match cli.config.as_deref() {
        Some(path) => StaticConfig::load_from(path),
        None => StaticConfig::load(),
    };
    init_config_with(loaded);
    let config = get_config();

    // 日志 guard 需要存活到进程结束
    let _log_guard = match init_logging(&config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{} {}", "⚠".bold().yellow(), e.format_simple());
            None
        }
    };
    debug!("Configuration loaded, running command");

    if let Err(e) = run_cli_command(cli.command, config) {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
}
