use std::sync::{Arc, OnceLock};

use super::StaticConfig;

static CONFIG: OnceLock<Arc<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Loads it on first use if `init_config()` has not been called yet.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| Arc::new(StaticConfig::load()))
        .clone()
}

/// Initialize the global configuration
///
/// Loads configuration from "config.toml" in the current directory, then
/// applies `CR__*` environment overrides.
///
/// # Examples
/// ```no_run
/// use casino_reports::config::init_config;
/// init_config();
/// ```
pub fn init_config() {
    CONFIG.get_or_init(|| Arc::new(StaticConfig::load()));
}

/// Initialize with an already-built configuration (first call wins)
pub fn init_config_with(config: StaticConfig) {
    CONFIG.get_or_init(|| Arc::new(config));
}
