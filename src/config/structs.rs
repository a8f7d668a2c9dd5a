use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::report::{CasinoRegistry, DEFAULT_CASINOS};

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - api: 报表后端地址、令牌、超时
/// - storage: 未配置后端时使用的本地 JSON 文件
/// - registry: 娱乐场列表的初始值与持久化文件
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：CR，分隔符：__
    /// 示例：CR__API__BASE_URL=https://reports.example.com
    pub fn load() -> Self {
        Self::load_from("config.toml")
    }

    /// Same as [`load`](Self::load) with an explicit TOML path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        use config::{Config, Environment, File};

        let path = path.as_ref();

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::from(path.to_path_buf()).required(false))
            // 2. 从环境变量覆盖，前缀 CR，分隔符 __
            .add_source(
                Environment::with_prefix("CR")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if path.exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path.display());
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 报表后端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 为空时使用本地文件存储
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn is_remote(&self) -> bool {
        !self.base_url.trim().is_empty()
    }
}

/// 本地存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_reports_file")]
    pub reports_file: String,
}

/// 娱乐场列表配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_casinos")]
    pub casinos: Vec<String>,
    #[serde(default = "default_registry_file")]
    pub file: String,
}

impl RegistryConfig {
    /// Registry built from the configured seed list
    pub fn seed(&self) -> CasinoRegistry {
        CasinoRegistry::new(self.casinos.iter().cloned())
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_timeout_secs() -> u64 {
    10
}

fn default_reports_file() -> String {
    "casino_reports.json".to_string()
}

fn default_casinos() -> Vec<String> {
    DEFAULT_CASINOS.iter().map(|s| s.to_string()).collect()
}

fn default_registry_file() -> String {
    "casinos.json".to_string()
}

fn default_log_level() -> String {
    // CLI 默认只输出警告
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            reports_file: default_reports_file(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            casinos: default_casinos(),
            file: default_registry_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
