use std::fmt;

#[derive(Debug, Clone)]
pub enum ReportError {
    Http(String),
    Server { status: u16, message: String },
    NotFound(String),
    Validation(String),
    FileOperation(String),
    Serialization(String),
    SpreadsheetImport(String),
    SpreadsheetExport(String),
    Config(String),
    SaveInFlight(String),
}

impl ReportError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ReportError::Http(_) => "E001",
            ReportError::Server { .. } => "E002",
            ReportError::NotFound(_) => "E003",
            ReportError::Validation(_) => "E004",
            ReportError::FileOperation(_) => "E005",
            ReportError::Serialization(_) => "E006",
            ReportError::SpreadsheetImport(_) => "E007",
            ReportError::SpreadsheetExport(_) => "E008",
            ReportError::Config(_) => "E009",
            ReportError::SaveInFlight(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ReportError::Http(_) => "Network Error",
            ReportError::Server { .. } => "Server Error",
            ReportError::NotFound(_) => "Resource Not Found",
            ReportError::Validation(_) => "Validation Error",
            ReportError::FileOperation(_) => "File Operation Error",
            ReportError::Serialization(_) => "Serialization Error",
            ReportError::SpreadsheetImport(_) => "Spreadsheet Import Error",
            ReportError::SpreadsheetExport(_) => "Spreadsheet Export Error",
            ReportError::Config(_) => "Configuration Error",
            ReportError::SaveInFlight(_) => "Save Already In Progress",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ReportError::Http(msg) => msg,
            ReportError::Server { message, .. } => message,
            ReportError::NotFound(msg) => msg,
            ReportError::Validation(msg) => msg,
            ReportError::FileOperation(msg) => msg,
            ReportError::Serialization(msg) => msg,
            ReportError::SpreadsheetImport(msg) => msg,
            ReportError::SpreadsheetExport(msg) => msg,
            ReportError::Config(msg) => msg,
            ReportError::SaveInFlight(msg) => msg,
        }
    }

    /// 格式化为彩色输出
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ReportError {}

// 便捷的构造函数
impl ReportError {
    pub fn http<T: Into<String>>(msg: T) -> Self {
        ReportError::Http(msg.into())
    }

    pub fn server<T: Into<String>>(status: u16, msg: T) -> Self {
        ReportError::Server {
            status,
            message: msg.into(),
        }
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ReportError::NotFound(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ReportError::Validation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ReportError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ReportError::Serialization(msg.into())
    }

    pub fn spreadsheet_import<T: Into<String>>(msg: T) -> Self {
        ReportError::SpreadsheetImport(msg.into())
    }

    pub fn spreadsheet_export<T: Into<String>>(msg: T) -> Self {
        ReportError::SpreadsheetExport(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ReportError::Config(msg.into())
    }

    pub fn save_in_flight<T: Into<String>>(msg: T) -> Self {
        ReportError::SaveInFlight(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err.to_string())
    }
}

impl From<ureq::Error> for ReportError {
    fn from(err: ureq::Error) -> Self {
        ReportError::Http(err.to_string())
    }
}

impl From<calamine::Error> for ReportError {
    fn from(err: calamine::Error) -> Self {
        ReportError::SpreadsheetImport(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ReportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ReportError::SpreadsheetExport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
