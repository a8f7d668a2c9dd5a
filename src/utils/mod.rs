pub mod format;
pub mod number;
