//! System-level modules
//!
//! Process setup shared by every command: logging initialization.

pub mod logging;

pub use logging::init_logging;
