//! Utility modules.

pub mod wbtime;

pub use wbtime::{WbTimeParseError, WbTimestamp};
