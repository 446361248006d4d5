//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (retention, thresholds, HTTP defaults)
//! - Monitor configuration and CLI option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{AlertThresholds, LogFormat, LogLevel, MonitorConfig};
