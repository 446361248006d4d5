//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and monitor configuration.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_ERROR_INCREASE_THRESHOLD, DEFAULT_HISTORY_PATH, DEFAULT_RESPONSE_TIME_THRESHOLD_MS,
    DEFAULT_SCORE_DECREASE_THRESHOLD, DEFAULT_USER_AGENT, HTTP_TIMEOUT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Thresholds evaluated by alert checking.
///
/// The first two are relative to the previous run; the response time
/// threshold is absolute. Score floors (critical/meta/schema) are fixed
/// constants rather than configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertThresholds {
    /// Overall score drop (points) that raises a score_decrease alert.
    pub score_decrease: i64,
    /// Error count increase that raises an error_increase alert.
    pub error_increase: i64,
    /// Response time (ms) above which a slow_response alert fires.
    pub response_time_ms: u64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            score_decrease: DEFAULT_SCORE_DECREASE_THRESHOLD,
            error_increase: DEFAULT_ERROR_INCREASE_THRESHOLD,
            response_time_ms: DEFAULT_RESPONSE_TIME_THRESHOLD_MS,
        }
    }
}

/// Monitor configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use seo_monitor::MonitorConfig;
/// use std::path::PathBuf;
///
/// let config = MonitorConfig {
///     history_path: PathBuf::from("./history/qwik-site.json"),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Path of the JSON history file
    pub history_path: PathBuf,

    /// Alert thresholds
    pub alert_thresholds: AlertThresholds,

    /// HTTP User-Agent header value used by the built-in auditor
    pub user_agent: String,

    /// Per-request timeout for audit fetches
    pub http_timeout: std::time::Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            alert_thresholds: AlertThresholds::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_timeout: HTTP_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_alert_thresholds_default() {
        let thresholds = AlertThresholds::default();
        assert_eq!(thresholds.score_decrease, 10);
        assert_eq!(thresholds.error_increase, 5);
        assert_eq!(thresholds.response_time_ms, 5000);
    }

    #[test]
    fn test_monitor_config_default() {
        let config = MonitorConfig::default();
        assert_eq!(config.history_path, PathBuf::from("./seo-history.json"));
        assert_eq!(config.alert_thresholds, AlertThresholds::default());
        assert_eq!(config.http_timeout.as_secs(), 10);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }
}
