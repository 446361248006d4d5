//! Logger initialization.
//!
//! The logger honors the CLI-selected level and format. `RUST_LOG` still
//! takes precedence when set, so individual modules can be tuned without
//! touching the CLI flags.

use std::io::Write;

use env_logger::{Builder, Env};
use log::LevelFilter;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Initializes the global logger with the given level and output format.
///
/// # Arguments
///
/// * `level` - Maximum level to emit
/// * `format` - Plain (human-readable) or JSON lines
///
/// # Errors
///
/// Returns an error if a global logger was already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    if let LogFormat::Json = format {
        builder.format(|buf, record| {
            let line = serde_json::json!({
                "ts": chrono::Utc::now().to_rfc3339(),
                "level": record.level().to_string(),
                "target": record.target(),
                "message": record.args().to_string(),
            });
            writeln!(buf, "{line}")
        });
    }

    builder.try_init()?;
    Ok(())
}
