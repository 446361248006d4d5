//! Main application modules.
//!
//! This module provides utilities used by the CLI binary, currently URL
//! validation and normalization for the `monitor` subcommand.

pub mod url;

// Re-export public API
pub use url::validate_and_normalize_url;
