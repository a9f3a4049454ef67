//! # CEP Telemetry
//!
//! Structured logging for CEP lookup binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cep_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `cep-lookup` | Service name in logs |
//! | `CEP_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `CEP_JSON_LOGS` | `false` | JSON formatted logs |
//! | `CEP_CONSOLE_OUTPUT` | `true` | ANSI colors on the console |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("Logging already initialized")]
    AlreadyInitialized,

    /// The configuration could not be applied.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
