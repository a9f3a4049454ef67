//! Structured logging.
//!
//! Installs a global `tracing-subscriber` fmt subscriber. Logs go to stderr
//! so stdout stays free for lookup results. With `json_logs` every line is
//! one JSON object carrying the span context (`cep_lookup{input_kind=..}`).

use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

use crate::{TelemetryConfig, TelemetryError};

/// Build the level filter for `config`.
pub fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::Config(e.to_string()))
}

/// Install the global subscriber.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = if config.json_logs {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.with_ansi(config.console_output).try_init()
    };
    installed.map_err(|_| TelemetryError::AlreadyInitialized)?;

    tracing::debug!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "logging initialized"
    );
    Ok(())
}
