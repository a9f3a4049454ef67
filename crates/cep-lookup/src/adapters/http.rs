//! Shared HTTP plumbing for the provider adapters.

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::config::CepLookupConfig;

/// Errors raised inside a provider adapter.
///
/// Never leaves the adapter: each provider converts it into a
/// `ProviderFailure` carrying its own service name.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Request could not be sent or the body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("Unexpected HTTP status: {0}")]
    Status(StatusCode),

    /// Response body did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Provider answered but does not know the code.
    #[error("{0}")]
    NotFound(String),

    /// Provider reported an application-level fault.
    #[error("{0}")]
    Fault(String),
}

/// Build the client shared by every provider.
///
/// No request timeout is set: a provider that hangs only stalls the race
/// when no other provider succeeds.
pub fn build_http_client(config: &CepLookupConfig) -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(config.user_agent.clone()).build()
}
