//! # Domain Entities
//!
//! What a provider hands back: an address on success, a named failure
//! otherwise.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::errors::FailureRecord;

/// A resolved postal address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResult {
    /// Resolved 8-digit code.
    pub cep: String,
    /// State (UF) abbreviation.
    pub state: String,
    /// City name.
    pub city: String,
    /// Neighborhood (bairro).
    pub neighborhood: String,
    /// Street (logradouro).
    pub street: String,
    /// Provider that produced this result.
    pub service: String,
}

/// A single provider's failure to resolve a code.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{service}: {message}")]
pub struct ProviderFailure {
    /// Human-readable failure message.
    pub message: String,
    /// Provider that failed.
    pub service: String,
}

impl ProviderFailure {
    /// Create a provider failure.
    pub fn new(message: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            service: service.into(),
        }
    }
}

impl From<ProviderFailure> for FailureRecord {
    fn from(failure: ProviderFailure) -> Self {
        FailureRecord {
            message: failure.message,
            service: failure.service,
        }
    }
}
