//! # Domain Errors
//!
//! Two layers of errors live here:
//!
//! - [`ValidationError`]: raised by the normalizer, never seen by callers.
//! - [`CepLookupError`]: the single aggregated shape that crosses the
//!   pipeline boundary, tagged with an [`ErrorKind`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::invariants::VALIDATION_STAGE;

/// Normalizer failures.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Input was neither a string nor a number.
    #[error("input must be constructed using a String or Number")]
    InvalidInputType {
        /// Kind of value that was supplied (`null`, `boolean`, ...).
        found: &'static str,
    },

    /// More than 8 digits remained after stripping separators.
    #[error("code must contain exactly 8 characters")]
    TooManyDigits {
        /// Digit count after stripping
        len: usize,
    },
}

impl ValidationError {
    /// Pipeline stage that produced the failure.
    pub fn stage(&self) -> &'static str {
        VALIDATION_STAGE
    }
}

/// Kind tag of an aggregated error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input rejected before any provider was contacted.
    ValidationError,
    /// Every configured provider failed.
    ServiceError,
}

impl ErrorKind {
    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "validation_error",
            ErrorKind::ServiceError => "service_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One per-source entry of an aggregated error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Human-readable failure message.
    pub message: String,
    /// Originating service (provider name or `cep_validation`).
    pub service: String,
}

impl FailureRecord {
    /// Create a failure record.
    pub fn new(message: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            service: service.into(),
        }
    }
}

/// Aggregated lookup error, the only failure a caller ever receives.
///
/// Serializes as `{ "message", "type", "errors": [{ "message", "service" }] }`.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct CepLookupError {
    /// Top-level message.
    pub message: String,
    /// Kind tag.
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    /// Per-source failures, in settlement order for `service_error`.
    pub errors: Vec<FailureRecord>,
}

impl CepLookupError {
    /// Create an aggregated error.
    pub fn new(kind: ErrorKind, message: impl Into<String>, errors: Vec<FailureRecord>) -> Self {
        Self {
            message: message.into(),
            kind,
            errors,
        }
    }

    /// Was the input rejected before dispatch?
    pub fn is_validation(&self) -> bool {
        self.kind == ErrorKind::ValidationError
    }

    /// Did every provider fail?
    pub fn is_service(&self) -> bool {
        self.kind == ErrorKind::ServiceError
    }

    /// Names of the services that reported a failure, in order.
    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.service.as_str())
    }
}
