//! # Error Aggregator
//!
//! Folds internal failures into the single [`CepLookupError`] shape.

use crate::domain::{CepLookupError, ErrorKind, FailureRecord, ProviderFailure, ValidationError};

/// Top-level message of every `validation_error`.
pub const VALIDATION_FAILED_MESSAGE: &str = "code failed validation";

/// Top-level message of every `service_error`.
pub const SERVICES_FAILED_MESSAGE: &str = "all lookup services returned an error";

/// Wrap a normalizer failure as a single-record `validation_error`.
pub fn aggregate_validation_failure(err: &ValidationError) -> CepLookupError {
    CepLookupError::new(
        ErrorKind::ValidationError,
        VALIDATION_FAILED_MESSAGE,
        vec![FailureRecord::new(err.to_string(), err.stage())],
    )
}

/// Turn every provider failure, in settlement order, into a `service_error`.
pub fn aggregate_service_failures(failures: Vec<ProviderFailure>) -> CepLookupError {
    CepLookupError::new(
        ErrorKind::ServiceError,
        SERVICES_FAILED_MESSAGE,
        failures.into_iter().map(FailureRecord::from).collect(),
    )
}
