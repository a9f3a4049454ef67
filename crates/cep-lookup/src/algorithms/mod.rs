//! # Algorithms Module
//!
//! Normalization, the first-success race, and error aggregation.

pub mod aggregator;
pub mod normalizer;
pub mod race;

pub use aggregator::{
    aggregate_service_failures, aggregate_validation_failure, SERVICES_FAILED_MESSAGE,
    VALIDATION_FAILED_MESSAGE,
};
pub use normalizer::{left_pad_with_zeros, normalize, strip_non_digits, validate_input_type};
pub use race::race_first_success;
