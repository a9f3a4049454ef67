//! # Domain Invariants
//!
//! Rules that every normalized code must satisfy before it reaches a provider.

use super::errors::ValidationError;

/// Number of digits in a normalized CEP.
pub const CEP_SIZE: usize = 8;

/// Service name carried by every validation failure record.
pub const VALIDATION_STAGE: &str = "cep_validation";

/// Invariant: a normalized code is exactly `CEP_SIZE` ASCII digits.
pub fn invariant_normalized_code(code: &str) -> bool {
    code.len() == CEP_SIZE && code.bytes().all(|b| b.is_ascii_digit())
}

/// Invariant: a stripped code never carries more than `CEP_SIZE` digits.
///
/// Checked before padding, so short values always pass.
pub fn invariant_max_digits(digits: &str) -> Result<(), ValidationError> {
    if digits.len() > CEP_SIZE {
        return Err(ValidationError::TooManyDigits { len: digits.len() });
    }
    Ok(())
}
