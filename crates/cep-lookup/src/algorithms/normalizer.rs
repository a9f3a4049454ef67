//! # Normalizer
//!
//! Turns a raw postal code into an 8-digit [`NormalizedCode`] before any
//! network activity happens. The steps run in strict order and the first
//! failure short-circuits the rest:
//!
//! 1. type check (string or number only)
//! 2. strip every non-digit character
//! 3. reject more than 8 digits
//! 4. left-pad with zeros to 8 digits

use crate::domain::{invariant_max_digits, NormalizedCode, RawInput, ValidationError, CEP_SIZE};

/// Step 1: accept only string or numeric input, returning its string form.
pub fn validate_input_type(input: &RawInput) -> Result<&str, ValidationError> {
    match input {
        RawInput::Text(s) | RawInput::Number(s) => Ok(s.as_str()),
        RawInput::Unsupported(found) => Err(ValidationError::InvalidInputType { found: *found }),
    }
}

/// Step 2: remove every character that is not an ASCII decimal digit.
pub fn strip_non_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Step 4: prepend zeros up to `CEP_SIZE`.
///
/// Callers must have checked the upper bound first.
pub fn left_pad_with_zeros(digits: &str) -> NormalizedCode {
    NormalizedCode::from_padded(format!("{digits:0>width$}", width = CEP_SIZE))
}

/// Run the whole normalization pipeline.
pub fn normalize(input: &RawInput) -> Result<NormalizedCode, ValidationError> {
    let value = validate_input_type(input)?;
    let digits = strip_non_digits(value);
    invariant_max_digits(&digits)?;
    Ok(left_pad_with_zeros(&digits))
}
