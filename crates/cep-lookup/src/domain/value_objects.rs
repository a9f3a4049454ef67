//! # Domain Value Objects
//!
//! Immutable values flowing through a single lookup.

use std::fmt;

use super::errors::ErrorKind;
use super::invariants::invariant_normalized_code;

/// Raw, caller-supplied postal code.
///
/// Only `Text` and `Number` survive the type check; `Unsupported` keeps the
/// name of whatever else was supplied so it can be rejected explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawInput {
    /// String input, possibly with separators (`"01310-930"`).
    Text(String),
    /// Numeric input, held as its decimal rendering (`930` -> `"930"`).
    Number(String),
    /// Any other kind of value (`null`, `boolean`, `array`, `object`).
    Unsupported(&'static str),
}

impl RawInput {
    /// Name of the supplied value kind.
    pub fn kind(&self) -> &'static str {
        match self {
            RawInput::Text(_) => "string",
            RawInput::Number(_) => "number",
            RawInput::Unsupported(kind) => kind,
        }
    }
}

impl From<&str> for RawInput {
    fn from(value: &str) -> Self {
        RawInput::Text(value.to_string())
    }
}

impl From<String> for RawInput {
    fn from(value: String) -> Self {
        RawInput::Text(value)
    }
}

macro_rules! raw_input_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RawInput {
                fn from(value: $t) -> Self {
                    RawInput::Number(value.to_string())
                }
            }
        )*
    };
}

raw_input_from_number!(u16, u32, u64, i32, i64, usize);

impl From<f64> for RawInput {
    fn from(value: f64) -> Self {
        RawInput::Number(decimal_rendering(value))
    }
}

/// Shortest decimal rendering, switching to exponent form (`1e+21`, `1e-7`)
/// below 1e-6 and from 1e21 up, the way JSON producers print numbers.
fn decimal_rendering(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 || !magnitude.is_finite() || (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }
    let exponent_form = format!("{value:e}");
    match exponent_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponent_form,
    }
}

impl From<bool> for RawInput {
    fn from(_: bool) -> Self {
        RawInput::Unsupported("boolean")
    }
}

impl<T: Into<RawInput>> From<Option<T>> for RawInput {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => RawInput::Unsupported("null"),
        }
    }
}

impl From<serde_json::Value> for RawInput {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::String(s) => RawInput::Text(s),
            Value::Number(n) => match n.as_f64() {
                Some(float) if n.is_f64() => RawInput::from(float),
                _ => RawInput::Number(n.to_string()),
            },
            Value::Null => RawInput::Unsupported("null"),
            Value::Bool(_) => RawInput::Unsupported("boolean"),
            Value::Array(_) => RawInput::Unsupported("array"),
            Value::Object(_) => RawInput::Unsupported("object"),
        }
    }
}

/// An 8-digit postal code, produced only by the normalizer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NormalizedCode(String);

impl NormalizedCode {
    /// Wrap an already padded code.
    pub(crate) fn from_padded(code: String) -> Self {
        debug_assert!(invariant_normalized_code(&code));
        Self(code)
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for NormalizedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pipeline state for one lookup invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupStage {
    /// Invocation entered.
    Idle,
    /// Normalizer running.
    Validating,
    /// Providers racing.
    Dispatching,
    /// A provider succeeded.
    Resolved,
    /// Terminated with an aggregated error of the given kind.
    Failed(ErrorKind),
}

impl LookupStage {
    /// `Resolved` and `Failed` are final; there is no retry transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LookupStage::Resolved | LookupStage::Failed(_))
    }

    /// Whether `next` is a legal transition from `self`.
    pub fn can_transition_to(&self, next: LookupStage) -> bool {
        use LookupStage::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Dispatching)
                | (Validating, Failed(ErrorKind::ValidationError))
                | (Dispatching, Resolved)
                | (Dispatching, Failed(ErrorKind::ServiceError))
        )
    }
}

impl fmt::Display for LookupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupStage::Idle => f.write_str("idle"),
            LookupStage::Validating => f.write_str("validating"),
            LookupStage::Dispatching => f.write_str("dispatching"),
            LookupStage::Resolved => f.write_str("resolved"),
            LookupStage::Failed(kind) => write!(f, "failed[{kind}]"),
        }
    }
}
