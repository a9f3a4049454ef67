//! # Domain Module
//!
//! Core domain types for CEP lookup: raw input, normalized codes, address
//! results, provider failures and the aggregated boundary error.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
