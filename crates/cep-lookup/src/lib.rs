//! # CEP Lookup
//!
//! Resolves Brazilian postal codes (CEP) by racing redundant address
//! providers.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Normalize raw input to exactly 8 digits before any network activity
//! - Query every provider concurrently and return the first success
//! - Fail only when every provider failed, with one aggregated error
//!
//! ## Failure Model
//!
//! | Kind | When | Records |
//! |------|------|---------|
//! | `validation_error` | Wrong input type, or more than 8 digits | One, service `cep_validation` |
//! | `service_error` | Every provider failed | One per provider, settlement order |
//!
//! There are no retries, timeouts or caches: a lookup is single-shot.
//!
//! ## Module Structure
//!
//! ```text
//! cep-lookup/
//! ├── domain/          # RawInput, NormalizedCode, AddressResult, errors
//! ├── algorithms/      # Normalizer, first-success race, error aggregation
//! ├── ports/           # CepLookupApi (inbound), CepProvider (outbound)
//! ├── adapters/        # Correios (SOAP) and ViaCEP (JSON) providers
//! ├── application/     # CepLookupService composing the pipeline
//! └── config.rs        # CepLookupConfig
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cep_lookup::{CepLookupApi, CepLookupConfig, CepLookupService};
//!
//! let service = CepLookupService::from_config(&CepLookupConfig::from_env()?)?;
//! let address = service.lookup("01310-930".into()).await?;
//! println!("{} - {}", address.street, address.city);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{build_http_client, providers_from_config, CorreiosProvider, ViaCepProvider};
pub use algorithms::{
    aggregate_service_failures, aggregate_validation_failure, normalize, race_first_success,
};
pub use application::CepLookupService;
pub use config::{CepLookupConfig, ConfigError, ProviderKind};
pub use domain::{
    AddressResult, CepLookupError, ErrorKind, FailureRecord, LookupStage, NormalizedCode,
    ProviderFailure, RawInput, ValidationError, CEP_SIZE, VALIDATION_STAGE,
};
pub use ports::{CepLookupApi, CepProvider, MockProvider};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
