//! # Inbound Ports
//!
//! API trait defining what a CEP lookup can do.

use async_trait::async_trait;

use crate::domain::{AddressResult, CepLookupError, RawInput};

/// CEP lookup API - inbound port.
#[async_trait]
pub trait CepLookupApi: Send + Sync {
    /// Normalize `raw` and race every configured provider for it.
    ///
    /// Returns the first provider success, or a single aggregated error:
    /// `validation_error` before any provider is contacted, `service_error`
    /// once every provider has failed.
    async fn lookup(&self, raw: RawInput) -> Result<AddressResult, CepLookupError>;

    /// Names of the configured providers, in configuration order.
    fn provider_names(&self) -> Vec<String>;
}
