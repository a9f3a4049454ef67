//! # Adapters Layer (Hexagonal Architecture)
//!
//! Concrete `CepProvider` implementations reached over HTTP.

mod correios;
mod http;
mod viacep;

pub use correios::{build_soap_envelope, parse_consulta_response, parse_fault, CorreiosProvider};
pub use http::{build_http_client, AdapterError};
pub use viacep::{parse_viacep_body, ViaCepProvider};

use reqwest::Client;
use std::sync::Arc;

use crate::config::{CepLookupConfig, ProviderKind};
use crate::ports::outbound::CepProvider;

/// Instantiate the configured providers, in configuration order.
pub fn providers_from_config(
    config: &CepLookupConfig,
    client: &Client,
) -> Vec<Arc<dyn CepProvider>> {
    config
        .providers
        .iter()
        .map(|kind| -> Arc<dyn CepProvider> {
            match kind {
                ProviderKind::Correios => {
                    Arc::new(CorreiosProvider::new(client.clone(), &config.correios_url))
                }
                ProviderKind::ViaCep => {
                    Arc::new(ViaCepProvider::new(client.clone(), &config.viacep_base_url))
                }
            }
        })
        .collect()
}
