//! ViaCEP Provider Adapter
//!
//! Implements `CepProvider` against the ViaCEP JSON API
//! (`GET {base}/ws/{cep}/json/`).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::http::AdapterError;
use crate::algorithms::strip_non_digits;
use crate::config::ProviderKind;
use crate::domain::{AddressResult, NormalizedCode, ProviderFailure};
use crate::ports::outbound::CepProvider;

const SERVICE: &str = "viacep";

/// Raw ViaCEP payload. `erro` is present only for unknown codes.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    cep: String,
    #[serde(default)]
    uf: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    erro: Option<serde_json::Value>,
}

/// ViaCEP-backed provider.
pub struct ViaCepProvider {
    client: Client,
    base_url: String,
}

impl ViaCepProvider {
    /// Create a provider using `client` against `base_url`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Lookup URL for `code`.
    pub fn lookup_url(&self, code: &NormalizedCode) -> String {
        format!("{}/ws/{}/json/", self.base_url.trim_end_matches('/'), code)
    }

    async fn request(&self, code: &NormalizedCode) -> Result<AddressResult, AdapterError> {
        let url = self.lookup_url(code);
        debug!(%url, "querying ViaCEP");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::Status(status));
        }

        let body = response.text().await?;
        parse_viacep_body(&body)
    }
}

/// Map a ViaCEP response body into an address.
pub fn parse_viacep_body(body: &str) -> Result<AddressResult, AdapterError> {
    let payload: ViaCepResponse =
        serde_json::from_str(body).map_err(|e| AdapterError::Parse(e.to_string()))?;

    let not_found = match &payload.erro {
        Some(serde_json::Value::Bool(flag)) => *flag,
        Some(serde_json::Value::String(flag)) => flag == "true",
        _ => false,
    };
    if not_found {
        return Err(AdapterError::NotFound(
            "CEP not found in the ViaCEP database".to_string(),
        ));
    }

    Ok(AddressResult {
        cep: strip_non_digits(&payload.cep),
        state: payload.uf,
        city: payload.localidade,
        neighborhood: payload.bairro,
        street: payload.logradouro,
        service: SERVICE.to_string(),
    })
}

fn into_failure(err: AdapterError) -> ProviderFailure {
    let message = match err {
        AdapterError::Http(e) => format!("could not contact the ViaCEP service: {e}"),
        AdapterError::Parse(e) => format!("could not interpret the ViaCEP response: {e}"),
        other => other.to_string(),
    };
    ProviderFailure::new(message, SERVICE)
}

#[async_trait]
impl CepProvider for ViaCepProvider {
    async fn fetch(&self, code: &NormalizedCode) -> Result<AddressResult, ProviderFailure> {
        self.request(code).await.map_err(into_failure)
    }

    fn service_name(&self) -> &str {
        ProviderKind::ViaCep.as_str()
    }
}
