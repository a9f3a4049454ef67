//! # Lookup Configuration
//!
//! Which providers race, and where they live.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CEP_PROVIDERS` | `correios,viacep` | Providers to race, in order |
//! | `CEP_CORREIOS_URL` | Correios AtendeCliente | SOAP endpoint |
//! | `CEP_VIACEP_URL` | `https://viacep.com.br` | ViaCEP base URL |
//! | `CEP_USER_AGENT` | `cep-lookup/<version>` | HTTP user agent |

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Correios SIGEP AtendeCliente SOAP endpoint.
pub const DEFAULT_CORREIOS_URL: &str =
    "https://apps.correios.com.br/SigepMasterJPA/AtendeClienteService/AtendeCliente";

/// ViaCEP base URL.
pub const DEFAULT_VIACEP_URL: &str = "https://viacep.com.br";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Provider name not recognized.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// The shared HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Built-in provider implementations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Correios SOAP service.
    Correios,
    /// ViaCEP JSON service.
    ViaCep,
}

impl ProviderKind {
    /// Service name reported by the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Correios => "correios",
            ProviderKind::ViaCep => "viacep",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "correios" => Ok(ProviderKind::Correios),
            "viacep" => Ok(ProviderKind::ViaCep),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

/// Parse a comma separated provider list, skipping empty entries.
pub fn parse_provider_list(list: &str) -> Result<Vec<ProviderKind>, ConfigError> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ProviderKind::from_str)
        .collect()
}

/// CEP lookup configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CepLookupConfig {
    /// Providers to race, in configuration order.
    pub providers: Vec<ProviderKind>,

    /// Correios SOAP endpoint.
    pub correios_url: String,

    /// ViaCEP base URL (without the `/ws/...` path).
    pub viacep_base_url: String,

    /// User agent sent by every provider.
    pub user_agent: String,
}

impl Default for CepLookupConfig {
    fn default() -> Self {
        Self {
            providers: vec![ProviderKind::Correios, ProviderKind::ViaCep],
            correios_url: DEFAULT_CORREIOS_URL.to_string(),
            viacep_base_url: DEFAULT_VIACEP_URL.to_string(),
            user_agent: format!("cep-lookup/{}", crate::VERSION),
        }
    }
}

impl CepLookupConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let providers = match env::var("CEP_PROVIDERS") {
            Ok(list) => parse_provider_list(&list)?,
            Err(_) => defaults.providers,
        };

        Ok(Self {
            providers,
            correios_url: env::var("CEP_CORREIOS_URL").unwrap_or(defaults.correios_url),
            viacep_base_url: env::var("CEP_VIACEP_URL").unwrap_or(defaults.viacep_base_url),
            user_agent: env::var("CEP_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }

    /// Create a config for testing (local endpoints, ViaCEP only).
    pub fn for_testing() -> Self {
        Self {
            providers: vec![ProviderKind::ViaCep],
            correios_url: "http://127.0.0.1:9/correios".to_string(),
            viacep_base_url: "http://127.0.0.1:9".to_string(),
            user_agent: "cep-lookup-test".to_string(),
        }
    }
}
