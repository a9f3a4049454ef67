//! # CEP Lookup Service
//!
//! Application service composing the pipeline:
//!
//! ```text
//! Idle → Validating ─┬→ Failed[validation_error]
//!                    └→ Dispatching ─┬→ Resolved
//!                                    └→ Failed[service_error]
//! ```
//!
//! Every invocation is single-shot and shares no state with any other.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::adapters::{build_http_client, providers_from_config};
use crate::algorithms::{
    aggregate_service_failures, aggregate_validation_failure, normalize, race_first_success,
};
use crate::config::{CepLookupConfig, ConfigError};
use crate::domain::{
    AddressResult, CepLookupError, ErrorKind, LookupStage, NormalizedCode, ProviderFailure,
    RawInput,
};
use crate::ports::{CepLookupApi, CepProvider};

/// CEP Lookup Service - races providers for a normalized code.
pub struct CepLookupService {
    /// Providers, in configuration order. Order never affects the outcome.
    providers: Vec<Arc<dyn CepProvider>>,
}

impl CepLookupService {
    /// Create a service racing `providers`.
    ///
    /// An empty list is accepted but every lookup then fails with an empty
    /// `service_error`.
    pub fn new(providers: Vec<Arc<dyn CepProvider>>) -> Self {
        if providers.is_empty() {
            warn!("CEP lookup service created without providers; every lookup will fail");
        }
        Self { providers }
    }

    /// Build the HTTP client and the configured providers.
    pub fn from_config(config: &CepLookupConfig) -> Result<Self, ConfigError> {
        let client = build_http_client(config)?;
        Ok(Self::new(providers_from_config(config, &client)))
    }

    /// Add a provider to the race.
    pub fn with_provider(mut self, provider: Arc<dyn CepProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Number of configured providers.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    async fn dispatch(
        provider: &dyn CepProvider,
        code: &NormalizedCode,
    ) -> Result<AddressResult, ProviderFailure> {
        let outcome = provider.fetch(code).await;
        if let Err(failure) = &outcome {
            warn!(
                service = %failure.service,
                error = %failure.message,
                "provider failed"
            );
        }
        outcome
    }

    async fn run(&self, raw: RawInput) -> Result<AddressResult, CepLookupError> {
        let mut stage = LookupStage::Idle;
        advance(&mut stage, LookupStage::Validating);

        let code = match normalize(&raw) {
            Ok(code) => code,
            Err(err) => {
                advance(&mut stage, LookupStage::Failed(ErrorKind::ValidationError));
                warn!(reason = %err, "rejected CEP input");
                return Err(aggregate_validation_failure(&err));
            }
        };

        advance(&mut stage, LookupStage::Dispatching);
        debug!(cep = %code, providers = self.providers.len(), "racing providers");

        let race = self
            .providers
            .iter()
            .map(|provider| Self::dispatch(provider.as_ref(), &code));

        match race_first_success(race).await {
            Ok(address) => {
                advance(&mut stage, LookupStage::Resolved);
                info!(cep = %code, service = %address.service, "CEP resolved");
                Ok(address)
            }
            Err(failures) => {
                advance(&mut stage, LookupStage::Failed(ErrorKind::ServiceError));
                error!(cep = %code, failures = failures.len(), "all providers failed");
                Err(aggregate_service_failures(failures))
            }
        }
    }
}

fn advance(stage: &mut LookupStage, next: LookupStage) {
    debug_assert!(stage.can_transition_to(next), "illegal transition {stage} -> {next}");
    debug!(from = %stage, to = %next, "lookup stage");
    *stage = next;
}

#[async_trait]
impl CepLookupApi for CepLookupService {
    async fn lookup(&self, raw: RawInput) -> Result<AddressResult, CepLookupError> {
        let span = info_span!("cep_lookup", input_kind = raw.kind());
        self.run(raw).instrument(span).await
    }

    fn provider_names(&self) -> Vec<String> {
        self.providers
            .iter()
            .map(|p| p.service_name().to_string())
            .collect()
    }
}
