//! # Outbound Ports
//!
//! The provider contract the race consumes. A provider only has to settle
//! with an address or a named failure; how it gets there is its own business.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{AddressResult, NormalizedCode, ProviderFailure};

/// Address provider - outbound port.
#[async_trait]
pub trait CepProvider: Send + Sync {
    /// Resolve a normalized code into an address.
    ///
    /// Failures must carry this provider's `service_name()`.
    async fn fetch(&self, code: &NormalizedCode) -> Result<AddressResult, ProviderFailure>;

    /// Identifying name reported on success and failure.
    fn service_name(&self) -> &str;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// Mock provider with a scripted outcome and latency.
///
/// Clones share the call log, so a test can keep one clone for assertions
/// after handing another to the service.
#[derive(Clone)]
pub struct MockProvider {
    /// Service name.
    pub name: String,
    /// Simulated latency before settling.
    pub delay: Duration,
    /// Should the lookup fail?
    pub should_fail: bool,
    /// Message used when failing.
    pub failure_message: String,
    /// Fixed address to return; derived from the code when `None`.
    pub address: Option<AddressResult>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            delay: Duration::ZERO,
            should_fail: false,
            failure_message: "mock failure".to_string(),
            address: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockProvider {
    /// A provider that always resolves.
    pub fn succeeding(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// A provider that always fails with `message`.
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            should_fail: true,
            failure_message: message.into(),
            ..Default::default()
        }
    }

    /// Settle only after `ms` milliseconds.
    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }

    /// Return `address` verbatim on success.
    pub fn with_address(mut self, address: AddressResult) -> Self {
        self.address = Some(address);
        self
    }

    /// Codes this provider was asked for, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Number of lookups received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl CepProvider for MockProvider {
    async fn fetch(&self, code: &NormalizedCode) -> Result<AddressResult, ProviderFailure> {
        self.calls.lock().push(code.to_string());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.should_fail {
            return Err(ProviderFailure::new(&self.failure_message, &self.name));
        }

        Ok(self.address.clone().unwrap_or_else(|| AddressResult {
            cep: code.to_string(),
            state: "SP".to_string(),
            city: "São Paulo".to_string(),
            neighborhood: "Bela Vista".to_string(),
            street: "Avenida Paulista".to_string(),
            service: self.name.clone(),
        }))
    }

    fn service_name(&self) -> &str {
        &self.name
    }
}
