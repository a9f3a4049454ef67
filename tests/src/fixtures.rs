//! # Test Fixtures
//!
//! Shared helpers for the integration suite: canned addresses, a provider
//! that never settles, and a scripted axum server standing in for Correios
//! and ViaCEP on localhost.

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use cep_lookup::{AddressResult, CepProvider, NormalizedCode, ProviderFailure};

/// The Avenida Paulista address as a given provider would report it.
pub fn paulista_address(service: &str) -> AddressResult {
    AddressResult {
        cep: "01310930".to_string(),
        state: "SP".to_string(),
        city: "São Paulo".to_string(),
        neighborhood: "Bela Vista".to_string(),
        street: "Avenida Paulista".to_string(),
        service: service.to_string(),
    }
}

/// Provider whose lookup never settles.
pub struct PendingProvider {
    /// Service name.
    pub name: String,
    /// Number of lookups started.
    pub started: Arc<AtomicUsize>,
}

impl PendingProvider {
    /// Create a pending provider.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            started: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl CepProvider for PendingProvider {
    async fn fetch(&self, _code: &NormalizedCode) -> Result<AddressResult, ProviderFailure> {
        self.started.fetch_add(1, Ordering::SeqCst);
        futures::future::pending().await
    }

    fn service_name(&self) -> &str {
        &self.name
    }
}

/// Path of the Correios SOAP endpoint on the scripted server.
pub const CORREIOS_PATH: &str = "/SigepMasterJPA/AtendeClienteService/AtendeCliente";

/// Path of the ViaCEP lookup route on the scripted server.
pub const VIACEP_PATH: &str = "/ws/:cep/json/";

/// Canned HTTP response.
#[derive(Clone, Debug)]
pub struct ScriptedResponse {
    /// Status code.
    pub status: StatusCode,
    /// `Content-Type` header.
    pub content_type: &'static str,
    /// Response body.
    pub body: String,
    /// Delay before answering.
    pub delay: Duration,
}

impl ScriptedResponse {
    /// JSON response with status 200.
    pub fn json(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "application/json",
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    /// XML response with the given status.
    pub fn xml(status: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            content_type: "text/xml;charset=UTF-8",
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    /// Answer only after `ms` milliseconds.
    pub fn delayed_ms(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }
}

/// A request as seen by the scripted server.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Path and query.
    pub uri: Uri,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body.
    pub body: String,
}

impl RecordedRequest {
    /// Value of header `name`, if present and valid UTF-8.
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Handle to a running scripted server.
pub struct ScriptedServer {
    /// `http://127.0.0.1:<port>`
    pub base_url: String,
    /// Requests received, in arrival order.
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
    /// Number of requests answered by a provider route.
    pub hits: Arc<AtomicUsize>,
}

#[derive(Clone)]
struct ServerState {
    response: ScriptedResponse,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    hits: Arc<AtomicUsize>,
}

/// Spawn a server answering both provider routes with `response`.
pub async fn spawn_scripted_server(response: ScriptedResponse) -> std::io::Result<ScriptedServer> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);

    let state = ServerState {
        response,
        requests: Arc::new(Mutex::new(Vec::new())),
        hits: Arc::new(AtomicUsize::new(0)),
    };
    let server = ScriptedServer {
        base_url,
        requests: state.requests.clone(),
        hits: state.hits.clone(),
    };

    let router = Router::new()
        .route(CORREIOS_PATH, post(respond))
        .route(VIACEP_PATH, get(respond))
        .with_state(state);

    tokio::spawn(async move { axum::serve(listener, router).await });

    Ok(server)
}

async fn respond(
    State(state): State<ServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.requests.lock().push(RecordedRequest {
        method,
        uri,
        headers,
        body,
    });

    let scripted = state.response;
    if !scripted.delay.is_zero() {
        tokio::time::sleep(scripted.delay).await;
    }

    (
        scripted.status,
        [(header::CONTENT_TYPE, scripted.content_type)],
        scripted.body,
    )
        .into_response()
}
