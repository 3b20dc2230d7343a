//! Fake BioPortal REST API for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Every request is answered from a table of canned replies keyed
//! by the exact path and query string, so a harness states precisely which
//! URLs it expects the client to build. Anything unregistered gets a `501`
//! with the offending URL in the body, which surfaces in the test failure.
//!
//! # Example
//!
//! ```rust,ignore
//! use common::fake_bioportal::FakeBioPortal;
//!
//! let api = FakeBioPortal::start().await.unwrap();
//! api.reply("/ontologies/GO?display_context=false", 200, "{...}").await;
//!
//! let dictionary = api.dictionary();
//! ```

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use bioportal::{BioPortalDictionary, ClientConfig};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub const TEST_API_KEY: &str = "testAPIKey";

/// One request as the server saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub path_and_query: String,
    pub authorization: Option<String>,
}

/// State shared between the router and test code.
#[derive(Default)]
struct ApiState {
    /// `path?query` → (status, body).
    replies: HashMap<String, (u16, String)>,
    seen: Vec<SeenRequest>,
}

/// Handle to the running fake BioPortal server.
pub struct FakeBioPortal {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeBioPortal {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new().fallback(answer).with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the task a moment to register.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        Ok(Self { addr, state })
    }

    /// Base URL (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Register a canned reply for an exact `path?query`.
    pub async fn reply(&self, path_and_query: &str, status: u16, body: impl Into<String>) {
        self.state
            .lock()
            .await
            .replies
            .insert(path_and_query.to_string(), (status, body.into()));
    }

    /// Every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<SeenRequest> {
        self.state.lock().await.seen.clone()
    }

    /// Received `path?query` strings, sorted (arrival order is not
    /// deterministic for concurrent requests).
    pub async fn requested_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.requests().await.into_iter().map(|r| r.path_and_query).collect();
        paths.sort();
        paths
    }

    /// Client config pointing at this server with the test API key.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::defaults()
            .with_base_url(self.base_url())
            .with_api_key(TEST_API_KEY)
    }

    /// A dictionary over the bundled transport, pointed at this server.
    pub fn dictionary(&self) -> BioPortalDictionary {
        BioPortalDictionary::new(self.config())
    }
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

async fn answer(State(state): State<Arc<Mutex<ApiState>>>, uri: Uri, headers: HeaderMap) -> impl IntoResponse {
    let key = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut state = state.lock().await;
    state.seen.push(SeenRequest {
        path_and_query: key.clone(),
        authorization,
    });

    let (status, body) = match state.replies.get(&key) {
        Some((status, body)) => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body.clone(),
        ),
        None => (
            StatusCode::NOT_IMPLEMENTED,
            format!(r#"{{"status":501,"error":"no canned reply for {key}"}}"#),
        ),
    };

    (status, [(header::CONTENT_TYPE, "application/json")], body)
}
