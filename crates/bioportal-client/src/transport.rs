//! The GET-with-header primitive every request goes through.
//!
//! [`Transport`] is the seam tests and embedders plug into; [`HyperTransport`]
//! is the bundled plain-HTTP implementation.

use futures::future::BoxFuture;
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::header::AUTHORIZATION;
use hyper::Request;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use thiserror::Error;

/// Status and body of a completed HTTP exchange, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced an HTTP reply.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Issue a GET to `url` with the given `Authorization` header value.
///
/// The returned future owns everything it needs so it can be spawned.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, authorization: &str) -> BoxFuture<'static, Result<HttpResponse, TransportError>>;
}

/// [`Transport`] over a pooled `hyper` client. Plain HTTP only.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Empty<Bytes>>,
}

impl HyperTransport {
    pub fn new() -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
        }
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
    fn get(&self, url: &str, authorization: &str) -> BoxFuture<'static, Result<HttpResponse, TransportError>> {
        let client = self.client.clone();
        let request = Request::get(url)
            .header(AUTHORIZATION, authorization)
            .body(Empty::<Bytes>::new());

        Box::pin(async move {
            let request = request.map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
            let response = client
                .request(request)
                .await
                .map_err(|e| TransportError::Connect(e.to_string()))?;

            let status = response.status().as_u16();
            let bytes = response
                .into_body()
                .collect()
                .await
                .map_err(|e| TransportError::Body(e.to_string()))?
                .to_bytes();

            Ok(HttpResponse {
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            })
        })
    }
}
