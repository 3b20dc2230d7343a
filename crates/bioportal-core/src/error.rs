//! Error taxonomy surfaced by every dictionary operation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message BioPortal sends with a 404 when a single ontology is requested by
/// an acronym it does not know. Such a reply means "no results", not failure.
pub const NO_SUCH_ONTOLOGY_MESSAGE: &str =
    "You must provide a valid `acronym` to retrieve an ontology";

/// A non-2xx reply from BioPortal.
///
/// BioPortal answers errors either as `{"errors": [..], "status": N}` or as
/// `{"error": "..", "status": N}`; both end up in `errors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("BioPortal returned status {status}: {}", .errors.join("; "))]
pub struct ApiError {
    pub status: u16,
    pub errors: Vec<String>,
}

#[derive(Deserialize)]
struct RawErrorBody {
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiError {
    /// Build from the HTTP status and raw body of an error reply. The status
    /// line is authoritative; a `status` field in the body is ignored.
    pub fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<RawErrorBody>(body) {
            Ok(raw) => {
                let mut errors = raw.errors;
                if let Some(error) = raw.error {
                    errors.push(error);
                }
                Self { status, errors }
            }
            Err(_) => {
                let text = body.trim();
                let errors = if text.is_empty() {
                    Vec::new()
                } else {
                    vec![text.to_string()]
                };
                Self { status, errors }
            }
        }
    }

    /// Whether this is the "no such ontology" reply that BioPortal sends for
    /// a per-ontology lookup with an unknown acronym.
    pub fn is_no_such_ontology(&self) -> bool {
        self.status == 404 && self.errors.iter().any(|e| e == NO_SUCH_ONTOLOGY_MESSAGE)
    }
}

/// Every failure a dictionary operation can report.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// Non-2xx status with a (possibly unparseable) error body.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A 2xx reply whose body is not the JSON we expected.
    #[error("malformed response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request never produced an HTTP reply.
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// An in-flight request task panicked or was cancelled.
    #[error("request task failed: {0}")]
    Task(String),
}

impl DictionaryError {
    /// Benign errors are masked as an empty result for the one URL that
    /// produced them and never reach the caller.
    pub fn is_benign(&self) -> bool {
        matches!(self, DictionaryError::Api(api) if api.is_no_such_ontology())
    }

    /// The HTTP status, for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            DictionaryError::Api(api) => Some(api.status),
            _ => None,
        }
    }
}

pub type DictionaryResult<T> = Result<T, DictionaryError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
