//! Fan-out / fan-in of the requests of one query.
//!
//! ```text
//!            ┌─ task 0: GET url0 ─► map ─┐
//!   urls ────┼─ task 1: GET url1 ─► map ─┼──► slots[index] ──► pending == 0 ──► Ok(slots)
//!            └─ task N: GET urlN ─► map ─┘          │
//!                                                   └─ hard error ──► detach the rest, Err
//! ```
//!
//! Tasks finish in any order; each one reports its dispatch index, so a
//! result always lands in its own slot. A "no such ontology" reply fills its
//! slot with nothing and the join carries on. Any other error ends the query
//! at once: the remaining tasks are detached and run to completion, but their
//! results are dropped.

use std::sync::Arc;

use bioportal_core::error::{ApiError, DictionaryError, DictionaryResult};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::transport::Transport;

/// Dispatches request groups over a shared [`Transport`].
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    authorization: Arc<str>,
    log_urls: bool,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, authorization: impl Into<Arc<str>>, log_urls: bool) -> Self {
        Self {
            transport,
            authorization: authorization.into(),
            log_urls,
        }
    }

    /// GET every URL concurrently and map each 2xx body with
    /// `parse(dispatch_index, body)`. Returns one slot per URL, in dispatch
    /// order, once all of them have answered.
    pub async fn run<T, F>(&self, urls: Vec<String>, parse: F) -> DictionaryResult<Vec<Vec<T>>>
    where
        T: Send + 'static,
        F: Fn(usize, &str) -> serde_json::Result<Vec<T>> + Send + Sync + 'static,
    {
        let parse = Arc::new(parse);
        let mut slots: Vec<Vec<T>> = std::iter::repeat_with(Vec::new).take(urls.len()).collect();
        let mut pending = urls.len();
        let mut set = JoinSet::new();

        for (index, url) in urls.into_iter().enumerate() {
            if self.log_urls {
                info!(%url, "dispatching");
            } else {
                debug!(%url, "dispatching");
            }

            let response = self.transport.get(&url, &self.authorization);
            let parse = Arc::clone(&parse);
            set.spawn(async move {
                let outcome = match response.await {
                    Ok(res) if res.is_success() => {
                        (*parse)(index, &res.body).map_err(|source| DictionaryError::Parse { url: url.clone(), source })
                    }
                    Ok(res) => Err(ApiError::from_body(res.status, &res.body).into()),
                    Err(e) => Err(DictionaryError::Transport { url: url.clone(), message: e.to_string() }),
                };
                (index, url, outcome)
            });
        }

        while let Some(joined) = set.join_next().await {
            let (index, url, outcome) = match joined {
                Ok(done) => done,
                Err(e) => {
                    set.detach_all();
                    return Err(DictionaryError::Task(e.to_string()));
                }
            };
            pending -= 1;

            match outcome {
                Ok(records) => slots[index] = records,
                Err(err) if err.is_benign() => {
                    debug!(%url, "no such ontology, treating as empty");
                }
                Err(err) => {
                    warn!(%url, error = %err, pending, "request failed, abandoning query");
                    set.detach_all();
                    return Err(err);
                }
            }
        }

        debug_assert_eq!(pending, 0);
        Ok(slots)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
