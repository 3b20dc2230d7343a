//! bioportal: BioPortal as a dictionary for term-matching libraries.
//!
//! Maps BioPortal's ontology REST API onto three dictionary operations:
//! free-text match search, entry lookup by id, and ontology info. The
//! work is split across two crates, both re-exported here so integration
//! tests and the CLI import one path.
//!
//! # Architecture
//!
//! ```text
//!                       ┌─────────────── bioportal-core ───────────────┐
//! Options ──► partition ──► url ─┐                      ┌─► pipeline ──► disambiguate ──► Items
//!                                │                      │
//!                       ┌────────┼── bioportal-client ──┼──┐
//!                       │        ▼                      │  │
//!                       │   Dispatcher ──► Transport ──► mapper (per response)
//!                       └──────────────────────────────────┘
//! ```
//!
//! Every query is stateless: a request group is built, dispatched
//! concurrently, joined, and reconciled. Nothing is cached between calls.

pub use bioportal_client::{BioPortalDictionary, Dispatcher, HttpResponse, HyperTransport, Transport, TransportError};
pub use bioportal_core::{
    config, disambiguate, error, mapper, options, partition, pipeline, types, url, ApiError, ClientConfig,
    DictInfo, DictionaryError, DictionaryResult, EntryRecord, EntrySort, Items, MatchRecord, MatchType, Options,
    Term, ZMap, ZProps,
};
