//! bioportal-core: pure query logic for the BioPortal dictionary adapter.
//!
//! This crate holds everything that does not touch the network: the record
//! types handed back to callers, the validated [`Options`] schema, the
//! immutable client configuration, and the stages of the query pipeline.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──► url ──► (transport, in bioportal-client) ──► mapper ──┐
//! Options ──► partition                                                      ▼
//!                                                              pipeline ──► disambiguate
//! ```
//!
//! The async side (fan-out, join barrier, HTTP) lives in `bioportal-client`;
//! this crate only decides *which* URLs to issue and *how* to reconcile what
//! comes back.

pub mod config;
pub mod disambiguate;
pub mod error;
pub mod mapper;
pub mod options;
pub mod partition;
pub mod pipeline;
pub mod types;
pub mod url;

pub use config::ClientConfig;
pub use error::{ApiError, DictionaryError, DictionaryResult};
pub use options::{EntrySort, Options, ZProps};
pub use types::{DictInfo, EntryRecord, Items, MatchRecord, MatchType, Term, ZMap};
pub use url::{Endpoint, RequestUrl, UrlBuilder};
