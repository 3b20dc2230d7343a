//! bioportal-client: the async half of the BioPortal dictionary adapter.
//!
//! ```text
//!  BioPortalDictionary ──► UrlBuilder (core) ──► Dispatcher ──► Transport ──► BioPortal
//!          ▲                                         │
//!          └──── pipeline finalizers (core) ◄── slots┘
//! ```
//!
//! [`Transport`] is the only I/O seam; swap it to run against anything that
//! speaks HTTP GET.

pub mod dictionary;
pub mod fanout;
pub mod transport;

pub use dictionary::BioPortalDictionary;
pub use fanout::Dispatcher;
pub use transport::{HttpResponse, HyperTransport, Transport, TransportError};
