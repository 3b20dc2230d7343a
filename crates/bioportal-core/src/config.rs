//! Configuration types for the BioPortal client.
//!
//! [`ClientConfig::load`] layers `~/.config/bioportal/config.toml` and
//! `BIOPORTAL_*` environment variables on top of the embedded defaults.
//! [`ClientConfig::defaults`] returns the same defaults without touching the
//! filesystem or environment (useful in tests).
//!
//! The configuration is read-only once a client is built from it; endpoint
//! URLs are resolved once via [`ClientConfig::endpoints`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
base_url = "http://data.bioontology.org"
api_key  = ""
log      = false

[endpoints]
# Full-URL overrides; each defaults to a path under base_url.
# search_url          = "http://data.bioontology.org/search"
# property_search_url = "http://data.bioontology.org/property_search"
# dict_info_url       = "http://data.bioontology.org/ontologies/"

[limits]
default_page                = 1
default_page_size           = 50
max_page_size               = 5000
max_ontologies_with_same_id = 130
"#;

const ENV_PREFIX: &str = "BIOPORTAL";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sent as `Authorization: apikey token=<api_key>` on every request.
    #[serde(default)]
    pub api_key: String,
    /// Log each dispatched URL at `info` instead of `debug`.
    #[serde(default)]
    pub log: bool,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// `[endpoints]` section: optional full-URL overrides, mostly for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EndpointsConfig {
    pub search_url: Option<String>,
    pub property_search_url: Option<String>,
    pub dict_info_url: Option<String>,
}

/// `[limits]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_page")]
    pub default_page: u32,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Largest `pagesize` BioPortal accepts.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
    /// Largest number of ontologies observed to share a single concept id
    /// (109, for `owl#Thing`), plus headroom.
    #[serde(default = "default_max_ontologies_with_same_id")]
    pub max_ontologies_with_same_id: u32,
}

fn default_base_url() -> String { "http://data.bioontology.org".to_string() }
fn default_page() -> u32 { 1 }
fn default_page_size() -> u32 { 50 }
fn default_max_page_size() -> u32 { 5000 }
fn default_max_ontologies_with_same_id() -> u32 { 130 }

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            default_page: default_page(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            max_ontologies_with_same_id: default_max_ontologies_with_same_id(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Fully-resolved endpoint URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Primary text/id search.
    pub search: String,
    /// Secondary property-based search.
    pub property_search: String,
    /// Per-ontology info; the acronym is appended directly.
    pub dict_info: String,
}

impl ClientConfig {
    /// Load from `~/.config/bioportal/config.toml` and the environment,
    /// layered on top of the built-in defaults. A missing file is fine.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Like [`load`](Self::load) but reads the given file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    /// Resolve endpoint URLs, honouring any `[endpoints]` overrides.
    pub fn endpoints(&self) -> Endpoints {
        let base = self.base_url.trim_end_matches('/');
        Endpoints {
            search: self
                .endpoints
                .search_url
                .clone()
                .unwrap_or_else(|| format!("{base}/search")),
            property_search: self
                .endpoints
                .property_search_url
                .clone()
                .unwrap_or_else(|| format!("{base}/property_search")),
            dict_info: self
                .endpoints
                .dict_info_url
                .clone()
                .unwrap_or_else(|| format!("{base}/ontologies/")),
        }
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("apikey token={}", self.api_key)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("bioportal")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
