//! Record types returned by the dictionary operations.
//!
//! The JSON shape of every type matches what the generic term-matching
//! library expects (`dictID`, `str`, `type`, …), so results can be handed
//! over with `serde_json` untouched.

use serde::{Deserialize, Serialize};

/// Extension properties attached to a record (`dictAbbrev`, `cui`, `tui`,
/// `obsolete`). Subject to z-pruning before results are returned.
pub type ZMap = serde_json::Map<String, serde_json::Value>;

/// The response envelope of every public operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Items<T> {
    pub items: Vec<T>,
}

impl<T> Items<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }
}

/// One term (label) of a concept. The primary label always comes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub str: String,
}

impl Term {
    pub fn new(s: impl Into<String>) -> Self {
        Self { str: s.into() }
    }
}

/// Relevance tag of a match.
///
/// The derived ordering puts `S` before `T`, which is the first key of the
/// match comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchType {
    /// The display string starts with the query string.
    S,
    /// Any other term match.
    T,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::S => write!(f, "S"),
            MatchType::T => write!(f, "T"),
        }
    }
}

/// A concept found by free-text search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    #[serde(rename = "dictID")]
    pub dict_id: String,
    pub str: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descr: Option<String>,
    #[serde(rename = "type")]
    pub match_type: MatchType,
    #[serde(default)]
    pub terms: Vec<Term>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<ZMap>,
}

/// A concept retrieved by exact identifier (or by bulk listing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: String,
    #[serde(rename = "dictID")]
    pub dict_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descr: Option<String>,
    #[serde(default)]
    pub terms: Vec<Term>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<ZMap>,
}

impl EntryRecord {
    /// The primary term, or `""` for a record without terms.
    pub fn primary_str(&self) -> &str {
        self.terms.first().map(|t| t.str.as_str()).unwrap_or("")
    }

    /// The dictionary abbreviation this record reports: `z.dictAbbrev` when
    /// present, otherwise the last path segment of `dictID`.
    pub fn dict_abbrev(&self) -> &str {
        self.z
            .as_ref()
            .and_then(|z| z.get("dictAbbrev"))
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| crate::url::last_path_segment(&self.dict_id))
    }
}

/// Information about one ontology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictInfo {
    pub id: String,
    pub abbrev: String,
    pub name: String,
}

/// Common accessors the pipeline needs from both record kinds.
pub trait Record {
    fn id(&self) -> &str;
    fn dict_id(&self) -> &str;
    fn z_mut(&mut self) -> &mut Option<ZMap>;
}

impl Record for MatchRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn dict_id(&self) -> &str {
        &self.dict_id
    }

    fn z_mut(&mut self) -> &mut Option<ZMap> {
        &mut self.z
    }
}

impl Record for EntryRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn dict_id(&self) -> &str {
        &self.dict_id
    }

    fn z_mut(&mut self) -> &mut Option<ZMap> {
        &mut self.z
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
