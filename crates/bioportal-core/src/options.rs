//! Validated query options.
//!
//! Callers of the dictionary interface pass loosely-shaped JSON options. They
//! are validated exactly once, at the entry point of each public operation,
//! into an [`Options`] value; nothing downstream re-checks presence or shape.
//!
//! | JSON field      | Valid form                                   | Otherwise          |
//! |-----------------|----------------------------------------------|--------------------|
//! | `filter.id`     | array of strings                             | `[]`               |
//! | `filter.dictID` | array of strings                             | `[]`               |
//! | `sort.dictID`   | `sort` is an object with a string array      | `[]`               |
//! | `sort`          | `"dictID"`, `"id"` or `"str"`                | `EntrySort::DictId`|
//! | `z`             | `true`, `false`, a string, a string array    | `ZProps::All`      |
//! | `page`          | integer ≥ 1                                  | `None`             |
//! | `perPage`       | integer ≥ 1                                  | `None`             |
//! | `getAllResults` | boolean                                      | `false`            |
//!
//! Blank strings and non-strings inside the id arrays are dropped.

use serde::Deserialize;
use serde_json::Value;

/// Comparator used when entry lookups are sorted client-side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntrySort {
    /// `dictID`, then `id`.
    #[default]
    DictId,
    /// `id` only.
    Id,
    /// Primary term, then `dictID`, then `id`.
    Str,
}

/// Which `z` properties survive z-pruning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ZProps {
    /// Keep every property.
    #[default]
    All,
    /// Drop `z` entirely.
    Nothing,
    /// Keep only the listed keys.
    Only(Vec<String>),
}

/// Options accepted by the three dictionary operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct Options {
    pub filter_id: Vec<String>,
    pub filter_dict_id: Vec<String>,
    pub sort_dict_id: Vec<String>,
    pub entry_sort: EntrySort,
    pub z: ZProps,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub get_all_results: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse leniently from caller-supplied JSON. Malformed fields are
    /// treated as absent; this never fails.
    pub fn from_json(value: &Value) -> Self {
        let filter = value.get("filter");
        let sort = value.get("sort");

        Self {
            filter_id: string_list(filter.and_then(|f| f.get("id"))),
            filter_dict_id: string_list(filter.and_then(|f| f.get("dictID"))),
            sort_dict_id: string_list(sort.and_then(|s| s.get("dictID"))),
            entry_sort: sort.and_then(parse_entry_sort).unwrap_or_default(),
            z: value.get("z").map(parse_z).unwrap_or_default(),
            page: value.get("page").and_then(positive_integer),
            per_page: value.get("perPage").and_then(positive_integer),
            get_all_results: value
                .get("getAllResults")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }

    pub fn with_filter_id<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_id = clean(ids);
        self
    }

    pub fn with_filter_dict_id<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_dict_id = clean(ids);
        self
    }

    pub fn with_sort_dict_id<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sort_dict_id = clean(ids);
        self
    }

    pub fn with_entry_sort(mut self, sort: EntrySort) -> Self {
        self.entry_sort = sort;
        self
    }

    pub fn with_z(mut self, z: ZProps) -> Self {
        self.z = z;
        self
    }

    /// `0` is not a valid page and leaves the page unset.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = (page >= 1).then_some(page);
        self
    }

    /// `0` is not a valid page size and leaves it unset.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = (per_page >= 1).then_some(per_page);
        self
    }

    pub fn with_get_all_results(mut self, on: bool) -> Self {
        self.get_all_results = on;
        self
    }

    pub fn has_filter_id(&self) -> bool {
        !self.filter_id.is_empty()
    }

    pub fn has_filter_dict_id(&self) -> bool {
        !self.filter_dict_id.is_empty()
    }

    /// Preferred-dictionary boosting only applies to the first page.
    pub fn is_first_page(&self) -> bool {
        matches!(self.page, None | Some(1))
    }
}

impl From<Value> for Options {
    fn from(value: Value) -> Self {
        Options::from_json(&value)
    }
}

impl std::str::FromStr for EntrySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dictID" => Ok(EntrySort::DictId),
            "id" => Ok(EntrySort::Id),
            "str" => Ok(EntrySort::Str),
            other => Err(format!("unknown entry sort: {other} (expected dictID, id or str)")),
        }
    }
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

fn clean<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter()
        .map(Into::into)
        .filter(|s| !s.trim().is_empty())
        .collect()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value.and_then(Value::as_array) {
        Some(arr) => clean(arr.iter().filter_map(Value::as_str)),
        None => Vec::new(),
    }
}

fn parse_entry_sort(value: &Value) -> Option<EntrySort> {
    value.as_str().and_then(|s| s.parse().ok())
}

fn parse_z(value: &Value) -> ZProps {
    match value {
        Value::Bool(true) => ZProps::All,
        Value::Bool(false) => ZProps::Nothing,
        Value::String(key) => ZProps::Only(vec![key.clone()]),
        Value::Array(keys) => ZProps::Only(
            keys.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        _ => ZProps::All,
    }
}

/// An integer ≥ 1. Integral floats such as `2.0` count.
fn positive_integer(value: &Value) -> Option<u32> {
    let n = match value.as_u64() {
        Some(n) => n,
        None => {
            let f = value.as_f64()?;
            if f.fract() != 0.0 || f < 1.0 || f > f64::from(u32::MAX) {
                return None;
            }
            f as u64
        }
    };
    u32::try_from(n).ok().filter(|n| *n >= 1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
