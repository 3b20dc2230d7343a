//! URL Builder: turns a query plus [`Options`] into the BioPortal request
//! URLs for one logical query.
//!
//! Query parameters are always emitted in the same order: query term,
//! ontology restriction, exact-match flags, `page`, `pagesize`, and finally
//! `display_context=false`. Every URL for a search goes out twice, once per
//! [`Endpoint`] variant, primary first.

use crate::config::Endpoints;
use crate::options::Options;
use crate::partition::split_dicts;

const NO_CONTEXT: &str = "display_context=false";
const EXACT_MATCH: &str = "&require_exact_match=true";
const ALSO_OBSOLETE: &str = "&also_search_obsolete=true";
const ONTOLOGY_TYPES: &str = "&ontology_types=ONTOLOGY";

/// The two search endpoint families. Their responses have different shapes,
/// so the mapper needs to know which one answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `/search`: records carry `prefLabel` / `synonym`.
    Search,
    /// `/property_search`: records carry `label` / `labelGenerated`.
    PropertySearch,
}

impl Endpoint {
    pub const BOTH: [Endpoint; 2] = [Endpoint::Search, Endpoint::PropertySearch];
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Search => write!(f, "search"),
            Endpoint::PropertySearch => write!(f, "property_search"),
        }
    }
}

/// One request of a request group, tagged with the endpoint it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUrl {
    pub endpoint: Endpoint,
    pub url: String,
}

/// Builds request URLs against a fixed set of endpoints.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    endpoints: Endpoints,
}

impl UrlBuilder {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // -----------------------------------------------------------------------
    // Match search
    // -----------------------------------------------------------------------

    /// URLs for a free-text search: 2 or 4, in merge-priority order
    /// (preferred group first, primary endpoint before property endpoint).
    ///
    /// The caller short-circuits empty queries before getting here.
    pub fn match_urls(&self, query: &str, options: &Options) -> Vec<RequestUrl> {
        let split = split_dicts(options);
        let pref = acronyms(&split.preferred);
        let rest = acronyms(&split.rest);

        let groups: Vec<Vec<&str>> = match (pref.is_empty(), rest.is_empty()) {
            (true, true) => vec![vec![]],
            (true, false) => vec![rest],
            (false, true) if options.is_first_page() => vec![pref, vec![]],
            (false, true) => vec![vec![]],
            (false, false) if options.is_first_page() => vec![pref, rest],
            (false, false) => vec![pref.into_iter().chain(rest).collect()],
        };

        groups
            .iter()
            .flat_map(|ontologies| self.match_group(query, options, ontologies))
            .collect()
    }

    fn match_group(&self, query: &str, options: &Options, ontologies: &[&str]) -> Vec<RequestUrl> {
        Endpoint::BOTH
            .into_iter()
            .map(|endpoint| {
                let mut url = format!(
                    "{}?q={}",
                    self.endpoint_url(endpoint),
                    encode_uri_component_strict(query)
                );
                if !ontologies.is_empty() {
                    url.push_str("&ontologies=");
                    url.push_str(&ontologies.join(","));
                }
                push_paging(&mut url, options);
                RequestUrl { endpoint, url }
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Entry lookup
    // -----------------------------------------------------------------------

    /// URLs for an entry lookup. With `filter.id` there are two URLs per id
    /// (primary, property); without, a single bulk URL on the primary
    /// endpoint that lists ontology-typed records.
    pub fn entry_urls(&self, options: &Options) -> Vec<RequestUrl> {
        let ontologies = acronyms(&options.filter_dict_id).join(",");

        if !options.has_filter_id() {
            let mut url = format!("{}?ontologies={}{}", self.endpoints.search, ontologies, ONTOLOGY_TYPES);
            push_paging(&mut url, options);
            return vec![RequestUrl { endpoint: Endpoint::Search, url }];
        }

        options
            .filter_id
            .iter()
            .flat_map(|id| {
                let ontologies = ontologies.as_str();
                Endpoint::BOTH.into_iter().map(move |endpoint| {
                    let mut url = format!(
                        "{}?q={}&ontologies={}{}",
                        self.endpoint_url(endpoint),
                        encode_uri_component_strict(id),
                        ontologies,
                        EXACT_MATCH
                    );
                    if endpoint == Endpoint::Search {
                        url.push_str(ALSO_OBSOLETE);
                    }
                    push_paging(&mut url, options);
                    RequestUrl { endpoint, url }
                })
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Dictionary info
    // -----------------------------------------------------------------------

    /// One URL per requested dictionary (deduplicated, first occurrence
    /// kept), or a single URL listing every ontology.
    pub fn dict_info_urls(&self, options: &Options) -> Vec<String> {
        if !options.has_filter_id() {
            return vec![self.dict_info_url(None)];
        }

        let mut urls: Vec<String> = Vec::with_capacity(options.filter_id.len());
        for dict_id in &options.filter_id {
            let url = self.dict_info_url(Some(last_path_segment(dict_id)));
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
        urls
    }

    /// `{dict_info}{acronym}?display_context=false`; no or empty acronym
    /// asks for every ontology.
    pub fn dict_info_url(&self, acronym: Option<&str>) -> String {
        format!("{}{}?{}", self.endpoints.dict_info, acronym.unwrap_or(""), NO_CONTEXT)
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Search => &self.endpoints.search,
            Endpoint::PropertySearch => &self.endpoints.property_search,
        }
    }
}

fn push_paging(url: &mut String, options: &Options) {
    if let Some(page) = options.page {
        url.push_str(&format!("&page={page}"));
    }
    if let Some(per_page) = options.per_page {
        url.push_str(&format!("&pagesize={per_page}"));
    }
    url.push('&');
    url.push_str(NO_CONTEXT);
}

fn acronyms(dict_ids: &[String]) -> Vec<&str> {
    dict_ids.iter().map(|id| last_path_segment(id)).collect()
}

// ---------------------------------------------------------------------------
// String helpers
// ---------------------------------------------------------------------------

/// Percent-encode a URI component the RFC 3986 way: only unreserved
/// characters (`A–Z a–z 0–9 - _ . ~`) pass through. Unlike the lax encoders,
/// `! ' ( ) *` are encoded too, which BioPortal requires.
pub fn encode_uri_component_strict(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Text after the last `/` (the whole string when there is none). Used to
/// turn ontology URLs into acronyms.
pub fn last_path_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Whether a URL asks for an entry by exact id.
pub fn is_exact_id_query(url: &str) -> bool {
    url.contains(EXACT_MATCH)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
