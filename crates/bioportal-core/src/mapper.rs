//! Response Mapper: raw BioPortal JSON into normalized records.
//!
//! Both search endpoints answer with a page object whose `collection` holds
//! the concepts, but the concept shape differs:
//!
//! ```text
//!   /search            { "@id", "prefLabel": "..", "synonym": [..], "definition": [..],
//!                        "cui": [..], "semanticType": [..], "obsolete": bool,
//!                        "links": { "ontology": "<dict url>" } }
//!
//!   /property_search   { "@id", "label": [..] | "..", "labelGenerated": [..] | "..",
//!                        "definition": [..], "links": { "ontology": "<dict url>" } }
//! ```
//!
//! The caller knows which endpoint answered from the [`Endpoint`] tag of the
//! request and passes it along; the mapper never sniffs the payload.

use serde::Deserialize;
use serde_json::Value;

use crate::options::Options;
use crate::types::{DictInfo, EntryRecord, MatchRecord, MatchType, Term, ZMap};
use crate::url::{last_path_segment, Endpoint};

// ---------------------------------------------------------------------------
// Raw payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    collection: Vec<RawConcept>,
}

#[derive(Debug, Deserialize)]
struct RawConcept {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "prefLabel", default)]
    pref_label: Option<String>,
    #[serde(default)]
    synonym: OneOrMany,
    #[serde(default)]
    label: OneOrMany,
    #[serde(rename = "labelGenerated", default)]
    label_generated: OneOrMany,
    #[serde(default)]
    definition: OneOrMany,
    #[serde(default)]
    cui: Option<Value>,
    #[serde(rename = "semanticType", default)]
    semantic_type: Option<Value>,
    #[serde(default)]
    obsolete: Option<bool>,
    links: RawLinks,
}

#[derive(Debug, Deserialize)]
struct RawLinks {
    ontology: String,
}

/// BioPortal sends some fields as a bare string or as a list of strings.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "Option<StringOrList>")]
struct OneOrMany(Vec<String>);

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl From<Option<StringOrList>> for OneOrMany {
    fn from(raw: Option<StringOrList>) -> Self {
        match raw {
            Some(StringOrList::One(s)) => OneOrMany(vec![s]),
            Some(StringOrList::Many(v)) => OneOrMany(v),
            None => OneOrMany(Vec::new()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OntologyPayload {
    Many(Vec<RawOntology>),
    One(RawOntology),
}

#[derive(Debug, Deserialize)]
struct RawOntology {
    #[serde(rename = "@id")]
    id: String,
    #[serde(default)]
    acronym: String,
    #[serde(default)]
    name: String,
}

// ---------------------------------------------------------------------------
// Normalized concept
// ---------------------------------------------------------------------------

/// The endpoint-independent view of one raw concept.
struct Concept {
    id: String,
    dict_id: String,
    str: String,
    descr: Option<String>,
    terms: Vec<Term>,
    z: ZMap,
    obsolete: bool,
}

impl RawConcept {
    /// `None` when the record carries no usable label.
    fn normalize(self, endpoint: Endpoint) -> Option<Concept> {
        if self.pref_label.is_none() && self.label.0.is_empty() && self.label_generated.0.is_empty() {
            tracing::debug!(id = %self.id, %endpoint, "skipping concept without a label");
            return None;
        }
        let (str, terms) = match endpoint {
            Endpoint::Search => {
                let main = self.pref_label?;
                let terms = terms_with_synonyms(&main, &self.synonym.0);
                (main, terms)
            }
            Endpoint::PropertySearch => {
                let labels = if self.label.0.is_empty() { self.label_generated.0 } else { self.label.0 };
                let main = labels.first()?.clone();
                (main, distinct_terms(labels))
            }
        };

        let mut z = ZMap::new();
        z.insert("dictAbbrev".into(), last_path_segment(&self.links.ontology).into());
        if let Some(cui) = self.cui {
            z.insert("cui".into(), cui);
        }
        if let Some(tui) = self.semantic_type {
            z.insert("tui".into(), tui);
        }

        Some(Concept {
            id: self.id,
            dict_id: self.links.ontology,
            str,
            descr: self.definition.0.into_iter().next(),
            terms,
            z,
            obsolete: self.obsolete.unwrap_or(false),
        })
    }
}

/// Primary label first, then every synonym that differs from it.
fn terms_with_synonyms(main: &str, synonyms: &[String]) -> Vec<Term> {
    std::iter::once(Term::new(main))
        .chain(synonyms.iter().filter(|s| s.as_str() != main).map(Term::new))
        .collect()
}

fn distinct_terms(labels: Vec<String>) -> Vec<Term> {
    let mut terms: Vec<Term> = Vec::with_capacity(labels.len());
    for label in labels {
        if !terms.iter().any(|t| t.str == label) {
            terms.push(Term::new(label));
        }
    }
    terms
}

fn concepts(body: &str, endpoint: Endpoint) -> serde_json::Result<impl Iterator<Item = Concept>> {
    let page: SearchPage = serde_json::from_str(body)?;
    Ok(page
        .collection
        .into_iter()
        .filter_map(move |raw| raw.normalize(endpoint)))
}

// ---------------------------------------------------------------------------
// Public mappers
// ---------------------------------------------------------------------------

/// Map one search page to match records for `query`.
pub fn map_to_matches(body: &str, endpoint: Endpoint, query: &str) -> serde_json::Result<Vec<MatchRecord>> {
    Ok(concepts(body, endpoint)?
        .map(|c| MatchRecord {
            match_type: if c.str.starts_with(query) { MatchType::S } else { MatchType::T },
            id: c.id,
            dict_id: c.dict_id,
            str: c.str,
            descr: c.descr,
            terms: c.terms,
            z: Some(c.z),
        })
        .collect())
}

/// Map one search page to entry records. `z.obsolete` is only present for
/// lookups by explicit id.
pub fn map_to_entries(body: &str, endpoint: Endpoint, options: &Options) -> serde_json::Result<Vec<EntryRecord>> {
    let by_id = options.has_filter_id();
    Ok(concepts(body, endpoint)?
        .map(|c| {
            let mut z = c.z;
            if by_id {
                z.insert("obsolete".into(), c.obsolete.into());
            }
            EntryRecord {
                id: c.id,
                dict_id: c.dict_id,
                descr: c.descr,
                terms: c.terms,
                z: Some(z),
            }
        })
        .collect())
}

/// Map an ontology reply (a single object, or an array for "all
/// ontologies") to dictionary info records.
pub fn map_to_dict_infos(body: &str) -> serde_json::Result<Vec<DictInfo>> {
    let raw = match serde_json::from_str(body)? {
        OntologyPayload::Many(all) => all,
        OntologyPayload::One(one) => vec![one],
    };
    Ok(raw
        .into_iter()
        .map(|o| DictInfo { id: o.id, abbrev: o.acronym, name: o.name })
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
