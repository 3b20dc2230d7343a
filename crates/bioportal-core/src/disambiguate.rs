//! Id Disambiguator.
//!
//! Some concept ids are served by many ontologies (`owl#Thing` by over a
//! hundred). When entries are looked up by id, the record whose ontology
//! actually *owns* the id should come first. Ownership is guessed from the
//! shape of the id URI; this is a best-effort heuristic, and an id that no
//! pattern recognises infers `""` and keeps its first-seen record.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::EntryRecord;

/// Ordered id-shape patterns; the first that matches wins and its first
/// capture group is the inferred abbreviation.
const ID_PATTERNS: &[&str] = &[
    r"ontology/(.*?)/",     // purl.bioontology.org/ontology/MESH/C433048
    r"obo/(.*?)_",          // purl.obolibrary.org/obo/GO_0120069
    r"www\.orpha\.net/(.*?)/",
    r"efo/(.*?)_",          // www.ebi.ac.uk/efo/EFO_0008200
];

fn patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        ID_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect()
    })
}

/// Guess the abbreviation of the ontology that owns `id`, or `""`.
pub fn infer_dict_abbrev(id: &str) -> &str {
    patterns()
        .iter()
        .find_map(|re| re.captures(id).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
        .unwrap_or("")
}

/// For each distinct id in first-seen order, move its best record to the
/// next open position: the one whose `dictAbbrev` equals the inferred
/// owner, else the first record with that id. Other records keep their
/// relative order. Nothing is dropped.
pub fn re_arrange_entries(mut entries: Vec<EntryRecord>) -> Vec<EntryRecord> {
    let unique_ids: Vec<String> = {
        let mut seen = HashSet::new();
        entries
            .iter()
            .filter(|e| seen.insert(e.id.as_str()))
            .map(|e| e.id.clone())
            .collect()
    };

    for (position, id) in unique_ids.iter().enumerate() {
        let owner = infer_dict_abbrev(id);
        let index = entries
            .iter()
            .position(|e| &e.id == id && e.dict_abbrev() == owner)
            .or_else(|| entries.iter().position(|e| &e.id == id));

        if let Some(index) = index.filter(|&i| i != position) {
            let entry = entries.remove(index);
            entries.insert(position, entry);
        }
    }
    entries
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
