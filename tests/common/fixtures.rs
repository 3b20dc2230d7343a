//! Canned BioPortal response bodies under `tests/fixtures/`, plus the URLs
//! the client is expected to request for them.
//!
//! The bodies are trimmed copies of real BioPortal replies.

use std::path::PathBuf;

/// Read `tests/fixtures/{name}` as a string. Panics when the file is missing.
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {}: {e}", path.display()))
}

pub const MELANOMA_5_RESULTS: &str = "query_melanoma_5_results.json";
pub const MELANOMA_3_RESULTS: &str = "query_melanoma_3_results.json";
pub const MELANOMA_1_RESULT: &str = "query_melanoma_1_result.json";
pub const NO_RESULTS: &str = "query_no_results.json";
pub const PROPERTY_MELANOMA: &str = "property_search_melanoma.json";
pub const GO_ONTOLOGY: &str = "query_go_ontology.json";
pub const ALL_ONTOLOGIES: &str = "query_all_ontologies_pruned.json";
pub const SHARED_BFO_ID: &str = "entries_shared_bfo_id.json";
/// Serialized result of the preferred-dictionaries melanoma query.
pub const EXPECTED_MELANOMA_PREFERRED: &str = "expected_melanoma_preferred.json";
pub const INVALID_API_KEY: &str = "not_valid_api_key_error.json";
/// 404 for a search restricted to an unknown acronym (a hard error).
pub const UNKNOWN_ACRONYM_SEARCH: &str = "error_non_valid_acronym_1.json";
/// 404 for an info request on an unknown acronym (masked as empty).
pub const UNKNOWN_ACRONYM_INFO: &str = "error_non_valid_acronym_2.json";

// ---------------------------------------------------------------------------
// Request paths
// ---------------------------------------------------------------------------

pub const SEARCH_MELANOMA: &str = "/search?q=melanoma&display_context=false";
pub const PROPERTY_SEARCH_MELANOMA: &str = "/property_search?q=melanoma&display_context=false";
pub const SEARCH_MELANOMA_RMV: &str = "/search?q=melanoma&ontologies=RADLEX,MCCL,VO&display_context=false";
pub const PROPERTY_SEARCH_MELANOMA_RMV: &str =
    "/property_search?q=melanoma&ontologies=RADLEX,MCCL,VO&display_context=false";

pub const RADLEX_ID_ENCODED: &str = "http%3A%2F%2Fwww.radlex.org%2FRID%2F%23RID34617";
pub const BFO_ID: &str = "http://purl.obolibrary.org/obo/BFO_0000002";
pub const BFO_ID_ENCODED: &str = "http%3A%2F%2Fpurl.obolibrary.org%2Fobo%2FBFO_0000002";

/// Exact-id lookup path on the primary endpoint.
pub fn entry_search_path(encoded_id: &str, ontologies: &str, paging: &str) -> String {
    format!(
        "/search?q={encoded_id}&ontologies={ontologies}&require_exact_match=true&also_search_obsolete=true{paging}&display_context=false"
    )
}

/// Exact-id lookup path on the property endpoint.
pub fn entry_property_path(encoded_id: &str, ontologies: &str, paging: &str) -> String {
    format!("/property_search?q={encoded_id}&ontologies={ontologies}&require_exact_match=true{paging}&display_context=false")
}

pub fn ontology_path(acronym: &str) -> String {
    format!("/ontologies/{acronym}?display_context=false")
}
