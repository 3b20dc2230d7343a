//! Builders for the records a harness expects back.
//!
//! Defaults mirror what the mapper produces for a bare `/search` hit: the
//! primary label as the only term, and `z` holding just `dictAbbrev`.

use bioportal::{DictInfo, EntryRecord, MatchRecord, MatchType, Term, ZMap};
use serde_json::Value;

pub const ONTOLOGIES: &str = "http://data.bioontology.org/ontologies/";

/// `http://data.bioontology.org/ontologies/{abbrev}`
pub fn dict(abbrev: &str) -> String {
    format!("{ONTOLOGIES}{abbrev}")
}

pub fn zmap(value: Value) -> Option<ZMap> {
    value.as_object().cloned()
}

pub fn terms(labels: &[&str]) -> Vec<Term> {
    labels.iter().map(|s| Term::new(*s)).collect()
}

/// Builder for an expected [`MatchRecord`].
pub struct MatchBuilder(MatchRecord);

impl MatchBuilder {
    pub fn new(id: &str, abbrev: &str, s: &str, match_type: MatchType) -> Self {
        Self(MatchRecord {
            id: id.into(),
            dict_id: dict(abbrev),
            str: s.into(),
            descr: None,
            match_type,
            terms: terms(&[s]),
            z: zmap(serde_json::json!({ "dictAbbrev": abbrev })),
        })
    }

    pub fn descr(mut self, descr: &str) -> Self {
        self.0.descr = Some(descr.into());
        self
    }

    pub fn terms(mut self, labels: &[&str]) -> Self {
        self.0.terms = terms(labels);
        self
    }

    pub fn z(mut self, z: Value) -> Self {
        self.0.z = zmap(z);
        self
    }

    pub fn no_z(mut self) -> Self {
        self.0.z = None;
        self
    }

    pub fn build(self) -> MatchRecord {
        self.0
    }
}

/// Builder for an expected [`EntryRecord`].
pub struct EntryBuilder(EntryRecord);

impl EntryBuilder {
    pub fn new(id: &str, abbrev: &str, s: &str) -> Self {
        Self(EntryRecord {
            id: id.into(),
            dict_id: dict(abbrev),
            descr: None,
            terms: terms(&[s]),
            z: zmap(serde_json::json!({ "dictAbbrev": abbrev })),
        })
    }

    pub fn descr(mut self, descr: &str) -> Self {
        self.0.descr = Some(descr.into());
        self
    }

    pub fn terms(mut self, labels: &[&str]) -> Self {
        self.0.terms = terms(labels);
        self
    }

    pub fn z(mut self, z: Value) -> Self {
        self.0.z = zmap(z);
        self
    }

    pub fn build(self) -> EntryRecord {
        self.0
    }
}

pub fn dict_info(abbrev: &str, name: &str) -> DictInfo {
    DictInfo {
        id: dict(abbrev),
        abbrev: abbrev.into(),
        name: name.into(),
    }
}

// ---------------------------------------------------------------------------
// The melanoma records as the pipeline returns them
// ---------------------------------------------------------------------------

pub const DESCR_DERIVES: &str = "A cell type cancer that has_material_basis_in abnormally proliferating cells derives_from melanocytes which are found in skin, the bowel and the eye.";
pub const DESCR_DERIVED: &str = "A cell type cancer that has_material_basis_in abnormally proliferating cells derived_from melanocytes which are found in skin, the bowel and the eye.";

pub const DOID_1909: &str = "http://purl.obolibrary.org/obo/DOID_1909";
pub const RID34617: &str = "http://www.radlex.org/RID/#RID34617";
pub const CSEO_MELANOMA: &str = "http://scai.fraunhofer.de/CSEO#Melanoma";
pub const MCCL_MELANOMA: &str = "http://www.semanticweb.org/pallabi.d/ontologies/2014/2/untitled-ontology-11#Melanoma";

pub fn clo_melanoma() -> MatchBuilder {
    MatchBuilder::new(DOID_1909, "CLO", "melanoma", MatchType::S).descr(DESCR_DERIVES)
}

pub fn radlex_melanoma() -> MatchBuilder {
    MatchBuilder::new(RID34617, "RADLEX", "melanoma", MatchType::S)
}

pub fn vo_melanoma() -> MatchBuilder {
    MatchBuilder::new(DOID_1909, "VO", "melanoma", MatchType::S)
        .descr(DESCR_DERIVED)
        .terms(&["melanoma", "malignant melanoma", "Naevocarcinoma"])
}

pub fn cseo_melanoma() -> MatchBuilder {
    MatchBuilder::new(CSEO_MELANOMA, "CSEO", "Melanoma", MatchType::T)
}

pub fn mccl_melanoma() -> MatchBuilder {
    MatchBuilder::new(MCCL_MELANOMA, "MCCL", "Melanoma", MatchType::T)
}
