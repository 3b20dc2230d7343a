//! Merge–Prune–Sort–Trim pipeline.
//!
//! Runs once every request of a query has answered. Input is one result
//! slot per dispatched URL, in dispatch order:
//!
//! ```text
//!   slots (2 or 4)       prune            collapse          z-prune + sort     concat + trim
//!   ──────────────       ─────            ────────          ──────────────     ─────────────
//!   [P.search]      ─┐                 ┌─ P.search ++ ─┐
//!   [P.property]     │ drop ids seen   │  P.property   ├─► sort(P) ─┐
//!   [R.search]       │ in any earlier ─┤               │            ├─► P ++ R ─► [..perPage]
//!   [R.property]    ─┘ slot            └─ R.search ++ ─┘─► sort(R) ─┘
//!                                         R.property
//! ```
//!
//! Sorting happens inside each collapsed group so preferred results always
//! precede the rest, whatever their alphabetical order.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::config::LimitsConfig;
use crate::options::{EntrySort, Options, ZProps};
use crate::types::{DictInfo, EntryRecord, MatchRecord, Record};

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Remove from each slot the records whose `id` already appeared in an
/// earlier slot. Only request groups of 2 or 4 URLs are reconciled; other
/// shapes pass through untouched.
pub fn prune_common_ids<T: Record>(slots: &mut [Vec<T>]) {
    if !matches!(slots.len(), 2 | 4) {
        return;
    }
    let mut seen: HashSet<String> = HashSet::new();
    for slot in slots.iter_mut() {
        // Ids of this slot only count for later slots.
        slot.retain(|r| !seen.contains(r.id()));
        seen.extend(slot.iter().map(|r| r.id().to_string()));
    }
}

/// Pair up the primary/property slots of each group: 4 slots become
/// `[s0 ++ s1, s2 ++ s3]`, 2 become `[s0 ++ s1]`, anything else is kept.
pub fn collapse<T>(slots: Vec<Vec<T>>) -> Vec<Vec<T>> {
    if !matches!(slots.len(), 2 | 4) {
        return slots;
    }
    let mut groups = Vec::with_capacity(slots.len() / 2);
    let mut iter = slots.into_iter();
    while let (Some(mut primary), Some(property)) = (iter.next(), iter.next()) {
        primary.extend(property);
        groups.push(primary);
    }
    groups
}

/// Strip `z` properties the caller did not ask for. A record never ends up
/// with an empty `z`.
pub fn z_prune<T: Record>(records: &mut [T], z: &ZProps) {
    match z {
        ZProps::All => {}
        ZProps::Nothing => records.iter_mut().for_each(|r| *r.z_mut() = None),
        ZProps::Only(keys) => {
            for record in records.iter_mut() {
                let slot = record.z_mut();
                if let Some(map) = slot.as_mut() {
                    map.retain(|k, _| keys.iter().any(|key| key == k));
                    if map.is_empty() {
                        *slot = None;
                    }
                }
            }
        }
    }
}

/// Case-insensitive string comparison.
fn ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// `type` (S before T), then `str`, then `dictID`. Stable.
pub fn sort_matches(records: &mut [MatchRecord]) {
    records.sort_by(|a, b| {
        a.match_type
            .cmp(&b.match_type)
            .then_with(|| ci(&a.str, &b.str))
            .then_with(|| ci(&a.dict_id, &b.dict_id))
    });
}

/// Entry comparator selected by `sort`. Stable.
pub fn sort_entries(records: &mut [EntryRecord], sort: EntrySort) {
    match sort {
        EntrySort::DictId => records.sort_by(|a, b| ci(&a.dict_id, &b.dict_id).then_with(|| ci(&a.id, &b.id))),
        EntrySort::Id => records.sort_by(|a, b| ci(&a.id, &b.id)),
        EntrySort::Str => records.sort_by(|a, b| {
            ci(a.primary_str(), b.primary_str())
                .then_with(|| ci(&a.dict_id, &b.dict_id))
                .then_with(|| ci(&a.id, &b.id))
        }),
    }
}

/// Keep the first `perPage` records (default page size when unset).
pub fn trim<T>(records: &mut Vec<T>, options: &Options, limits: &LimitsConfig) {
    let per_page = options.per_page.unwrap_or(limits.default_page_size) as usize;
    records.truncate(per_page);
}

/// Drop records repeating an `(id, dictID)` pair seen earlier.
pub fn dedupe<T: Record>(records: &mut Vec<T>) {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    records.retain(|r| seen.insert((r.id().to_string(), r.dict_id().to_string())));
}

// ---------------------------------------------------------------------------
// Finalizers
// ---------------------------------------------------------------------------

/// Merge the per-URL results of a match search.
pub fn finalize_matches(mut slots: Vec<Vec<MatchRecord>>, options: &Options, limits: &LimitsConfig) -> Vec<MatchRecord> {
    prune_common_ids(&mut slots);

    let mut merged = Vec::new();
    for mut group in collapse(slots) {
        z_prune(&mut group, &options.z);
        sort_matches(&mut group);
        merged.extend(group);
    }
    trim(&mut merged, options, limits);
    merged
}

/// Merge the per-URL results of an entry lookup. `options` must already
/// carry the "get all results" override, if any (see [`get_all_results`]).
pub fn finalize_entries(slots: Vec<Vec<EntryRecord>>, options: &Options, limits: &LimitsConfig) -> Vec<EntryRecord> {
    let mut merged: Vec<EntryRecord> = slots.into_iter().flatten().collect();
    dedupe(&mut merged);

    if options.get_all_results && options.has_filter_id() {
        sort_entries(&mut merged, options.entry_sort);
    }
    if options.has_filter_id() {
        merged = crate::disambiguate::re_arrange_entries(merged);
    }
    z_prune(&mut merged, &options.z);
    if !options.get_all_results {
        trim(&mut merged, options, limits);
    }
    merged
}

/// Apply the "get all results" override of entry lookups by id: first page,
/// and a page size large enough to hold every dictionary sharing the id.
/// Returns `None` when the override does not apply.
pub fn get_all_results(options: &Options, limits: &LimitsConfig) -> Option<Options> {
    if !(options.get_all_results && options.has_filter_id()) {
        return None;
    }
    let per_page = if options.has_filter_dict_id() {
        let n = u32::try_from(options.filter_dict_id.len()).unwrap_or(u32::MAX);
        n.min(limits.max_page_size)
    } else {
        limits.max_ontologies_with_same_id
    };
    Some(options.clone().with_page(1).with_per_page(per_page))
}

// ---------------------------------------------------------------------------
// Dictionary infos
// ---------------------------------------------------------------------------

fn page_and_size(options: &Options, limits: &LimitsConfig) -> (usize, usize) {
    (
        options.page.unwrap_or(limits.default_page) as usize,
        options.per_page.unwrap_or(limits.default_page_size) as usize,
    )
}

/// Whether a dictionary info query with `url_count` URLs can be answered
/// with an empty page without asking BioPortal.
pub fn dict_infos_past_end(url_count: usize, options: &Options, limits: &LimitsConfig) -> bool {
    let (page, size) = page_and_size(options, limits);
    url_count > 1 && page > 1 && url_count <= (page - 1).saturating_mul(size)
}

/// Client-side pagination of the concatenated dictionary infos.
pub fn paginate_dict_infos(infos: Vec<DictInfo>, options: &Options, limits: &LimitsConfig) -> Vec<DictInfo> {
    let (page, size) = page_and_size(options, limits);
    let start = page.saturating_sub(1).saturating_mul(size);
    infos.into_iter().skip(start).take(size).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
