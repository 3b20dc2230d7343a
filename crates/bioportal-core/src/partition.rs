//! Dictionary Partitioner.
//!
//! Splits the dictionaries of a match search into a *preferred* group (asked
//! for via `sort.dictID`) and a *rest* group, which decides how many request
//! groups the URL Builder emits.
//!
//! ```text
//!   filter.dictID   sort.dictID          preferred               rest
//!   ─────────────   ──────────────────   ─────────────────────   ─────────────────
//!   ∅               ∅                    ∅                       ∅
//!   F               ∅                    ∅                       F
//!   ∅               S                    S                       ∅
//!   F               S, F ⊆ S             ∅                       F
//!   F               S, otherwise         S ∩ F  (S's order)      F \ S  (F's order)
//! ```

use crate::options::Options;

/// Result of [`split_dicts`]. The two lists never share an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split {
    pub preferred: Vec<String>,
    pub rest: Vec<String>,
}

pub fn split_dicts(options: &Options) -> Split {
    let filter = &options.filter_dict_id;
    let sort = &options.sort_dict_id;

    if sort.is_empty() {
        return Split { preferred: Vec::new(), rest: filter.clone() };
    }
    if filter.is_empty() {
        return Split { preferred: sort.clone(), rest: Vec::new() };
    }
    // Every requested dictionary is preferred: nothing would rank after them.
    if filter.iter().all(|id| sort.contains(id)) {
        return Split { preferred: Vec::new(), rest: filter.clone() };
    }

    Split {
        preferred: sort.iter().filter(|id| filter.contains(id)).cloned().collect(),
        rest: filter.iter().filter(|id| !sort.contains(id)).cloned().collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    fn split(preferred: &[&str], rest: &[&str]) -> Split {
        Split {
            preferred: preferred.iter().map(|s| s.to_string()).collect(),
            rest: rest.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[rstest]
    #[case::no_options(json!({ "page": 1 }), split(&[], &[]))]
    #[case::malformed(json!({ "filter": { "dictID": "any" }, "sort": { "dictID": 345 } }), split(&[], &[]))]
    #[case::empty_arrays(json!({ "filter": { "dictID": [] }, "sort": { "dictID": [] } }), split(&[], &[]))]
    #[case::filter_only(json!({ "filter": { "dictID": ["a", "b"] }, "page": 3 }), split(&[], &["a", "b"]))]
    #[case::filter_empty_sort(json!({ "filter": { "dictID": ["a", "b"] }, "sort": { "dictID": [] } }), split(&[], &["a", "b"]))]
    #[case::sort_only(json!({ "sort": { "dictID": ["d", "e"] }, "page": 3 }), split(&["d", "e"], &[]))]
    #[case::sort_empty_filter(json!({ "filter": { "dictID": [] }, "sort": { "dictID": ["d", "e"] } }), split(&["d", "e"], &[]))]
    #[case::partial_overlap(
        json!({ "filter": { "dictID": ["a", "b", "c", "d"] }, "sort": { "dictID": ["a", "c"] } }),
        split(&["a", "c"], &["b", "d"])
    )]
    #[case::sort_order_wins(
        json!({ "filter": { "dictID": ["a", "b", "c", "d"] }, "sort": { "dictID": ["e", "b"] } }),
        split(&["b"], &["a", "c", "d"])
    )]
    #[case::disjoint(
        json!({ "filter": { "dictID": ["a", "b", "c", "d"] }, "sort": { "dictID": ["e", "f"] } }),
        split(&[], &["a", "b", "c", "d"])
    )]
    #[case::filter_within_sort(
        json!({ "filter": { "dictID": ["a", "b"] }, "sort": { "dictID": ["c", "b", "a"] } }),
        split(&[], &["a", "b"])
    )]
    #[case::preferred_in_sort_order(
        json!({ "filter": { "dictID": ["a", "b", "c"] }, "sort": { "dictID": ["c", "a"] } }),
        split(&["c", "a"], &["b"])
    )]
    fn split_table(#[case] raw: serde_json::Value, #[case] expected: Split) {
        assert_eq!(split_dicts(&Options::from_json(&raw)), expected);
    }

    fn dict_list() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec("[a-f]", 0..6).prop_map(|mut v| {
            // Dictionary lists are sets in practice.
            let mut seen = Vec::new();
            v.retain(|s| {
                let fresh = !seen.contains(s);
                seen.push(s.clone());
                fresh
            });
            v
        })
    }

    proptest! {
        #[test]
        fn preferred_and_rest_partition_the_requested_dictionaries(
            filter in dict_list(),
            sort in dict_list(),
        ) {
            let opts = Options::new()
                .with_filter_dict_id(filter.clone())
                .with_sort_dict_id(sort.clone());
            let Split { preferred, rest } = split_dicts(&opts);

            prop_assert!(preferred.iter().all(|id| !rest.contains(id)));

            let mut union: Vec<String> = preferred.iter().chain(rest.iter()).cloned().collect();
            union.sort();
            let mut expected = if filter.is_empty() { sort.clone() } else { filter.clone() };
            expected.sort();
            prop_assert_eq!(union, expected);
        }
    }
}
