//! K-way merge against a set-intersection oracle.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use rangeseek::binary::{PostingEntry, PostingList};
use rangeseek::search::intersect;

/// A posting list over doc_ids below 64, sorted and unique.
fn posting_list_strategy() -> impl Strategy<Value = PostingList> {
    prop::collection::btree_map(0u32..64, 1u32..20, 0..24).prop_map(|docs: BTreeMap<u32, u32>| {
        PostingList::new(
            "k",
            docs.into_iter()
                .map(|(doc_id, tf)| PostingEntry::new(doc_id, tf))
                .collect(),
        )
    })
}

fn oracle(lists: &[PostingList]) -> Vec<(u32, Vec<u32>)> {
    if lists.is_empty() {
        return Vec::new();
    }
    let mut common: BTreeSet<u32> = lists[0].entries.iter().map(|e| e.doc_id).collect();
    for list in &lists[1..] {
        let ids: BTreeSet<u32> = list.entries.iter().map(|e| e.doc_id).collect();
        common = common.intersection(&ids).copied().collect();
    }
    common
        .into_iter()
        .map(|doc_id| {
            let tfs = lists
                .iter()
                .map(|list| {
                    list.entries
                        .iter()
                        .find(|e| e.doc_id == doc_id)
                        .map(|e| e.term_frequency)
                        .unwrap_or_default()
                })
                .collect();
            (doc_id, tfs)
        })
        .collect()
}

proptest! {
    /// Every returned doc is in every list, with that list's frequency, and
    /// nothing common is left out.
    #[test]
    fn prop_intersect_matches_oracle(
        lists in prop::collection::vec(posting_list_strategy(), 0..5)
    ) {
        let actual: Vec<(u32, Vec<u32>)> = intersect(&lists)
            .into_iter()
            .map(|m| (m.doc_id, m.term_frequencies))
            .collect();
        prop_assert_eq!(actual, oracle(&lists));
    }

    /// Order of the input lists doesn't change which documents match.
    #[test]
    fn prop_intersect_order_independent(
        lists in prop::collection::vec(posting_list_strategy(), 1..5)
    ) {
        let mut reversed = lists.clone();
        reversed.reverse();
        let forward: Vec<u32> = intersect(&lists).iter().map(|m| m.doc_id).collect();
        let backward: Vec<u32> = intersect(&reversed).iter().map(|m| m.doc_id).collect();
        prop_assert_eq!(forward, backward);
    }
}
