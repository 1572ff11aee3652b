// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! K-way sorted merge over posting lists (AND semantics).
//!
//! One cursor per list. While every cursor is in range, look at the doc_ids
//! under them: if they agree, that document contains every key; otherwise
//! move the cursors sitting on the smallest doc_id. The first list to run out
//! ends the merge, since nothing after it can match all keys.
//!
//! O(sum of list lengths). Lists must be strictly ascending by doc_id;
//! `decode_postings` rejects any that aren't.

use crate::binary::PostingList;

/// A document containing every query key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocMatch {
    pub doc_id: u32,
    /// One term frequency per input list, in list order
    pub term_frequencies: Vec<u32>,
}

/// Documents present in all `lists`, ascending by doc_id.
///
/// No lists, or any empty list, means no matches.
pub fn intersect(lists: &[PostingList]) -> Vec<DocMatch> {
    if lists.is_empty() || lists.iter().any(PostingList::is_empty) {
        return Vec::new();
    }

    let mut cursors = vec![0usize; lists.len()];
    let mut matches = Vec::new();

    while cursors
        .iter()
        .zip(lists)
        .all(|(&c, list)| c < list.entries.len())
    {
        let head = |i: usize| lists[i].entries[cursors[i]].doc_id;

        let mut min = head(0);
        let mut max = min;
        for i in 1..lists.len() {
            let doc_id = head(i);
            min = min.min(doc_id);
            max = max.max(doc_id);
        }

        if min == max {
            matches.push(DocMatch {
                doc_id: min,
                term_frequencies: (0..lists.len())
                    .map(|i| lists[i].entries[cursors[i]].term_frequency)
                    .collect(),
            });
            for c in cursors.iter_mut() {
                *c += 1;
            }
        } else {
            for i in 0..lists.len() {
                if lists[i].entries[cursors[i]].doc_id == min {
                    cursors[i] += 1;
                }
            }
        }
    }

    matches
}
