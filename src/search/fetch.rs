// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Posting list retrieval: one range request per query key, all in flight at
//! once.
//!
//! Every request is awaited, whatever happens to its siblings. A key that
//! isn't in the dictionary lands in `missing`; a key whose fetch or decode
//! failed lands in `failed`. The caller can tell "no such term" from "network
//! broken" by looking at which list is non-empty.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::binary::{decode_postings, PostingEntry, PostingList};
use crate::error::Result;
use crate::loader::LoadedIndex;
use crate::transport::{ByteRange, RangeSource};

/// Outcome of fetching the posting lists for a set of keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingFetch {
    /// Lists that resolved, in query-key order
    pub lists: Vec<PostingList>,
    /// Keys with no dictionary entry
    pub missing: Vec<String>,
    /// Keys whose fetch or decode failed
    pub failed: Vec<String>,
}

impl PostingFetch {
    /// Every key resolved to a list.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.failed.is_empty()
    }
}

/// Resolve `keys` against the dictionary and fetch their posting lists.
pub async fn fetch_postings(
    source: &dyn RangeSource,
    index: &LoadedIndex,
    keys: &[String],
) -> PostingFetch {
    let mut fetch = PostingFetch::default();
    let mut pending: Vec<(&String, ByteRange)> = Vec::with_capacity(keys.len());

    for key in keys {
        let Some(i) = index.dictionary.find_key(key) else {
            fetch.missing.push(key.clone());
            continue;
        };
        match index.posting_range(i) {
            Ok(range) => pending.push((key, range)),
            Err(e) => {
                warn!(key = %key, error = %e, "posting list range invalid");
                fetch.failed.push(key.clone());
            }
        }
    }

    debug!(
        resolved = pending.len(),
        missing = fetch.missing.len(),
        "fetching posting lists"
    );

    let results = join_all(
        pending
            .iter()
            .map(|&(key, range)| async move { (key, fetch_one(source, range).await) }),
    )
    .await;

    for (key, result) in results {
        match result {
            Ok(entries) => fetch.lists.push(PostingList::new(key.as_str(), entries)),
            Err(e) => {
                warn!(key = %key, error = %e, "posting list fetch failed");
                fetch.failed.push(key.clone());
            }
        }
    }

    fetch
}

async fn fetch_one(source: &dyn RangeSource, range: ByteRange) -> Result<Vec<PostingEntry>> {
    let bytes = source.fetch(range).await?;
    decode_postings(&bytes)
}
