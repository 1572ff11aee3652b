// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query pipeline.
//!
//! ```text
//!  query ──▶ tokenize ──▶ fetch_postings ──▶ intersect ──▶ score_and_rank ──▶ ResultStream
//!            (keys)       (parallel, one      (AND merge)   (tf-idf cosine)    (one fetch per
//!                          range per key)                                        document)
//! ```
//!
//! Everything before the stream is eager: a search either returns an empty
//! outcome with a reason, or a stream whose ranking is already final. Only
//! the document text is fetched lazily, so a caller that stops reading pays
//! for nothing it didn't show.

pub mod fetch;
pub mod intersect;
pub mod materialize;
pub mod scoring;

pub use fetch::{fetch_postings, PostingFetch};
pub use intersect::{intersect, DocMatch};
pub use materialize::{materialize_one, ResultRecord, ResultStream};
pub use scoring::{idf, rank, score_and_rank, RankedDoc};

use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Error, Result};
use crate::loader::LoadedIndex;
use crate::tokenizer::tokenize;
use crate::transport::RangeSource;

/// Why a search produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// The query contained no usable tokens
    NoKeys,
    /// At least one key couldn't be resolved, so no document can hold them all
    Unresolved {
        missing: Vec<String>,
        failed: Vec<String>,
    },
    /// Every key resolved, but no document holds all of them
    NoCommonDocuments,
    /// Every common document had a zero norm
    AllDegenerate,
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::NoKeys => write!(f, "query has no searchable terms"),
            EmptyReason::Unresolved { missing, failed } if failed.is_empty() => {
                write!(f, "no index entry for {}", missing.join(", "))
            }
            EmptyReason::Unresolved { missing, failed } => write!(
                f,
                "{} key(s) missing, {} key(s) failed to load",
                missing.len(),
                failed.len()
            ),
            EmptyReason::NoCommonDocuments => write!(f, "no document contains every term"),
            EmptyReason::AllDegenerate => write!(f, "no scorable document contains every term"),
        }
    }
}

/// Result of a search.
pub enum SearchOutcome {
    Empty(EmptyReason),
    Hits(ResultStream),
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, SearchOutcome::Empty(_))
    }

    pub fn into_hits(self) -> Option<ResultStream> {
        match self {
            SearchOutcome::Hits(stream) => Some(stream),
            SearchOutcome::Empty(_) => None,
        }
    }
}

impl fmt::Debug for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Empty(reason) => f.debug_tuple("Empty").field(reason).finish(),
            SearchOutcome::Hits(stream) => f
                .debug_struct("Hits")
                .field("hit_count", &stream.hit_count())
                .finish(),
        }
    }
}

/// Run a query against a loaded index.
///
/// Returns `Err(Cancelled)` if the token fires before ranking is done.
pub async fn run_search(
    source: Arc<dyn RangeSource>,
    index: Arc<LoadedIndex>,
    query: &str,
    cancel: CancellationToken,
) -> Result<SearchOutcome> {
    let keys = tokenize(query);
    if keys.is_empty() {
        return Ok(SearchOutcome::Empty(EmptyReason::NoKeys));
    }
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let fetched = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(Error::Cancelled),
        fetched = fetch_postings(source.as_ref(), &index, &keys) => fetched,
    };

    if !fetched.is_complete() {
        debug!(
            missing = ?fetched.missing,
            failed = ?fetched.failed,
            "query has unresolved keys"
        );
        return Ok(SearchOutcome::Empty(EmptyReason::Unresolved {
            missing: fetched.missing,
            failed: fetched.failed,
        }));
    }

    let matches = intersect(&fetched.lists);
    if matches.is_empty() {
        return Ok(SearchOutcome::Empty(EmptyReason::NoCommonDocuments));
    }

    let ranked = score_and_rank(&matches, &fetched.lists, &index.documents);
    if ranked.is_empty() {
        return Ok(SearchOutcome::Empty(EmptyReason::AllDegenerate));
    }

    debug!(
        keys = keys.len(),
        matches = matches.len(),
        ranked = ranked.len(),
        "query ranked"
    );

    Ok(SearchOutcome::Hits(ResultStream::new(
        source, index, keys, ranked, cancel,
    )))
}
