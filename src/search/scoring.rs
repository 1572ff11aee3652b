// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! TF-IDF cosine scoring and ranking.
//!
//! The score is a cosine similarity between the query vector and the document
//! vector, with one twist: the two sides are normalized differently.
//!
//! - Document vectors were normalized at build time. Their full L2 norm
//!   (over every key in the document, not just the query keys) is stored in
//!   the metadata record, so we never need the rest of the vector.
//! - The query vector is built here from idf weights alone. Keys are
//!   deduplicated, so every query weight is `1 · idf`.
//!
//! ```text
//! idf(k)  = ln(N / df(k))
//! score   = Σ tf(k, d) · idf(k)  /  (‖d‖ · sqrt(Σ idf(k)²))
//! ```
//!
//! Documents with a stored norm of zero are skipped; dividing by it would
//! rank garbage first.

use serde::Serialize;
use tracing::debug;

use super::intersect::DocMatch;
use crate::binary::{DocumentTable, PostingList};

/// A scored document, before its text is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedDoc {
    pub doc_id: u32,
    pub score: f64,
}

/// Inverse document frequency: `ln(total_docs / df)`.
#[inline]
pub fn idf(total_docs: u32, document_frequency: usize) -> f64 {
    (f64::from(total_docs) / document_frequency as f64).ln()
}

/// Score every match and sort by descending score.
///
/// `matches[i].term_frequencies` must line up with `lists`. Ties keep the
/// order of `matches`.
pub fn score_and_rank(
    matches: &[DocMatch],
    lists: &[PostingList],
    documents: &DocumentTable,
) -> Vec<RankedDoc> {
    let total_docs = documents.total_docs();
    let idfs: Vec<f64> = lists
        .iter()
        .map(|list| idf(total_docs, list.document_frequency()))
        .collect();
    let query_norm = idfs.iter().map(|w| w * w).sum::<f64>().sqrt();

    let mut ranked = Vec::with_capacity(matches.len());
    for m in matches {
        let Some(norm) = documents.norm(m.doc_id) else {
            debug!(doc_id = m.doc_id, "posting references unknown document");
            continue;
        };
        if norm == 0.0 {
            continue;
        }

        let dot: f64 = m
            .term_frequencies
            .iter()
            .zip(&idfs)
            .map(|(&tf, &w)| f64::from(tf) * w)
            .sum();

        // Every key in every document: all idf weights are zero
        let score = if query_norm > 0.0 {
            dot / (f64::from(norm) * query_norm)
        } else {
            0.0
        };

        ranked.push(RankedDoc {
            doc_id: m.doc_id,
            score,
        });
    }

    rank(&mut ranked);
    ranked
}

/// Descending by score. Stable, so equal scores keep their input order.
pub fn rank(results: &mut [RankedDoc]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}
