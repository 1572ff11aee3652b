// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning ranked doc_ids into displayable records.
//!
//! One range request per document, covering its URL, title, and description
//! together. Documents are fetched strictly one after another so that a
//! cancellation stops the work after the current request instead of
//! discarding a batch of parallel ones.
//!
//! The cancellation token is checked before every fetch and raced against the
//! fetch itself. Losing the race drops the fetch future, which aborts the
//! request.

use std::sync::Arc;

use futures::stream::{self, Stream};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::scoring::RankedDoc;
use crate::binary::Span;
use crate::error::{Error, Result};
use crate::loader::LoadedIndex;
use crate::transport::RangeSource;

/// A search hit, ready for a renderer.
///
/// Empty `title` / `description` mean the document had none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub doc_id: u32,
    pub url: String,
    pub title: String,
    pub description: String,
    pub score: f64,
}

/// Lazily materialized results, in rank order.
///
/// After an error or a cancellation the stream is finished: `next()` yields
/// that one `Err` and then `None`.
pub struct ResultStream {
    source: Arc<dyn RangeSource>,
    index: Arc<LoadedIndex>,
    keys: Vec<String>,
    ranked: Vec<RankedDoc>,
    position: usize,
    cancel: CancellationToken,
    finished: bool,
}

impl ResultStream {
    pub fn new(
        source: Arc<dyn RangeSource>,
        index: Arc<LoadedIndex>,
        keys: Vec<String>,
        ranked: Vec<RankedDoc>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            index,
            keys,
            ranked,
            position: 0,
            cancel,
            finished: false,
        }
    }

    /// Total number of ranked hits.
    pub fn hit_count(&self) -> usize {
        self.ranked.len()
    }

    /// Ranked hits not yet materialized.
    pub fn remaining(&self) -> usize {
        if self.finished {
            0
        } else {
            self.ranked.len() - self.position
        }
    }

    /// Scores in rank order, without fetching anything.
    pub fn ranked(&self) -> &[RankedDoc] {
        &self.ranked
    }

    /// Index keys the query was tokenized into.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Fetch the next record.
    pub async fn next(&mut self) -> Option<Result<ResultRecord>> {
        if self.finished {
            return None;
        }
        let Some(&ranked) = self.ranked.get(self.position) else {
            self.finished = true;
            return None;
        };

        if self.cancel.is_cancelled() {
            info!(
                delivered = self.position,
                remaining = self.ranked.len() - self.position,
                "result materialization cancelled"
            );
            self.finished = true;
            return Some(Err(Error::Cancelled));
        }
        self.position += 1;

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                info!(doc_id = ranked.doc_id, "in-flight document fetch aborted");
                Err(Error::Cancelled)
            }
            record = materialize_one(self.source.as_ref(), &self.index, ranked) => record,
        };

        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }

    /// Drain up to `limit` records.
    ///
    /// Cancellation ends the collection early without an error; any other
    /// failure is returned.
    pub async fn collect_records(mut self, limit: Option<usize>) -> Result<Vec<ResultRecord>> {
        let limit = limit.unwrap_or(usize::MAX);
        let mut records = Vec::with_capacity(self.ranked.len().min(limit));
        while records.len() < limit {
            match self.next().await {
                Some(Ok(record)) => records.push(record),
                Some(Err(Error::Cancelled)) | None => break,
                Some(Err(e)) => return Err(e),
            }
        }
        Ok(records)
    }

    /// Adapt into a `futures::Stream`.
    pub fn into_stream(self) -> impl Stream<Item = Result<ResultRecord>> {
        stream::unfold(self, |mut results| async move {
            let item = results.next().await?;
            Some((item, results))
        })
    }
}

/// Fetch the text of one ranked document.
pub async fn materialize_one(
    source: &dyn RangeSource,
    index: &LoadedIndex,
    ranked: RankedDoc,
) -> Result<ResultRecord> {
    let meta = index.documents.get(ranked.doc_id)?;
    let base = index.doc_data_base();

    let (url, title, description) = match meta.covering_range(base) {
        Some(range) => {
            debug!(doc_id = ranked.doc_id, %range, "fetching document data");
            let bytes = source.fetch(range).await?;
            let window = range.start - base;
            (
                slice_text(&bytes, window, meta.url)?,
                slice_text(&bytes, window, meta.title)?,
                slice_text(&bytes, window, meta.description)?,
            )
        }
        None => (String::new(), String::new(), String::new()),
    };

    Ok(ResultRecord {
        doc_id: ranked.doc_id,
        url,
        title,
        description,
        score: ranked.score,
    })
}

/// Cut one string out of a fetched window that starts at `window_start`
/// (relative to the document-data section).
fn slice_text(bytes: &[u8], window_start: u64, span: Span) -> Result<String> {
    if span.is_empty() {
        return Ok(String::new());
    }
    let start = (u64::from(span.offset) - window_start) as usize;
    let end = start + usize::from(span.len);
    let slice = bytes.get(start..end).ok_or_else(|| {
        Error::format(format!(
            "Document data truncated: need bytes {}..{} of a {}-byte window",
            start,
            end,
            bytes.len()
        ))
    })?;
    Ok(String::from_utf8_lossy(slice).into_owned())
}
