// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index loading with single-flight de-duplication.
//!
//! Loading is three round trips at most: the header, then the dictionary and
//! doc-metadata sections in parallel. Posting lists and document data are
//! never loaded up front; search fetches them per query.
//!
//! # Single flight
//!
//! The first `load()` becomes the leader and does the I/O. Anyone calling
//! `load()` while it runs registers a waiter and receives the leader's
//! outcome, success or failure. Nobody fetches twice.
//!
//! ```text
//! Idle ──load()──▶ Loading(waiters) ──ok──▶ Ready(index)
//!   ▲                    │
//!   └──────err / leader dropped──┘
//! ```
//!
//! A failed load returns to `Idle`, so the next call retries from scratch.
//! If the leader's future is dropped mid-load, waiters see `LoadAbandoned`.

mod sections;

pub use sections::{
    select_section_source, GzipSections, LogicalSection, RawSections, SectionEncoding,
    SectionSource,
};

use std::mem;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::binary::{Dictionary, DocumentTable, IndexHeader};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::transport::{ByteRange, RangeSource};

// ============================================================================
// LOADED INDEX
// ============================================================================

/// Everything a search needs that isn't fetched per query.
#[derive(Debug)]
pub struct LoadedIndex {
    pub header: IndexHeader,
    pub dictionary: Dictionary,
    pub documents: DocumentTable,
    pub encoding: SectionEncoding,
}

impl LoadedIndex {
    #[inline]
    pub fn total_docs(&self) -> u32 {
        self.documents.total_docs()
    }

    /// Absolute start of the posting-lists section.
    #[inline]
    pub fn postings_base(&self) -> u64 {
        self.header.postings_base()
    }

    /// Absolute start of the document-data section.
    #[inline]
    pub fn doc_data_base(&self) -> u64 {
        self.header.doc_data_base()
    }

    /// Byte range of the posting list for dictionary index `index`.
    ///
    /// The last list stops at the document-data section.
    pub fn posting_range(&self, index: usize) -> Result<ByteRange> {
        let postings_end = Some(self.doc_data_base()).filter(|&end| end > self.postings_base());
        self.dictionary
            .posting_range(index, self.postings_base(), postings_end)
    }
}

/// Fetch and parse header, dictionary, and doc metadata.
pub async fn load_index(source: &dyn RangeSource, config: &EngineConfig) -> Result<LoadedIndex> {
    debug!(source = %source.describe(), "fetching index header");
    let header_bytes = source.fetch(IndexHeader::range()).await?;
    let header = IndexHeader::parse(&header_bytes)?;

    let sections = select_section_source(config.decompression, &header)?;
    info!(
        source = %source.describe(),
        encoding = sections.encoding().name(),
        "loading index sections"
    );

    let (dict_bytes, meta_bytes) = futures::try_join!(
        sections.fetch_section(source, &header, LogicalSection::Dictionary),
        sections.fetch_section(source, &header, LogicalSection::DocMeta),
    )?;

    let dictionary = Dictionary::parse(&dict_bytes)?;
    let documents = DocumentTable::parse(meta_bytes)?;

    info!(
        keys = dictionary.len(),
        documents = documents.total_docs(),
        "index loaded"
    );

    Ok(LoadedIndex {
        header,
        dictionary,
        documents,
        encoding: sections.encoding(),
    })
}

// ============================================================================
// SINGLE-FLIGHT LOADER
// ============================================================================

type Waiter = oneshot::Sender<Result<Arc<LoadedIndex>>>;

enum LoadState {
    Idle,
    Loading(Vec<Waiter>),
    Ready(Arc<LoadedIndex>),
}

/// Loads an index at most once at a time and memoizes success.
pub struct IndexLoader {
    source: Arc<dyn RangeSource>,
    config: EngineConfig,
    state: Mutex<LoadState>,
}

impl IndexLoader {
    pub fn new(source: Arc<dyn RangeSource>, config: EngineConfig) -> Self {
        Self {
            source,
            config,
            state: Mutex::new(LoadState::Idle),
        }
    }

    pub fn source(&self) -> &Arc<dyn RangeSource> {
        &self.source
    }

    /// The loaded index, if a load has completed.
    pub fn get(&self) -> Option<Arc<LoadedIndex>> {
        match &*self.state.lock() {
            LoadState::Ready(index) => Some(index.clone()),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(&*self.state.lock(), LoadState::Ready(_))
    }

    /// Load the index, or join the load already in flight.
    pub async fn load(&self) -> Result<Arc<LoadedIndex>> {
        let waiter = {
            let mut state = self.state.lock();
            let waiter = match &mut *state {
                LoadState::Ready(index) => return Ok(index.clone()),
                LoadState::Loading(waiters) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Some(rx)
                }
                LoadState::Idle => None,
            };
            if waiter.is_none() {
                *state = LoadState::Loading(Vec::new());
            }
            waiter
        };
        // State lock released here

        if let Some(rx) = waiter {
            debug!("joining in-flight index load");
            return rx.await.unwrap_or(Err(Error::LoadAbandoned));
        }

        let leader = Leader {
            state: &self.state,
            finished: false,
        };
        let result = load_index(self.source.as_ref(), &self.config)
            .await
            .map(Arc::new);
        if let Err(e) = &result {
            warn!(source = %self.source.describe(), error = %e, "index load failed");
        }
        leader.finish(&result);
        result
    }
}

/// Publishes the leader's outcome. Dropped without `finish` (the load future
/// was cancelled), it resets to `Idle` and drops the waiters' senders.
struct Leader<'a> {
    state: &'a Mutex<LoadState>,
    finished: bool,
}

impl Leader<'_> {
    fn finish(mut self, result: &Result<Arc<LoadedIndex>>) {
        let next = match result {
            Ok(index) => LoadState::Ready(index.clone()),
            Err(_) => LoadState::Idle,
        };
        let previous = mem::replace(&mut *self.state.lock(), next);
        self.finished = true;

        if let LoadState::Loading(waiters) = previous {
            for waiter in waiters {
                // A waiter that gave up has dropped its receiver; nothing to do
                let _ = waiter.send(result.clone());
            }
        }
    }
}

impl Drop for Leader<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut state = self.state.lock();
        if matches!(&*state, LoadState::Loading(_)) {
            *state = LoadState::Idle;
        }
    }
}
