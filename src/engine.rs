// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The engine facade: one instance per index file.
//!
//! Engines are independent. Two engines over the same source load it twice;
//! clones of the `Arc` around one engine share its loaded state.

use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::loader::{IndexLoader, LoadedIndex};
use crate::search::{run_search, SearchOutcome};
use crate::transport::RangeSource;

/// Summary of a loaded index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub source: String,
    pub total_docs: u32,
    pub keys: usize,
    /// `"gzip"` or `"raw"`: which section copy was loaded
    pub encoding: &'static str,
    pub postings_base: u64,
    pub doc_data_base: u64,
    pub section_offsets: [u32; 6],
}

/// Client-side query engine over a range-addressable index.
pub struct IndexEngine {
    loader: IndexLoader,
}

impl IndexEngine {
    /// Engine with the default configuration.
    pub fn new(source: impl RangeSource + 'static) -> Self {
        Self::with_config(Arc::new(source), EngineConfig::default())
    }

    pub fn with_config(source: Arc<dyn RangeSource>, config: EngineConfig) -> Self {
        Self {
            loader: IndexLoader::new(source, config),
        }
    }

    /// Load the index. Idempotent; concurrent calls share one load.
    ///
    /// After a failure the engine stays unloaded and the next call retries.
    pub async fn load(&self) -> Result<()> {
        self.loader.load().await.map(|_| ())
    }

    pub fn is_ready(&self) -> bool {
        self.loader.is_ready()
    }

    /// The loaded index, if any.
    pub fn index(&self) -> Option<Arc<LoadedIndex>> {
        self.loader.get()
    }

    pub fn stats(&self) -> Option<IndexStats> {
        let index = self.loader.get()?;
        Some(IndexStats {
            source: self.loader.source().describe(),
            total_docs: index.total_docs(),
            keys: index.dictionary.len(),
            encoding: index.encoding.name(),
            postings_base: index.postings_base(),
            doc_data_base: index.doc_data_base(),
            section_offsets: index.header.offsets,
        })
    }

    /// Search, loading the index first if needed.
    ///
    /// A load failure is returned as-is. Hits are materialized lazily through
    /// the returned stream, which observes `cancel` on every fetch.
    pub async fn search(&self, query: &str, cancel: CancellationToken) -> Result<SearchOutcome> {
        let index = self.loader.load().await?;
        run_search(self.loader.source().clone(), index, query, cancel).await
    }
}

impl std::fmt::Debug for IndexEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexEngine")
            .field("source", &self.loader.source().describe())
            .field("ready", &self.is_ready())
            .finish()
    }
}
