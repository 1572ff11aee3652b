//! Client-side bigram full-text search over a single static index file.
//!
//! The index lives behind something that can serve byte ranges (an HTTP
//! server that honours `Range:`, a local file, a buffer). The engine pulls the
//! header and the small sections once, then answers every query with a few
//! targeted range reads. No server-side query processing is involved.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌───────────────┐
//! │  transport   │────▶│   loader    │────▶│ LoadedIndex   │
//! │ (RangeSource)│     │ (single-    │     │ (dictionary,  │
//! │              │     │  flight)    │     │  doc metadata)│
//! └──────────────┘     └─────────────┘     └───────────────┘
//!        │                                        │
//!        ▼                                        ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                        search                            │
//! │  tokenize → fetch_postings → intersect → score_and_rank  │
//! │                                   → ResultStream         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Overview
//!
//! | Module      | Purpose                                              |
//! |-------------|------------------------------------------------------|
//! | `binary`    | Index file format: header, dictionary, records       |
//! | `codec`     | Gzip decoding of compressed sections                 |
//! | `transport` | `RangeSource` trait and HTTP/file/memory sources     |
//! | `loader`    | Header + section loading, single-flight memoization  |
//! | `tokenizer` | Query → index keys                                   |
//! | `search`    | Posting fetch, intersection, scoring, materializing  |
//! | `engine`    | `IndexEngine` facade                                 |
//! | `render`    | Placeholders and highlight deep links                |
//!
//! # Usage
//!
//! ```ignore
//! use rangeseek::{HttpSource, HttpConfig, IndexEngine, SearchOutcome};
//! use tokio_util::sync::CancellationToken;
//!
//! let source = HttpSource::new("https://example.com/search.idx", &HttpConfig::default())?;
//! let engine = IndexEngine::new(source);
//!
//! if let SearchOutcome::Hits(mut hits) = engine.search("全文検索", CancellationToken::new()).await? {
//!     while let Some(record) = hits.next().await {
//!         let record = record?;
//!         println!("{:.3} {} {}", record.score, record.title, record.url);
//!     }
//! }
//! ```

pub mod binary;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod render;
pub mod search;
pub mod testing;
pub mod tokenizer;
pub mod transport;

pub use config::{CliConfig, Decompression, EngineConfig, HttpConfig};
pub use engine::{IndexEngine, IndexStats};
pub use error::{Error, Result};
pub use loader::{IndexLoader, LoadedIndex, SectionEncoding};
pub use search::{EmptyReason, RankedDoc, ResultRecord, ResultStream, SearchOutcome};
pub use tokenizer::tokenize;
pub use transport::{ByteRange, FileSource, MemorySource, RangeSource};

#[cfg(feature = "http")]
pub use transport::HttpSource;

// Callers need the token type to drive `IndexEngine::search`
pub use tokio_util::sync::CancellationToken;
