// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Byte-range transport.
//!
//! The engine never sees a whole index file. Everything it reads comes
//! through `RangeSource::fetch`, one byte range at a time. HTTP is the
//! production source; local files and in-memory buffers exist for the CLI and
//! for tests.
//!
//! Cancellation is structural: dropping a `fetch` future aborts the request.
//! Sources don't take a token.

mod file;
#[cfg(feature = "http")]
mod http;
mod memory;

pub use file::FileSource;
#[cfg(feature = "http")]
pub use http::HttpSource;
pub use memory::MemorySource;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{Error, Result};

// ============================================================================
// BYTE RANGE
// ============================================================================

/// Half-open byte range `[start, end)`. `end == None` reads to end of file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    pub start: u64,
    pub end: Option<u64>,
}

impl ByteRange {
    /// Bounded range. `end` is exclusive.
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(end >= start, "range end {} before start {}", end, start);
        Self {
            start,
            end: Some(end.max(start)),
        }
    }

    /// Range from `start` to end of file.
    pub fn open(start: u64) -> Self {
        Self { start, end: None }
    }

    /// Length, if bounded.
    pub fn len(&self) -> Option<u64> {
        self.end.map(|end| end - self.start)
    }

    /// A bounded range with no bytes. HTTP can't express it, so sources
    /// answer it locally.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// `Range:` header value (`bytes=start-last` with an inclusive last byte).
    pub fn header_value(&self) -> String {
        match self.end {
            Some(end) if end > self.start => format!("bytes={}-{}", self.start, end - 1),
            _ => format!("bytes={}-", self.start),
        }
    }

    /// Cut this range out of a buffer holding the whole file.
    ///
    /// Follows HTTP semantics: a start past the end is unsatisfiable, an end
    /// past the end is clamped.
    pub fn slice_of(&self, whole: &Bytes) -> Result<Bytes> {
        let len = whole.len() as u64;
        if self.is_empty() {
            return Ok(Bytes::new());
        }
        if self.start >= len {
            return Err(Error::transport(format!(
                "Range {} not satisfiable for {}-byte resource",
                self, len
            )));
        }
        let end = self.end.map_or(len, |e| e.min(len));
        Ok(whole.slice(self.start as usize..end as usize))
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "[{}, {})", self.start, end),
            None => write!(f, "[{}, EOF)", self.start),
        }
    }
}

// ============================================================================
// SOURCE TRAIT
// ============================================================================

/// Something that can serve byte ranges of one fixed index file.
#[async_trait]
pub trait RangeSource: Send + Sync {
    /// Fetch the bytes of `range`. Fewer bytes than requested only when the
    /// range runs past end of file.
    async fn fetch(&self, range: ByteRange) -> Result<Bytes>;

    /// Human-readable location (URL or path) for logs.
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: RangeSource + ?Sized> RangeSource for Arc<T> {
    async fn fetch(&self, range: ByteRange) -> Result<Bytes> {
        (**self).fetch(range).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
