// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Document metadata table.
//!
//! ```text
//! total_docs: u32
//! total_docs × 26-byte record:
//!   doc_id:      u32   (informational, addressing uses the record index)
//!   url_off:     u32   url_len:   u16
//!   title_off:   u32   title_len: u16
//!   desc_off:    u32   desc_len:  u16
//!   norm:        f32   (L2 norm of the tf·idf vector, 0 = degenerate)
//! ```
//!
//! Offsets point into the document-data section. The three strings of one
//! document are usually adjacent, so a single range covering all of them is
//! one request instead of three.

use super::reader::BeReader;
use crate::error::{Error, Result};
use crate::transport::ByteRange;

/// Size of one metadata record in bytes
pub const DOC_META_RECORD_SIZE: usize = 26;

/// Size of the count prefix
const COUNT_SIZE: usize = 4;

/// A length-prefixed string in the document-data section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub offset: u32,
    pub len: u16,
}

impl Span {
    pub fn new(offset: u32, len: u16) -> Self {
        Self { offset, len }
    }

    #[inline]
    pub fn end(&self) -> u64 {
        u64::from(self.offset) + u64::from(self.len)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Decoded metadata record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocMeta {
    pub doc_id: u32,
    pub url: Span,
    pub title: Span,
    pub description: Span,
    pub norm: f32,
}

impl DocMeta {
    /// Degenerate documents have no usable term vector.
    pub fn is_degenerate(&self) -> bool {
        self.norm == 0.0
    }

    fn non_empty_spans(&self) -> impl Iterator<Item = Span> {
        [self.url, self.title, self.description]
            .into_iter()
            .filter(|s| !s.is_empty())
    }

    /// Smallest document-data range (absolute) covering all three strings.
    /// `None` when every string is empty.
    pub fn covering_range(&self, doc_data_base: u64) -> Option<ByteRange> {
        let start = self.non_empty_spans().map(|s| u64::from(s.offset)).min()?;
        let end = self.non_empty_spans().map(|s| s.end()).max()?;
        Some(ByteRange::new(doc_data_base + start, doc_data_base + end))
    }

    /// Write a record (test fixture writer).
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.doc_id.to_be_bytes());
        for span in [self.url, self.title, self.description] {
            buf.extend_from_slice(&span.offset.to_be_bytes());
            buf.extend_from_slice(&span.len.to_be_bytes());
        }
        buf.extend_from_slice(&self.norm.to_be_bytes());
    }
}

/// The loaded doc-metadata section.
#[derive(Debug, Clone, Default)]
pub struct DocumentTable {
    bytes: Vec<u8>,
    total_docs: u32,
}

impl DocumentTable {
    /// Take ownership of a decompressed doc-metadata section.
    pub fn parse(bytes: Vec<u8>) -> Result<Self> {
        let total_docs = BeReader::new(&bytes).u32_at(0)?;
        let needed = COUNT_SIZE as u64 + u64::from(total_docs) * DOC_META_RECORD_SIZE as u64;
        if (bytes.len() as u64) < needed {
            return Err(Error::format(format!(
                "Doc metadata holds {} bytes, {} documents need {}",
                bytes.len(),
                total_docs,
                needed
            )));
        }
        Ok(Self { bytes, total_docs })
    }

    /// Build a table from records (tests, benches).
    pub fn from_records(records: &[DocMeta]) -> Self {
        let mut bytes = Vec::with_capacity(COUNT_SIZE + records.len() * DOC_META_RECORD_SIZE);
        bytes.extend_from_slice(&(records.len() as u32).to_be_bytes());
        for record in records {
            record.encode(&mut bytes);
        }
        Self {
            bytes,
            total_docs: records.len() as u32,
        }
    }

    #[inline]
    pub fn total_docs(&self) -> u32 {
        self.total_docs
    }

    /// Record for `doc_id`, located at `4 + doc_id * 26`.
    pub fn get(&self, doc_id: u32) -> Result<DocMeta> {
        if doc_id >= self.total_docs {
            return Err(Error::format(format!(
                "Doc id {} out of range ({} documents)",
                doc_id, self.total_docs
            )));
        }
        let base = COUNT_SIZE + doc_id as usize * DOC_META_RECORD_SIZE;
        let r = BeReader::new(&self.bytes);
        Ok(DocMeta {
            doc_id: r.u32_at(base)?,
            url: Span::new(r.u32_at(base + 4)?, r.u16_at(base + 8)?),
            title: Span::new(r.u32_at(base + 10)?, r.u16_at(base + 14)?),
            description: Span::new(r.u32_at(base + 16)?, r.u16_at(base + 20)?),
            norm: r.f32_at(base + 22)?,
        })
    }

    /// Stored norm, or `None` for an unknown doc_id.
    pub fn norm(&self, doc_id: u32) -> Option<f32> {
        self.get(doc_id).ok().map(|m| m.norm)
    }
}
