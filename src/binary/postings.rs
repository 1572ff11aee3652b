// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Posting list decoding.
//!
//! A posting list is a run of fixed 8-byte records, `(doc_id: u32,
//! term_frequency: u32)`, sorted by doc_id. No delta coding, no varints: the
//! lists are fetched by byte range, so record boundaries have to be
//! computable from offsets alone.

use super::reader::BeReader;
use crate::error::{Error, Result};

/// Size of one posting record in bytes
pub const POSTING_RECORD_SIZE: usize = 8;

/// One (document, term frequency) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostingEntry {
    pub doc_id: u32,
    pub term_frequency: u32,
}

impl PostingEntry {
    pub fn new(doc_id: u32, term_frequency: u32) -> Self {
        Self {
            doc_id,
            term_frequency,
        }
    }
}

/// Posting list for one dictionary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingList {
    pub key: String,
    pub entries: Vec<PostingEntry>,
}

impl PostingList {
    pub fn new(key: impl Into<String>, entries: Vec<PostingEntry>) -> Self {
        Self {
            key: key.into(),
            entries,
        }
    }

    /// Number of documents containing the key.
    #[inline]
    pub fn document_frequency(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decode a fetched posting-list span.
///
/// Doc_ids must be strictly ascending; a repeat or a step back is a
/// `Format` error.
pub fn decode_postings(bytes: &[u8]) -> Result<Vec<PostingEntry>> {
    if bytes.len() % POSTING_RECORD_SIZE != 0 {
        return Err(Error::format(format!(
            "Posting list length {} is not a multiple of {}",
            bytes.len(),
            POSTING_RECORD_SIZE
        )));
    }

    let r = BeReader::new(bytes);
    let mut entries = Vec::with_capacity(bytes.len() / POSTING_RECORD_SIZE);
    for pos in (0..bytes.len()).step_by(POSTING_RECORD_SIZE) {
        let entry = PostingEntry::new(r.u32_at(pos)?, r.u32_at(pos + 4)?);
        if let Some(prev) = entries.last().map(|e: &PostingEntry| e.doc_id) {
            if entry.doc_id <= prev {
                return Err(Error::format(format!(
                    "Posting record {} has doc_id {} after {}",
                    pos / POSTING_RECORD_SIZE,
                    entry.doc_id,
                    prev
                )));
            }
        }
        entries.push(entry);
    }
    Ok(entries)
}

/// Encode entries (test fixture writer).
pub fn encode_postings(entries: &[PostingEntry], buf: &mut Vec<u8>) {
    for entry in entries {
        buf.extend_from_slice(&entry.doc_id.to_be_bytes());
        buf.extend_from_slice(&entry.term_frequency.to_be_bytes());
    }
}
