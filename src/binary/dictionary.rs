// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bigram dictionary: sorted keys and their posting-list offsets.
//!
//! Section layout:
//!
//! ```text
//! magic:  u32 = 0xDA7A
//! count:  u32
//! count × { key_len: u8, key: [u8; key_len] (UTF-8), offset: u32 }
//! ```
//!
//! Records arrive sorted by key bytes, which is also Rust's `str` ordering
//! (UTF-8 byte order equals code point order). We trust that ordering and
//! binary search it directly. Re-sorting would hide a broken index rather
//! than fix it.
//!
//! Keys and offsets live in two parallel vectors. A posting list is the span
//! between its offset and the next key's offset, so lookup needs the neighbor
//! anyway.

use super::reader::BeReader;
use crate::error::{Error, Result};
use crate::transport::ByteRange;

/// Dictionary section magic
pub const DICT_MAGIC: u32 = 0xDA7A;

/// One dictionary record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub key: String,
    /// Offset relative to the start of the posting-lists section
    pub offset: u32,
}

/// Sorted key/offset arrays.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    keys: Vec<String>,
    offsets: Vec<u32>,
}

impl Dictionary {
    /// Parse a decompressed dictionary section.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let r = BeReader::new(bytes);

        let magic = r.u32_at(0)?;
        if magic != DICT_MAGIC {
            return Err(Error::format(format!(
                "Invalid dictionary magic: expected {:#06X}, got {:#010X}",
                DICT_MAGIC, magic
            )));
        }

        let count = r.u32_at(4)? as usize;
        // Smallest record is 1 (len) + 0 (key) + 4 (offset) bytes
        let remaining = r.len().saturating_sub(8);
        if count > remaining / 5 {
            return Err(Error::format(format!(
                "Dictionary count {} exceeds available bytes {}",
                count, remaining
            )));
        }

        let mut keys = Vec::with_capacity(count);
        let mut offsets = Vec::with_capacity(count);
        let mut pos = 8;

        for i in 0..count {
            let key_len = r.u8_at(pos)? as usize;
            let key_bytes = r.bytes(pos + 1, key_len)?;
            let key = std::str::from_utf8(key_bytes)
                .map_err(|e| Error::format(format!("Dictionary key {} is not UTF-8: {}", i, e)))?;
            let offset = r.u32_at(pos + 1 + key_len)?;

            keys.push(key.to_owned());
            offsets.push(offset);
            pos += 1 + key_len + 4;
        }

        Ok(Self { keys, offsets })
    }

    /// Build from entries already in file order (test fixtures, tooling).
    pub fn from_entries(entries: impl IntoIterator<Item = DictionaryEntry>) -> Self {
        let (keys, offsets) = entries.into_iter().map(|e| (e.key, e.offset)).unzip();
        Self { keys, offsets }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key at a dictionary index.
    pub fn key(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(String::as_str)
    }

    /// Posting-list offset at a dictionary index.
    pub fn offset(&self, index: usize) -> Option<u32> {
        self.offsets.get(index).copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = DictionaryEntry> + '_ {
        self.keys
            .iter()
            .zip(&self.offsets)
            .map(|(key, &offset)| DictionaryEntry {
                key: key.clone(),
                offset,
            })
    }

    /// Binary search for an exact key. O(log n).
    pub fn find_key(&self, key: &str) -> Option<usize> {
        self.keys
            .binary_search_by(|candidate| candidate.as_str().cmp(key))
            .ok()
    }

    /// Absolute byte range of the posting list at `index`.
    ///
    /// The list runs to the next key's offset. The last list runs to the
    /// start of the document-data section when that's known, otherwise to
    /// end of file. Offsets that go backwards are a `Format` error.
    pub fn posting_range(
        &self,
        index: usize,
        postings_base: u64,
        postings_end: Option<u64>,
    ) -> Result<ByteRange> {
        let offset = self.offset(index).ok_or_else(|| {
            Error::format(format!(
                "Dictionary index {} out of range ({} keys)",
                index,
                self.len()
            ))
        })?;
        let start = postings_base + u64::from(offset);
        match self.offset(index + 1) {
            Some(next) if next < offset => Err(Error::format(format!(
                "Posting offset for {:?} ({}) precedes {:?} ({})",
                self.keys[index + 1],
                next,
                self.keys[index],
                offset
            ))),
            Some(next) => Ok(ByteRange::new(start, postings_base + u64::from(next))),
            None => Ok(match postings_end {
                Some(end) if end >= start => ByteRange::new(start, end),
                _ => ByteRange::open(start),
            }),
        }
    }

    /// Write the section (test fixture writer). Keys must fit a `u8` length.
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&DICT_MAGIC.to_be_bytes());
        buf.extend_from_slice(&(self.keys.len() as u32).to_be_bytes());
        for (key, offset) in self.keys.iter().zip(&self.offsets) {
            buf.push(key.len() as u8);
            buf.extend_from_slice(key.as_bytes());
            buf.extend_from_slice(&offset.to_be_bytes());
        }
    }
}
