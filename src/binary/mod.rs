// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format of the range-addressable index file.
//!
//! The file is built to be read in pieces over HTTP. A client fetches the
//! 28-byte header, then the dictionary and document metadata (small, gzipped),
//! then one posting list per query key, then one document-data span per
//! result. Nothing else is ever downloaded.
//!
//! That constraint shapes everything: posting lists are fixed-width records
//! so their byte spans follow from dictionary offsets, metadata records are
//! fixed-width so a doc_id is an address, and strings are undelimited because
//! their lengths are already known.
//!
//! # Format Overview
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (28 bytes)                                          │
//! │   magic: u32 = 0xDA7C                                      │
//! │   offsets: [u32; 6] (absolute, big-endian)                 │
//! ├────────────────────────────────────────────────────────────┤
//! │ 1. DICTIONARY (gzip)                                       │
//! ├────────────────────────────────────────────────────────────┤
//! │ 2. DOC_META (gzip)                                         │
//! ├────────────────────────────────────────────────────────────┤
//! │ 3. DICTIONARY (raw)  magic 0xDA7A, count, sorted records   │
//! ├────────────────────────────────────────────────────────────┤
//! │ 4. DOC_META (raw)    count, 26-byte records                │
//! ├────────────────────────────────────────────────────────────┤
//! │ 5. POSTINGS          8-byte (doc_id, tf) records per key   │
//! ├────────────────────────────────────────────────────────────┤
//! │ 6. DOC_DATA          undelimited UTF-8 url/title/desc      │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! All integers are big-endian.

// Submodules
mod dictionary;
mod docmeta;
mod header;
mod postings;
mod reader;

// Re-export from submodules for public API
pub use dictionary::{Dictionary, DictionaryEntry, DICT_MAGIC};
pub use docmeta::{DocMeta, DocumentTable, Span, DOC_META_RECORD_SIZE};
pub use header::{IndexHeader, SectionId, MAGIC, SECTION_COUNT};
pub use postings::{
    decode_postings, encode_postings, PostingEntry, PostingList, POSTING_RECORD_SIZE,
};
pub use reader::BeReader;
