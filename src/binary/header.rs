// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index file header and section layout.
//!
//! The header is 28 bytes: a magic word followed by six absolute section
//! offsets. It's the only thing fetched before we know where anything else
//! lives, so it has to be parsed in one read.
//!
//! The dictionary and doc-metadata sections are stored twice, once gzipped
//! and once raw. A loader only ever touches one copy. An offset of zero means
//! the builder skipped that section entirely.
//!
//! `IndexHeader::section_range` is the single place that turns offsets into
//! byte ranges. Section `i` ends where the next non-empty section begins.

use super::reader::BeReader;
use crate::error::{Error, Result};
use crate::transport::ByteRange;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Header magic (big-endian u32 at offset 0)
pub const MAGIC: u32 = 0xDA7C;

/// Number of section offsets following the magic
pub const SECTION_COUNT: usize = 6;

// ============================================================================
// SECTIONS
// ============================================================================

/// Physical sections, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    DictionaryGz = 0,
    DocMetaGz = 1,
    Dictionary = 2,
    DocMeta = 3,
    Postings = 4,
    DocData = 5,
}

impl SectionId {
    pub const ALL: [SectionId; SECTION_COUNT] = [
        SectionId::DictionaryGz,
        SectionId::DocMetaGz,
        SectionId::Dictionary,
        SectionId::DocMeta,
        SectionId::Postings,
        SectionId::DocData,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SectionId::DictionaryGz => "dictionary.gz",
            SectionId::DocMetaGz => "doc-meta.gz",
            SectionId::Dictionary => "dictionary",
            SectionId::DocMeta => "doc-meta",
            SectionId::Postings => "postings",
            SectionId::DocData => "doc-data",
        }
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// Parsed index header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHeader {
    /// Absolute offsets indexed by `SectionId as usize`
    pub offsets: [u32; SECTION_COUNT],
}

impl IndexHeader {
    // 4 (magic) + 6*4 (offsets) = 28
    pub const SIZE: usize = 4 + 4 * SECTION_COUNT;

    /// Range covering the header itself.
    pub fn range() -> ByteRange {
        ByteRange::new(0, Self::SIZE as u64)
    }

    /// Parse and validate header bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(Error::format(format!(
                "Header too short: {} bytes (need {})",
                bytes.len(),
                Self::SIZE
            )));
        }

        let r = BeReader::new(bytes);
        let magic = r.u32_at(0)?;
        if magic != MAGIC {
            return Err(Error::format(format!(
                "Invalid magic: expected {:#06X}, got {:#010X}",
                MAGIC, magic
            )));
        }

        let mut offsets = [0u32; SECTION_COUNT];
        for (i, slot) in offsets.iter_mut().enumerate() {
            *slot = r.u32_at(4 + i * 4)?;
        }

        let header = Self { offsets };
        header.validate()?;
        Ok(header)
    }

    /// Non-zero offsets must be non-decreasing and must not point into the
    /// header. The posting and doc-data sections are required.
    fn validate(&self) -> Result<()> {
        let mut prev = 0u32;
        for id in SectionId::ALL {
            let offset = self.offset(id);
            if offset == 0 {
                continue;
            }
            if (offset as usize) < Self::SIZE {
                return Err(Error::format(format!(
                    "Section {} starts at {} inside the header",
                    id.name(),
                    offset
                )));
            }
            if offset < prev {
                return Err(Error::format(format!(
                    "Section {} at {} precedes previous section at {}",
                    id.name(),
                    offset,
                    prev
                )));
            }
            prev = offset;
        }

        for id in [SectionId::Postings, SectionId::DocData] {
            if !self.has_section(id) {
                return Err(Error::format(format!("Missing {} section", id.name())));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn offset(&self, id: SectionId) -> u32 {
        self.offsets[id as usize]
    }

    /// A zero offset means the builder skipped the section.
    #[inline]
    pub fn has_section(&self, id: SectionId) -> bool {
        self.offset(id) != 0
    }

    /// Byte range of a section: from its offset to the next present section,
    /// or open-ended when nothing follows it.
    pub fn section_range(&self, id: SectionId) -> ByteRange {
        let start = u64::from(self.offset(id));
        let end = self
            .offsets
            .iter()
            .skip(id as usize + 1)
            .map(|&o| u64::from(o))
            .find(|&o| o != 0 && o >= start);
        match end {
            Some(end) => ByteRange::new(start, end),
            None => ByteRange::open(start),
        }
    }

    /// Absolute start of the posting-lists section.
    pub fn postings_base(&self) -> u64 {
        u64::from(self.offset(SectionId::Postings))
    }

    /// Absolute start of the document-data section.
    pub fn doc_data_base(&self) -> u64 {
        u64::from(self.offset(SectionId::DocData))
    }

    /// Both compressed sections are present.
    pub fn has_compressed_sections(&self) -> bool {
        self.has_section(SectionId::DictionaryGz) && self.has_section(SectionId::DocMetaGz)
    }

    /// Both uncompressed sections are present.
    pub fn has_raw_sections(&self) -> bool {
        self.has_section(SectionId::Dictionary) && self.has_section(SectionId::DocMeta)
    }

    /// Serialize (used by the test fixture writer).
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..4].copy_from_slice(&MAGIC.to_be_bytes());
        for (i, offset) in self.offsets.iter().enumerate() {
            out[4 + i * 4..8 + i * 4].copy_from_slice(&offset.to_be_bytes());
        }
        out
    }
}
