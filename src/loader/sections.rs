// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Section source strategies: gzip copy or raw copy.
//!
//! The dictionary and doc-metadata sections exist twice in every index. Which
//! copy a loader reads depends on the build (is gzip compiled in?), the file
//! (did the builder emit both?), and the config. That decision is made once,
//! in `select_section_source`, and the loader only ever talks to the
//! resulting `SectionSource`.

use async_trait::async_trait;
use tracing::debug;

use crate::binary::{IndexHeader, SectionId};
use crate::codec;
use crate::config::Decompression;
use crate::error::{Error, Result};
use crate::transport::RangeSource;

/// The two sections a load needs, independent of how they're stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalSection {
    Dictionary,
    DocMeta,
}

/// Which physical copy was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEncoding {
    Gzip,
    Raw,
}

impl SectionEncoding {
    pub fn name(self) -> &'static str {
        match self {
            SectionEncoding::Gzip => "gzip",
            SectionEncoding::Raw => "raw",
        }
    }
}

/// Fetches a logical section and returns its decoded bytes.
#[async_trait]
pub trait SectionSource: Send + Sync {
    fn encoding(&self) -> SectionEncoding;

    async fn fetch_section(
        &self,
        source: &dyn RangeSource,
        header: &IndexHeader,
        section: LogicalSection,
    ) -> Result<Vec<u8>>;
}

/// Reads the gzip copies and inflates them.
#[derive(Debug, Clone, Copy, Default)]
pub struct GzipSections;

/// Reads the uncompressed copies.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSections;

async fn fetch_physical(
    source: &dyn RangeSource,
    header: &IndexHeader,
    id: SectionId,
) -> Result<Vec<u8>> {
    let range = header.section_range(id);
    debug!(section = id.name(), %range, "fetching section");
    let bytes = source.fetch(range).await?;
    Ok(bytes.to_vec())
}

#[async_trait]
impl SectionSource for GzipSections {
    fn encoding(&self) -> SectionEncoding {
        SectionEncoding::Gzip
    }

    async fn fetch_section(
        &self,
        source: &dyn RangeSource,
        header: &IndexHeader,
        section: LogicalSection,
    ) -> Result<Vec<u8>> {
        let id = match section {
            LogicalSection::Dictionary => SectionId::DictionaryGz,
            LogicalSection::DocMeta => SectionId::DocMetaGz,
        };
        let compressed = fetch_physical(source, header, id).await?;
        codec::decompress_gzip(&compressed)
            .map_err(|e| Error::format(format!("Section {}: {}", id.name(), e)))
    }
}

#[async_trait]
impl SectionSource for RawSections {
    fn encoding(&self) -> SectionEncoding {
        SectionEncoding::Raw
    }

    async fn fetch_section(
        &self,
        source: &dyn RangeSource,
        header: &IndexHeader,
        section: LogicalSection,
    ) -> Result<Vec<u8>> {
        let id = match section {
            LogicalSection::Dictionary => SectionId::Dictionary,
            LogicalSection::DocMeta => SectionId::DocMeta,
        };
        fetch_physical(source, header, id).await
    }
}

/// Pick the section source for this build, file, and config.
pub fn select_section_source(
    mode: Decompression,
    header: &IndexHeader,
) -> Result<Box<dyn SectionSource>> {
    match mode {
        Decompression::Auto => {
            if codec::gzip_available() && header.has_compressed_sections() {
                Ok(Box::new(GzipSections))
            } else if header.has_raw_sections() {
                Ok(Box::new(RawSections))
            } else {
                Err(Error::format(
                    "Index has no dictionary/doc-metadata sections this build can read",
                ))
            }
        }
        Decompression::Gzip => {
            if !codec::gzip_available() {
                Err(Error::format("Gzip sections requested but gzip support is not compiled in"))
            } else if !header.has_compressed_sections() {
                Err(Error::format("Gzip sections requested but the index has none"))
            } else {
                Ok(Box::new(GzipSections))
            }
        }
        Decompression::Raw => {
            if header.has_raw_sections() {
                Ok(Box::new(RawSections))
            } else {
                Err(Error::format("Raw sections requested but the index has none"))
            }
        }
    }
}
