// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Gzip decoding for the compressed dictionary and doc-metadata sections.
//!
//! Decompression is a compile-time capability (the `gzip` feature). Without
//! it, `gzip_available()` reports false and the loader reads the raw copies
//! stored alongside the compressed ones.

use crate::error::{Error, Result};

/// Whether this build can decode gzip sections.
pub const fn gzip_available() -> bool {
    cfg!(feature = "gzip")
}

/// Decode a gzip stream into raw bytes.
///
/// Concatenated gzip members are decoded as one stream.
#[cfg(feature = "gzip")]
pub fn decompress_gzip(bytes: &[u8]) -> Result<Vec<u8>> {
    use flate2::read::MultiGzDecoder;
    use std::io::Read;

    let mut out = Vec::with_capacity(bytes.len().saturating_mul(4));
    MultiGzDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(|e| Error::format(format!("Gzip decode failed: {}", e)))?;
    Ok(out)
}

#[cfg(not(feature = "gzip"))]
pub fn decompress_gzip(_bytes: &[u8]) -> Result<Vec<u8>> {
    Err(Error::format("Gzip support not compiled in"))
}

/// Encode bytes as gzip (test fixture writer).
#[cfg(feature = "gzip")]
pub fn compress_gzip(bytes: &[u8]) -> Vec<u8> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    // Writing into a Vec cannot fail
    let _ = encoder.write_all(bytes);
    encoder.finish().unwrap_or_default()
}
