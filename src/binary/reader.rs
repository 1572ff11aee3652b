// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Big-endian field access at arbitrary offsets.
//!
//! Every section of the index is a flat byte buffer with fixed-width fields
//! at computed positions. `BeReader` wraps a slice and turns every
//! out-of-bounds read into a `Format` error, so the parsers above it never
//! index a slice directly.

use crate::error::{Error, Result};

/// Bounds-checked big-endian reader over a borrowed buffer.
#[derive(Debug, Clone, Copy)]
pub struct BeReader<'a> {
    bytes: &'a [u8],
}

impl<'a> BeReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let end = offset.checked_add(len).ok_or_else(|| {
            Error::format(format!("Field at {} with length {} overflows", offset, len))
        })?;
        self.bytes.get(offset..end).ok_or_else(|| {
            Error::format(format!(
                "Read of {} bytes at offset {} past end of {}-byte buffer",
                len,
                offset,
                self.bytes.len()
            ))
        })
    }

    fn array<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let slice = self.bytes(offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    #[inline]
    pub fn u8_at(&self, offset: usize) -> Result<u8> {
        Ok(self.array::<1>(offset)?[0])
    }

    #[inline]
    pub fn u16_at(&self, offset: usize) -> Result<u16> {
        self.array(offset).map(u16::from_be_bytes)
    }

    #[inline]
    pub fn u32_at(&self, offset: usize) -> Result<u32> {
        self.array(offset).map(u32::from_be_bytes)
    }

    #[inline]
    pub fn f32_at(&self, offset: usize) -> Result<f32> {
        self.array(offset).map(f32::from_be_bytes)
    }
}
