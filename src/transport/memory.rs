// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory range source.

use async_trait::async_trait;
use bytes::Bytes;

use super::{ByteRange, RangeSource};
use crate::error::Result;

/// Serves ranges out of a buffer holding the whole index file.
#[derive(Debug, Clone)]
pub struct MemorySource {
    bytes: Bytes,
}

impl MemorySource {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[async_trait]
impl RangeSource for MemorySource {
    async fn fetch(&self, range: ByteRange) -> Result<Bytes> {
        range.slice_of(&self.bytes)
    }

    fn describe(&self) -> String {
        format!("memory ({} bytes)", self.bytes.len())
    }
}
