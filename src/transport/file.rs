// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Local file range source.
//!
//! Opens the file per request, seeks, and reads just the range. Used by the
//! CLI to query an index before it's deployed.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::debug;

use super::{ByteRange, RangeSource};
use crate::error::{Error, Result};

/// Serves ranges of a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RangeSource for FileSource {
    async fn fetch(&self, range: ByteRange) -> Result<Bytes> {
        if range.is_empty() {
            return Ok(Bytes::new());
        }

        let mut file = tokio::fs::File::open(&self.path).await.map_err(|e| {
            Error::transport(format!("Failed to open {}: {}", self.path.display(), e))
        })?;
        let file_len = file.metadata().await?.len();

        if range.start >= file_len {
            return Err(Error::transport(format!(
                "Range {} not satisfiable for {}-byte file {}",
                range,
                file_len,
                self.path.display()
            )));
        }

        let end = range.end.map_or(file_len, |e| e.min(file_len));
        let mut buf = vec![0u8; (end - range.start) as usize];
        file.seek(SeekFrom::Start(range.start)).await?;
        file.read_exact(&mut buf).await?;

        debug!(path = %self.path.display(), %range, bytes = buf.len(), "file range read");
        Ok(Bytes::from(buf))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
