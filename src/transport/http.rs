// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! HTTP range source.
//!
//! Sends `Range: bytes=a-b` against one fixed URL. A server that honours the
//! header answers `206 Partial Content`; one that ignores it answers `200`
//! with the whole file, which we slice locally. Anything else is a transport
//! error.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::RANGE;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::{ByteRange, RangeSource};
use crate::config::HttpConfig;
use crate::error::{Error, Result};

/// Range source backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Create a source for `url` with the given transport settings.
    pub fn new(url: impl Into<String>, config: &HttpConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout());
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let client = builder
            .build()
            .map_err(|e| Error::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Create a source sharing an existing client.
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RangeSource for HttpSource {
    async fn fetch(&self, range: ByteRange) -> Result<Bytes> {
        if range.is_empty() {
            return Ok(Bytes::new());
        }

        let response = self
            .client
            .get(&self.url)
            .header(RANGE, range.header_value())
            .send()
            .await
            .map_err(|e| Error::transport(format!("GET {} {}: {}", self.url, range, e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("Reading body of {} {}: {}", self.url, range, e)))?;

        debug!(url = %self.url, %range, status = status.as_u16(), bytes = body.len(), "range fetch");

        match status {
            StatusCode::PARTIAL_CONTENT => Ok(body),
            // Server ignored the Range header and sent the whole file
            StatusCode::OK => range.slice_of(&body),
            other => Err(Error::transport(format!(
                "GET {} {} returned {}",
                self.url, range, other
            ))),
        }
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
