// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for rangeseek.
//!
//! Three kinds of trouble matter to a caller: the file is malformed, the
//! transport broke, or the user cancelled. Cancellation is an error value only
//! so that it can travel through `?`; callers should check `is_cancelled()`
//! before logging anything.
//!
//! "Nothing matched" is not an error at all. See `SearchOutcome::Empty`.

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Engine error.
///
/// `Clone` because one load outcome is handed to every caller that was
/// waiting on the same in-flight load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Bad magic, truncated or malformed records, undecodable gzip
    #[error("Format error: {0}")]
    Format(String),

    /// Range fetch failed or returned a non-success status
    #[error("Transport error: {0}")]
    Transport(String),

    /// The caller's cancellation token fired
    #[error("Search cancelled")]
    Cancelled,

    /// The task driving a shared load was dropped before it finished
    #[error("Index load abandoned before completion")]
    LoadAbandoned,

    /// Invalid configuration file
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a format error
    pub fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Error::Transport(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Early termination requested by the caller, not a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Whether calling `load()` again could plausibly succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::LoadAbandoned)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Transport(e.to_string())
    }
}
