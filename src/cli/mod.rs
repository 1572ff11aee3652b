// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the rangeseek command-line interface.
//!
//! Two subcommands: `search` to query an index and `inspect` to look at its
//! layout. SOURCE is either an `http(s)://` URL, read with range requests, or
//! a local path.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rangeseek",
    about = "Bigram full-text search over a range-addressable index file",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search an index and display ranked results
    Search {
        /// Index URL or file path
        source: String,

        /// Search query
        query: String,

        /// Maximum number of results to fetch
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Load the uncompressed sections even when gzip is available
        #[arg(long)]
        raw: bool,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Load an index and show its layout
    Inspect {
        /// Index URL or file path
        source: String,

        /// Number of dictionary keys to list
        #[arg(short, long, default_value = "0")]
        keys: usize,

        /// Print stats as JSON
        #[arg(long)]
        json: bool,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<String>,
    },
}
