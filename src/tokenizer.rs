// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query tokenization into index keys.
//!
//! The index was built from morphologically segmented text, but a browser has
//! no segmenter. So the query side falls back to the same rule the builder
//! applies inside each segment:
//!
//! - a one-character word, or a word that is pure ASCII, is a single
//!   lower-cased key (`"Rust"` → `"rust"`)
//! - anything else is split into overlapping character bigrams
//!   (`"検索語"` → `"検索"`, `"索語"`)
//!
//! CJK text has no spaces between words, so bigrams over a whole phrase still
//! find documents containing it, at the cost of some false positives at
//! segment boundaries.
//!
//! Bigram text is not lower-cased; the builder doesn't either.

use std::collections::HashSet;

/// Split a query into deduplicated index keys, in first-occurrence order.
///
/// # Example
///
/// ```
/// use rangeseek::tokenize;
///
/// assert_eq!(tokenize("AB cd"), vec!["ab", "cd"]);
/// assert_eq!(tokenize("あいう"), vec!["あい", "いう"]);
/// ```
pub fn tokenize(query: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();

    for word in split_words(query) {
        for key in word_keys(word) {
            if seen.insert(key.clone()) {
                keys.push(key);
            }
        }
    }

    keys
}

/// Whitespace-separated words, empty pieces dropped.
///
/// Uses Unicode whitespace, so the ideographic space (U+3000) common in
/// Japanese input separates words too.
pub fn split_words(query: &str) -> impl Iterator<Item = &str> {
    query.split_whitespace()
}

/// Keys for a single word, duplicates kept.
pub(crate) fn word_keys(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() == 1 || word.is_ascii() {
        return vec![word.to_lowercase()];
    }
    chars.windows(2).map(|pair| pair.iter().collect()).collect()
}
