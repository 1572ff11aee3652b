//! Synthetic index files for tests and benchmarks.
//!
//! This module is always compiled but hidden from documentation. It writes
//! the same layout a real index builder produces, from a handful of documents
//! whose body text is keyed with the query tokenizer's rules:
//!
//! ```text
//! header │ dict.gz │ meta.gz │ dict │ meta │ postings │ doc data
//! ```
//!
//! Sections that are switched off get offset `0`.

#![doc(hidden)]

use std::collections::BTreeMap;

use crate::binary::{
    encode_postings, Dictionary, DictionaryEntry, DocMeta, IndexHeader, PostingEntry, Span,
    SECTION_COUNT,
};
use crate::codec;
use crate::search::idf;
use crate::tokenizer::{split_words, tokenize, word_keys};

/// One document of a fixture.
#[derive(Debug, Clone, Default)]
pub struct FixtureDoc {
    pub url: String,
    pub title: String,
    pub description: String,
    /// Indexed text; never written to the file
    pub body: String,
}

/// Builder for a synthetic index file.
#[derive(Debug, Clone)]
pub struct IndexFixture {
    docs: Vec<FixtureDoc>,
    gzip: bool,
    raw: bool,
    zero_norm: Vec<u32>,
}

impl Default for IndexFixture {
    fn default() -> Self {
        Self {
            docs: Vec::new(),
            gzip: codec::gzip_available(),
            raw: true,
            zero_norm: Vec::new(),
        }
    }
}

impl IndexFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document; its doc_id is its position.
    pub fn doc(mut self, url: &str, title: &str, description: &str, body: &str) -> Self {
        self.docs.push(FixtureDoc {
            url: url.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            body: body.to_string(),
        });
        self
    }

    /// Leave out the gzip section pair.
    pub fn without_gzip(mut self) -> Self {
        self.gzip = false;
        self
    }

    /// Leave out the uncompressed section pair.
    pub fn without_raw(mut self) -> Self {
        self.raw = false;
        self
    }

    /// Store a zero norm for `doc_id`.
    pub fn zero_norm(mut self, doc_id: u32) -> Self {
        self.zero_norm.push(doc_id);
        self
    }

    pub fn docs(&self) -> &[FixtureDoc] {
        &self.docs
    }

    /// Posting lists by key, doc_ids ascending.
    pub fn postings(&self) -> BTreeMap<String, Vec<PostingEntry>> {
        let mut postings: BTreeMap<String, Vec<PostingEntry>> = BTreeMap::new();
        for (doc_id, doc) in self.docs.iter().enumerate() {
            let mut counts: BTreeMap<String, u32> = BTreeMap::new();
            for word in split_words(&doc.body) {
                for key in word_keys(word) {
                    *counts.entry(key).or_default() += 1;
                }
            }
            for (key, tf) in counts {
                postings
                    .entry(key)
                    .or_default()
                    .push(PostingEntry::new(doc_id as u32, tf));
            }
        }
        postings
    }

    /// Stored L2 norm of each document's tf-idf vector.
    pub fn norms(&self) -> Vec<f32> {
        let total = self.docs.len() as u32;
        let mut squares = vec![0f64; self.docs.len()];
        for list in self.postings().values() {
            let weight = idf(total, list.len());
            for entry in list {
                let w = f64::from(entry.term_frequency) * weight;
                squares[entry.doc_id as usize] += w * w;
            }
        }
        squares
            .into_iter()
            .enumerate()
            .map(|(doc_id, sq)| {
                if self.zero_norm.contains(&(doc_id as u32)) {
                    0.0
                } else {
                    sq.sqrt() as f32
                }
            })
            .collect()
    }

    /// Score the engine should report for `doc_id`, or `None` if the
    /// document doesn't match every key or isn't scorable.
    pub fn expected_score(&self, doc_id: u32, query: &str) -> Option<f64> {
        let postings = self.postings();
        let total = self.docs.len() as u32;
        let norm = f64::from(*self.norms().get(doc_id as usize)?);
        if norm == 0.0 {
            return None;
        }

        let mut dot = 0.0;
        let mut query_sq = 0.0;
        for key in tokenize(query) {
            let list = postings.get(&key)?;
            let tf = list.iter().find(|e| e.doc_id == doc_id)?.term_frequency;
            let weight = idf(total, list.len());
            dot += f64::from(tf) * weight;
            query_sq += weight * weight;
        }
        Some(if query_sq > 0.0 {
            dot / (norm * query_sq.sqrt())
        } else {
            0.0
        })
    }

    /// Serialize the whole index file.
    pub fn build(&self) -> Vec<u8> {
        let mut postings_bytes = Vec::new();
        let mut entries = Vec::new();
        for (key, list) in self.postings() {
            entries.push(DictionaryEntry {
                key,
                offset: postings_bytes.len() as u32,
            });
            encode_postings(&list, &mut postings_bytes);
        }
        let mut dict_bytes = Vec::new();
        Dictionary::from_entries(entries).encode(&mut dict_bytes);

        let norms = self.norms();
        let mut doc_data = Vec::new();
        let mut meta_bytes = Vec::new();
        meta_bytes.extend_from_slice(&(self.docs.len() as u32).to_be_bytes());
        for (doc_id, doc) in self.docs.iter().enumerate() {
            let mut span = |text: &str| {
                let span = Span::new(doc_data.len() as u32, text.len() as u16);
                doc_data.extend_from_slice(text.as_bytes());
                span
            };
            let record = DocMeta {
                doc_id: doc_id as u32,
                url: span(&doc.url),
                title: span(&doc.title),
                description: span(&doc.description),
                norm: norms[doc_id],
            };
            record.encode(&mut meta_bytes);
        }

        let gzip = |bytes: &[u8]| self.gzip.then(|| compress(bytes)).flatten();
        let raw = |bytes: &[u8]| self.raw.then(|| bytes.to_vec());
        let sections: [Option<Vec<u8>>; SECTION_COUNT] = [
            gzip(&dict_bytes),
            gzip(&meta_bytes),
            raw(&dict_bytes),
            raw(&meta_bytes),
            Some(postings_bytes),
            Some(doc_data),
        ];

        let mut out = vec![0u8; IndexHeader::SIZE];
        let mut offsets = [0u32; SECTION_COUNT];
        for (offset, section) in offsets.iter_mut().zip(sections) {
            if let Some(bytes) = section {
                *offset = out.len() as u32;
                out.extend_from_slice(&bytes);
            }
        }
        out[..IndexHeader::SIZE].copy_from_slice(&IndexHeader { offsets }.to_bytes());
        out
    }
}

#[cfg(feature = "gzip")]
fn compress(bytes: &[u8]) -> Option<Vec<u8>> {
    Some(codec::compress_gzip(bytes))
}

#[cfg(not(feature = "gzip"))]
fn compress(_bytes: &[u8]) -> Option<Vec<u8>> {
    None
}

/// Three small documents, mixing ASCII words and CJK text.
pub fn sample_fixture() -> IndexFixture {
    IndexFixture::new()
        .doc(
            "https://example.com/rust",
            "Rust search",
            "Range requests from Rust",
            "rust search engine rust",
        )
        .doc(
            "https://example.com/ja",
            "検索エンジン",
            "",
            "全文検索 エンジン search",
        )
        .doc(
            "https://example.com/misc",
            "",
            "Nothing in common",
            "unrelated words only",
        )
}
