// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Posting and doc-metadata decoding under adversarial input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rangeseek::binary::{decode_postings, DocumentTable, POSTING_RECORD_SIZE};

fuzz_target!(|data: &[u8]| {
    if let Ok(entries) = decode_postings(data) {
        assert_eq!(entries.len() * POSTING_RECORD_SIZE, data.len());
        assert!(entries.windows(2).all(|w| w[0].doc_id < w[1].doc_id));
    }

    if let Ok(table) = DocumentTable::parse(data.to_vec()) {
        for doc_id in 0..table.total_docs().min(64) {
            let meta = table.get(doc_id).expect("validated length covers every record");
            let _ = meta.covering_range(1_000);
        }
        assert!(table.get(table.total_docs()).is_err());
    }
});
