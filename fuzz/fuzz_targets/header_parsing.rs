// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Header parsing under adversarial input.
//!
//! The header is the first thing fetched from an untrusted server. Any 28
//! bytes must either parse into a usable layout or be rejected; nothing may
//! panic, and an accepted header must never produce a backwards range.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rangeseek::binary::{IndexHeader, SectionId};

fuzz_target!(|data: &[u8]| {
    let Ok(header) = IndexHeader::parse(data) else {
        return;
    };

    for id in SectionId::ALL {
        let range = header.section_range(id);
        if let Some(end) = range.end {
            assert!(end >= range.start, "section {} range is backwards", id.name());
        }
    }
    assert!(header.postings_base() >= IndexHeader::SIZE as u64);
    assert!(header.doc_data_base() >= header.postings_base());
});
