// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dictionary section parsing under adversarial input.
//!
//! Counts that claim more records than the buffer holds, key lengths that
//! run off the end, invalid UTF-8, offsets that go backwards: all of it must
//! come back as an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rangeseek::binary::Dictionary;

fuzz_target!(|data: &[u8]| {
    let Ok(dict) = Dictionary::parse(data) else {
        return;
    };

    // Every parsed key is findable at its own index when the file was sorted,
    // and lookups never panic when it wasn't.
    let sorted = dict
        .entries()
        .zip(dict.entries().skip(1))
        .all(|(a, b)| a.key < b.key);
    for (i, entry) in dict.entries().enumerate() {
        let found = dict.find_key(&entry.key);
        if sorted {
            assert_eq!(found, Some(i));
        }
        if let Ok(range) = dict.posting_range(i, 28, None) {
            assert!(range.end.map_or(true, |end| end >= range.start));
        }
    }
});
