//! Index files whose sections decode but contradict the format.
//!
//! These come from a broken builder or a tampered file. The engine has to
//! report them per key, not panic or return a silently wrong answer.

use rangeseek::binary::{
    encode_postings, DocMeta, Dictionary, DictionaryEntry, IndexHeader, PostingEntry, Span,
};
use rangeseek::search::fetch_postings;
use rangeseek::{CancellationToken, EmptyReason, EngineConfig, SearchOutcome};

use super::common::engine_for;

/// Raw-section index with the given dictionary and postings section, and two
/// documents with empty text.
fn hand_built_index(dictionary: &[(&str, u32)], postings: &[PostingEntry]) -> Vec<u8> {
    let mut dict = Vec::new();
    Dictionary::from_entries(dictionary.iter().map(|&(key, offset)| DictionaryEntry {
        key: key.to_string(),
        offset,
    }))
    .encode(&mut dict);

    let mut meta = 2u32.to_be_bytes().to_vec();
    for doc_id in 0..2 {
        DocMeta {
            doc_id,
            url: Span::default(),
            title: Span::default(),
            description: Span::default(),
            norm: 1.0,
        }
        .encode(&mut meta);
    }

    let mut posting_bytes = Vec::new();
    encode_postings(postings, &mut posting_bytes);

    let dict_at = IndexHeader::SIZE as u32;
    let meta_at = dict_at + dict.len() as u32;
    let postings_at = meta_at + meta.len() as u32;
    let doc_data_at = postings_at + posting_bytes.len() as u32;
    let header = IndexHeader {
        offsets: [0, 0, dict_at, meta_at, postings_at, doc_data_at],
    };

    let mut bytes = header.to_bytes().to_vec();
    bytes.extend_from_slice(&dict);
    bytes.extend_from_slice(&meta);
    bytes.extend_from_slice(&posting_bytes);
    bytes
}

async fn outcome_reason(bytes: Vec<u8>, query: &str) -> EmptyReason {
    let (engine, _) = engine_for(bytes, EngineConfig::default());
    match engine.search(query, CancellationToken::new()).await.unwrap() {
        SearchOutcome::Empty(reason) => reason,
        SearchOutcome::Hits(hits) => panic!("expected no hits, got {}", hits.hit_count()),
    }
}

#[tokio::test]
async fn test_descending_posting_offsets_fail_the_key() {
    let bytes = hand_built_index(
        &[("a", 8), ("b", 0)],
        &[PostingEntry::new(0, 1), PostingEntry::new(1, 1)],
    );
    assert_eq!(
        outcome_reason(bytes, "a").await,
        EmptyReason::Unresolved {
            missing: vec![],
            failed: vec!["a".to_string()],
        }
    );
}

#[tokio::test]
async fn test_repeated_doc_id_fails_the_key() {
    let bytes = hand_built_index(
        &[("a", 0)],
        &[PostingEntry::new(0, 1), PostingEntry::new(0, 1)],
    );
    assert_eq!(
        outcome_reason(bytes, "a").await,
        EmptyReason::Unresolved {
            missing: vec![],
            failed: vec!["a".to_string()],
        }
    );
}

#[tokio::test]
async fn test_well_formed_sibling_of_bad_key_still_fetched() {
    // "b" is the last key, so its range ends at doc data and is valid
    let bytes = hand_built_index(
        &[("a", 8), ("b", 0)],
        &[PostingEntry::new(0, 1), PostingEntry::new(1, 1)],
    );
    let (engine, source) = engine_for(bytes, EngineConfig::default());
    engine.load().await.unwrap();
    let index = engine.index().unwrap();

    let fetched = fetch_postings(&*source, &index, &["a".to_string(), "b".to_string()]).await;
    assert_eq!(fetched.failed, vec!["a".to_string()]);
    assert!(fetched.missing.is_empty());
    assert_eq!(fetched.lists.len(), 1);
    assert_eq!(fetched.lists[0].key, "b");
    assert_eq!(fetched.lists[0].document_frequency(), 2);
}
