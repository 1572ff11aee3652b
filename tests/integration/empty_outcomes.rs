//! Searches that legitimately find nothing, and why.

use rangeseek::search::fetch_postings;
use rangeseek::{CancellationToken, EmptyReason, EngineConfig, IndexEngine, SearchOutcome};

use super::common::{engine_for, header_of, sample_fixture};

async fn empty_reason(engine: &IndexEngine, query: &str) -> EmptyReason {
    match engine.search(query, CancellationToken::new()).await.unwrap() {
        SearchOutcome::Empty(reason) => reason,
        SearchOutcome::Hits(hits) => panic!("expected no hits, got {}", hits.hit_count()),
    }
}

#[tokio::test]
async fn test_blank_query_has_no_keys() {
    let (engine, source) = engine_for(sample_fixture().build(), EngineConfig::default());
    assert_eq!(empty_reason(&engine, "   \u{3000} ").await, EmptyReason::NoKeys);
    // Loading still happened; no posting fetches did
    assert_eq!(source.fetch_count(), 3);
}

#[tokio::test]
async fn test_unknown_key_is_missing() {
    let (engine, _) = engine_for(sample_fixture().build(), EngineConfig::default());
    assert_eq!(
        empty_reason(&engine, "rust zebra").await,
        EmptyReason::Unresolved {
            missing: vec!["zebra".to_string()],
            failed: vec![],
        }
    );
}

#[tokio::test]
async fn test_disjoint_keys_have_no_common_document() {
    let (engine, _) = engine_for(sample_fixture().build(), EngineConfig::default());
    assert_eq!(
        empty_reason(&engine, "rust unrelated").await,
        EmptyReason::NoCommonDocuments
    );
}

#[tokio::test]
async fn test_only_degenerate_documents() {
    let (engine, _) = engine_for(
        sample_fixture().zero_norm(0).build(),
        EngineConfig::default(),
    );
    assert_eq!(empty_reason(&engine, "rust").await, EmptyReason::AllDegenerate);
}

#[tokio::test]
async fn test_failed_posting_fetch_reported_separately() {
    let bytes = sample_fixture().build();
    let postings = u64::from(header_of(&bytes).offsets[4]);
    let (engine, source) = engine_for(bytes, EngineConfig::default());
    engine.load().await.unwrap();

    source.fail_from(postings);
    assert_eq!(
        empty_reason(&engine, "rust zebra").await,
        EmptyReason::Unresolved {
            missing: vec!["zebra".to_string()],
            failed: vec!["rust".to_string()],
        }
    );
}

#[tokio::test]
async fn test_one_failed_fetch_keeps_sibling_lists() {
    let (engine, source) = engine_for(sample_fixture().build(), EngineConfig::default());
    engine.load().await.unwrap();
    let index = engine.index().unwrap();

    let rust = index.dictionary.find_key("rust").unwrap();
    source.fail_range(index.posting_range(rust).unwrap());

    let keys = vec!["rust".to_string(), "search".to_string()];
    let fetched = fetch_postings(&*source, &index, &keys).await;

    assert_eq!(fetched.failed, vec!["rust".to_string()]);
    assert!(fetched.missing.is_empty());
    assert_eq!(fetched.lists.len(), 1);
    assert_eq!(fetched.lists[0].key, "search");
    // "search" appears in the rust and ja documents
    assert_eq!(fetched.lists[0].document_frequency(), 2);
    assert!(!fetched.is_complete());
}
