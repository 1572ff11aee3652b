//! Index loading: single flight, failures, retry, malformed files.

use rangeseek::{CancellationToken, EngineConfig, Error};

use super::common::{engine_for, sample_fixture, search_all};

// ============================================================================
// SINGLE FLIGHT
// ============================================================================

#[tokio::test]
async fn test_concurrent_loads_fetch_once() {
    let (engine, source) = engine_for(sample_fixture().build(), EngineConfig::default());

    let (a, b, c) = tokio::join!(engine.load(), engine.load(), engine.load());
    assert_eq!(a, Ok(()));
    assert_eq!(b, Ok(()));
    assert_eq!(c, Ok(()));

    // Header, dictionary, doc metadata
    assert_eq!(source.fetch_count(), 3);
    assert!(engine.is_ready());
}

#[tokio::test]
async fn test_concurrent_searches_share_load() {
    let (engine, source) = engine_for(sample_fixture().build(), EngineConfig::default());

    let (first, second) = tokio::join!(
        engine.search("rust", CancellationToken::new()),
        engine.search("rust", CancellationToken::new()),
    );
    assert!(!first.unwrap().is_empty());
    assert!(!second.unwrap().is_empty());

    // One load (3) plus one posting fetch per search
    assert_eq!(source.fetch_count(), 5);
}

#[tokio::test]
async fn test_load_is_memoized() {
    let (engine, source) = engine_for(sample_fixture().build(), EngineConfig::default());
    engine.load().await.unwrap();
    engine.load().await.unwrap();
    search_all(&engine, "rust").await;
    // 3 for the load, 1 posting list, 1 document
    assert_eq!(source.fetch_count(), 5);
}

#[tokio::test]
async fn test_waiters_see_abandoned_leader() {
    let (engine, _) = engine_for(sample_fixture().build(), EngineConfig::default());

    let mut leader = Box::pin(engine.load());
    assert!(futures::poll!(leader.as_mut()).is_pending());

    let mut waiter = Box::pin(engine.load());
    assert!(futures::poll!(waiter.as_mut()).is_pending());

    drop(leader);
    assert_eq!(waiter.await, Err(Error::LoadAbandoned));
    assert!(!engine.is_ready());

    // Nothing is stuck: the next load starts over
    engine.load().await.unwrap();
    assert!(engine.is_ready());
}

// ============================================================================
// FAILURE AND RETRY
// ============================================================================

#[tokio::test]
async fn test_failed_load_is_shared_then_retried() {
    let (engine, source) = engine_for(sample_fixture().build(), EngineConfig::default());
    source.set_failing(true);

    let (a, b) = tokio::join!(engine.load(), engine.load());
    assert!(matches!(a, Err(Error::Transport(_))));
    assert_eq!(a, b);
    assert!(!engine.is_ready());
    assert!(engine.stats().is_none());

    source.set_failing(false);
    engine.load().await.unwrap();
    assert!(engine.is_ready());
}

#[tokio::test]
async fn test_search_propagates_load_failure() {
    let (engine, source) = engine_for(sample_fixture().build(), EngineConfig::default());
    source.set_failing(true);

    let err = engine
        .search("rust", CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.is_retriable());
}

// ============================================================================
// MALFORMED FILES
// ============================================================================

#[tokio::test]
async fn test_bad_header_magic() {
    let mut bytes = sample_fixture().build();
    bytes[3] = 0x00;
    let (engine, _) = engine_for(bytes, EngineConfig::default());
    assert!(matches!(engine.load().await, Err(Error::Format(_))));
}

#[tokio::test]
async fn test_truncated_header() {
    let bytes = sample_fixture().build()[..20].to_vec();
    let (engine, _) = engine_for(bytes, EngineConfig::default());
    assert!(matches!(engine.load().await, Err(Error::Format(_))));
}

#[tokio::test]
async fn test_non_monotonic_offsets() {
    let mut bytes = sample_fixture().without_gzip().build();
    // Swap the postings and doc-data offsets
    let postings: [u8; 4] = bytes[20..24].try_into().unwrap();
    let doc_data: [u8; 4] = bytes[24..28].try_into().unwrap();
    bytes[20..24].copy_from_slice(&doc_data);
    bytes[24..28].copy_from_slice(&postings);

    let (engine, _) = engine_for(bytes, EngineConfig::default());
    assert!(matches!(engine.load().await, Err(Error::Format(_))));
}
