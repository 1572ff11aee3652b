//! Cancellation while materializing results.

use futures::StreamExt;
use rangeseek::{CancellationToken, EngineConfig, Error, SearchOutcome};

use super::common::{engine_for, header_of, IndexFixture};

/// Five documents containing "shared", plus one that doesn't.
fn five_hits() -> IndexFixture {
    (0..5)
        .fold(IndexFixture::new(), |fixture, i| {
            fixture.doc(
                &format!("https://example.com/{}", i),
                &format!("Doc {}", i),
                "",
                &format!("shared filler{}", i),
            )
        })
        .doc("https://example.com/other", "Other", "", "unrelated")
}

#[tokio::test]
async fn test_cancel_after_first_record() {
    let (engine, source) = engine_for(five_hits().build(), EngineConfig::default());
    let token = CancellationToken::new();

    let mut hits = match engine.search("shared", token.clone()).await.unwrap() {
        SearchOutcome::Hits(hits) => hits,
        SearchOutcome::Empty(reason) => panic!("expected hits, got {:?}", reason),
    };
    assert_eq!(hits.hit_count(), 5);

    let first = hits.next().await.unwrap().unwrap();
    assert!(first.url.starts_with("https://example.com/"));

    token.cancel();
    let fetches = source.fetch_count();

    assert_eq!(hits.next().await, Some(Err(Error::Cancelled)));
    assert_eq!(hits.next().await, None);
    assert_eq!(hits.remaining(), 0);
    assert_eq!(source.fetch_count(), fetches);
}

#[tokio::test]
async fn test_cancel_aborts_in_flight_fetch() {
    let bytes = five_hits().build();
    let doc_data = u64::from(header_of(&bytes).offsets[5]);
    let (engine, source) = engine_for(bytes, EngineConfig::default());
    let token = CancellationToken::new();

    let mut hits = engine
        .search("shared", token.clone())
        .await
        .unwrap()
        .into_hits()
        .unwrap();

    source.stall_from(doc_data);
    let canceller = token.clone();
    let (result, ()) = tokio::join!(hits.next(), async move {
        tokio::task::yield_now().await;
        canceller.cancel();
    });

    assert_eq!(result, Some(Err(Error::Cancelled)));
    assert_eq!(hits.next().await, None);
}

#[tokio::test]
async fn test_cancelled_before_search() {
    let (engine, source) = engine_for(five_hits().build(), EngineConfig::default());
    engine.load().await.unwrap();
    let loaded = source.fetch_count();

    let token = CancellationToken::new();
    token.cancel();
    let err = engine.search("shared", token).await.unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(source.fetch_count(), loaded);
}

#[tokio::test]
async fn test_collect_stops_quietly_on_cancel() {
    let (engine, _) = engine_for(five_hits().build(), EngineConfig::default());
    let token = CancellationToken::new();
    let hits = engine
        .search("shared", token.clone())
        .await
        .unwrap()
        .into_hits()
        .unwrap();

    token.cancel();
    assert!(hits.collect_records(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_stream_adapter_yields_in_rank_order() {
    let (engine, _) = engine_for(five_hits().build(), EngineConfig::default());
    let hits = engine
        .search("shared", CancellationToken::new())
        .await
        .unwrap()
        .into_hits()
        .unwrap();
    let expected: Vec<u32> = hits.ranked().iter().map(|r| r.doc_id).collect();

    let records: Vec<_> = hits.into_stream().collect().await;
    let ids: Vec<u32> = records
        .into_iter()
        .map(|r| r.unwrap().doc_id)
        .collect();
    assert_eq!(ids, expected);
}
