//! Synthetic index → load → search, over every section encoding and source.

use std::io::Write;

use rangeseek::{
    CancellationToken, Decompression, EngineConfig, FileSource, IndexEngine, SearchOutcome,
    SectionEncoding,
};

use super::common::{assert_score_close, engine_for, sample_fixture, search_all, IndexFixture};

fn config(decompression: Decompression) -> EngineConfig {
    EngineConfig { decompression }
}

// ============================================================================
// RAW SECTIONS
// ============================================================================

#[tokio::test]
async fn test_raw_round_trip_exact_strings() {
    let fixture = sample_fixture().without_gzip();
    let (engine, _) = engine_for(fixture.build(), EngineConfig::default());

    let records = search_all(&engine, "rust search").await;
    assert_eq!(records.len(), 1);
    let hit = &records[0];
    assert_eq!(hit.doc_id, 0);
    assert_eq!(hit.url, "https://example.com/rust");
    assert_eq!(hit.title, "Rust search");
    assert_eq!(hit.description, "Range requests from Rust");
    assert_score_close(hit.score, fixture.expected_score(0, "rust search").unwrap());

    let stats = engine.stats().unwrap();
    assert_eq!(stats.encoding, SectionEncoding::Raw.name());
    assert_eq!(stats.total_docs, 3);
}

#[tokio::test]
async fn test_cjk_query_and_empty_description() {
    let fixture = sample_fixture();
    let (engine, _) = engine_for(fixture.build(), EngineConfig::default());

    let records = search_all(&engine, "検索 エンジン").await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].doc_id, 1);
    assert_eq!(records[0].title, "検索エンジン");
    assert_eq!(records[0].description, "");
    assert_score_close(
        records[0].score,
        fixture.expected_score(1, "検索 エンジン").unwrap(),
    );
}

#[tokio::test]
async fn test_multiple_hits_ranked_by_score() {
    let fixture = IndexFixture::new()
        .doc("/a", "A", "", "alpha beta")
        .doc("/b", "B", "", "alpha alpha alpha beta")
        .doc("/c", "C", "", "gamma")
        .doc("/d", "D", "", "delta");
    let (engine, _) = engine_for(fixture.build(), EngineConfig::default());

    let records = search_all(&engine, "alpha").await;
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_score_close(
            record.score,
            fixture.expected_score(record.doc_id, "alpha").unwrap(),
        );
    }
    assert!(records[0].score >= records[1].score);
}

#[tokio::test]
async fn test_forced_raw_reads_uncompressed_copy() {
    let (engine, source) = engine_for(
        sample_fixture().build(),
        config(Decompression::Raw),
    );
    engine.load().await.unwrap();

    assert_eq!(engine.stats().unwrap().encoding, "raw");
    let header = super::common::header_of(&sample_fixture().build());
    let ranges = source.ranges();
    assert!(ranges
        .iter()
        .any(|r| r.start == u64::from(header.offsets[2])));
    assert!(ranges
        .iter()
        .any(|r| r.start == u64::from(header.offsets[3])));
}

// ============================================================================
// GZIP SECTIONS
// ============================================================================

#[cfg(feature = "gzip")]
#[tokio::test]
async fn test_gzip_round_trip_matches_raw() {
    let fixture = sample_fixture().without_raw();
    let (engine, _) = engine_for(fixture.build(), EngineConfig::default());

    let records = search_all(&engine, "rust search").await;
    assert_eq!(engine.stats().unwrap().encoding, "gzip");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Rust search");
    assert_score_close(
        records[0].score,
        fixture.expected_score(0, "rust search").unwrap(),
    );
}

#[cfg(feature = "gzip")]
#[tokio::test]
async fn test_auto_prefers_gzip_when_both_present() {
    let (engine, _) = engine_for(sample_fixture().build(), EngineConfig::default());
    engine.load().await.unwrap();
    assert_eq!(engine.stats().unwrap().encoding, "gzip");
}

#[tokio::test]
async fn test_forced_gzip_without_gzip_sections_fails() {
    let (engine, _) = engine_for(
        sample_fixture().without_gzip().build(),
        config(Decompression::Gzip),
    );
    assert!(engine.load().await.is_err());
    assert!(!engine.is_ready());
}

// ============================================================================
// FILE SOURCE
// ============================================================================

#[tokio::test]
async fn test_file_source_end_to_end() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&sample_fixture().build()).unwrap();
    file.flush().unwrap();

    let engine = IndexEngine::new(FileSource::new(file.path()));
    let outcome = engine
        .search("search", CancellationToken::new())
        .await
        .unwrap();

    let hits = match outcome {
        SearchOutcome::Hits(hits) => hits,
        SearchOutcome::Empty(reason) => panic!("expected hits, got {:?}", reason),
    };
    assert_eq!(hits.hit_count(), 2);
    let records = hits.collect_records(Some(1)).await.unwrap();
    assert_eq!(records.len(), 1);
}
