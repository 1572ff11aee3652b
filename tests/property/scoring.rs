//! Scoring monotonicity, degenerate exclusion, and rank stability.

use proptest::prelude::*;
use rangeseek::binary::{DocMeta, DocumentTable, PostingEntry, PostingList, Span};
use rangeseek::search::{rank, score_and_rank, DocMatch, RankedDoc};

fn table(norms: &[f32]) -> DocumentTable {
    let records: Vec<DocMeta> = norms
        .iter()
        .enumerate()
        .map(|(doc_id, &norm)| DocMeta {
            doc_id: doc_id as u32,
            url: Span::default(),
            title: Span::default(),
            description: Span::default(),
            norm,
        })
        .collect();
    DocumentTable::from_records(&records)
}

proptest! {
    /// Raising one term frequency strictly raises the score.
    #[test]
    fn prop_score_monotone_in_tf(
        tf in 1u32..50,
        bump in 1u32..50,
        norm in 0.1f32..20.0,
        df in 1usize..9,
    ) {
        let docs = table(&[norm; 10]);
        let list = PostingList::new(
            "k",
            (0..df as u32).map(|d| PostingEntry::new(d, 1)).collect(),
        );
        let lists = [list];
        let low = score_and_rank(
            &[DocMatch { doc_id: 0, term_frequencies: vec![tf] }],
            &lists,
            &docs,
        );
        let high = score_and_rank(
            &[DocMatch { doc_id: 0, term_frequencies: vec![tf + bump] }],
            &lists,
            &docs,
        );
        prop_assert!(high[0].score > low[0].score);
    }

    /// Zero-norm documents never appear, whatever their frequencies.
    #[test]
    fn prop_zero_norm_never_ranked(
        norms in prop::collection::vec(prop_oneof![Just(0.0f32), 0.5f32..5.0], 2..12),
        tf in 1u32..10,
    ) {
        let docs = table(&norms);
        let all: Vec<u32> = (0..norms.len() as u32).collect();
        let list = PostingList::new("k", all.iter().map(|&d| PostingEntry::new(d, tf)).collect());
        let matches: Vec<DocMatch> = all
            .iter()
            .map(|&doc_id| DocMatch { doc_id, term_frequencies: vec![tf] })
            .collect();

        let ranked = score_and_rank(&matches, &[list], &docs);
        let expected = norms.iter().filter(|&&n| n != 0.0).count();
        prop_assert_eq!(ranked.len(), expected);
        for hit in &ranked {
            prop_assert!(norms[hit.doc_id as usize] != 0.0);
            prop_assert!(hit.score.is_finite());
        }
    }

    /// Ranking is descending, and ties keep their input order.
    #[test]
    fn prop_rank_stable(scores in prop::collection::vec(0u8..4, 0..40)) {
        let mut ranked: Vec<RankedDoc> = scores
            .iter()
            .enumerate()
            .map(|(i, &s)| RankedDoc { doc_id: i as u32, score: f64::from(s) })
            .collect();
        rank(&mut ranked);

        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].doc_id < pair[1].doc_id);
            }
        }
    }
}
