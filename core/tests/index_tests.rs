use postlist_core::{match_count, CombinePolicy, Error, InvertedIndex, Match, Positions, TermFrequency};
use std::collections::BTreeSet;

#[test]
fn it_preserves_insertion_order() {
    let mut index: InvertedIndex<&str, &str> = InvertedIndex::new(CombinePolicy::Append);
    index.insert("d1", ["t"]);
    index.insert("d2", ["t"]);
    index.insert("d1", ["t"]);
    let ids: Vec<&str> = index.index().postings(&"t").iter().map(|p| p.document_id).collect();
    assert_eq!(ids, vec!["d1", "d2", "d1"]);
}

#[test]
fn it_merges_only_contiguous_occurrences() {
    let mut index: InvertedIndex<&str, u32, TermFrequency> = InvertedIndex::new(CombinePolicy::Combine);
    index.insert(1, ["a", "a", "b"]);
    let a = index.index().postings(&"a");
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].data, TermFrequency(2));
    assert_eq!(index.index().postings(&"b").len(), 1);

    let mut index: InvertedIndex<&str, u32, TermFrequency> = InvertedIndex::new(CombinePolicy::Combine);
    index.insert(1, ["a"]);
    index.insert(2, ["a"]);
    index.insert(1, ["a"]);
    assert_eq!(index.index().postings(&"a").len(), 3);
}

#[test]
fn it_keeps_positions_when_merging() {
    let mut index: InvertedIndex<&str, u32, Positions> = InvertedIndex::default();
    index.insert(1, ["a", "b", "a"]);
    assert_eq!(index.index().postings(&"a")[0].data, Positions(vec![0, 2]));
}

#[test]
fn it_reports_empty_query() {
    let mut index: InvertedIndex<&str, u32> = InvertedIndex::default();
    index.insert(1, ["a", "b"]);
    let empty: [&str; 0] = [];
    assert_eq!(index.best_match(&empty, &match_count), Err(Error::EmptyResult));
}

fn xy_index() -> InvertedIndex<&'static str, &'static str> {
    let mut index = InvertedIndex::new(CombinePolicy::Combine);
    index.insert("d1", ["x", "y"]);
    index.insert("d2", ["x"]);
    index.insert("d3", ["y", "y"]);
    index
}

#[test]
fn it_counts_matching_terms() {
    let index = xy_index();
    let best = index.best_match(&["x", "y"], &match_count).unwrap();
    assert_eq!(best, Match { document_id: "d1", score: 2 });
}

#[test]
fn it_returns_all_matches_for_large_k() {
    let index = xy_index();
    let mut all = BTreeSet::new();
    index.matches(&["x", "y"], &match_count, |id, _| { all.insert(*id); }, 0);
    let mut top = BTreeSet::new();
    index.matches(&["x", "y"], &match_count, |id, _| { top.insert(*id); }, 10);
    assert_eq!(all, top);
    assert_eq!(all.len(), 3);
}

#[test]
fn it_visits_each_match_once_when_k_is_zero() {
    let index = xy_index();
    let mut seen = Vec::new();
    index.matches(&["x", "y", "x"], &match_count, |id, score| seen.push((*id, *score)), 0);
    assert_eq!(seen, vec![("d1", 3), ("d2", 2), ("d3", 1)]);
}

#[test]
fn it_breaks_top_k_ties_by_document_id() {
    let index = xy_index();
    let top = index.top_k(&["x", "y"], &match_count, 2);
    assert_eq!(top, vec![Match { document_id: "d1", score: 2 }, Match { document_id: "d2", score: 1 }]);
}

#[test]
fn it_answers_repeated_queries_identically() {
    let index = xy_index();
    let first = index.top_k(&["y", "x"], &match_count, 0);
    let second = index.top_k(&["y", "x"], &match_count, 0);
    assert_eq!(first, second);
    assert_eq!(index.index().num_postings(), 4);
}

#[test]
fn it_accepts_closure_scores() {
    let index = xy_index();
    let weight = |term: &&str| if *term == "y" { 10.0 } else { 1.0 };
    let score = |s: f64, term: &&str, _: &postlist_core::Posting<&str>, _: usize| s + weight(term);
    let best = index.best_match(&["x", "y"], &score).unwrap();
    assert_eq!(best, Match { document_id: "d1", score: 11.0 });
}

#[test]
fn it_merges_direct_postings_only_when_contiguous() {
    let mut index: InvertedIndex<&str, u32, TermFrequency> = InvertedIndex::new(CombinePolicy::Combine);
    index.insert_posting(&1, 0, "t");
    index.insert_posting(&1, 1, "t");
    index.insert_posting(&2, 0, "t");
    index.insert_posting(&1, 2, "t");
    let postings = index.index().postings(&"t");
    let ids: Vec<u32> = postings.iter().map(|p| p.document_id).collect();
    assert_eq!(ids, vec![1, 2, 1]);
    assert_eq!(postings[0].data, TermFrequency(2));
    assert_eq!(postings[2].data, TermFrequency(1));
}

#[test]
fn it_ranks_nan_scores_after_numbers() {
    let mut index: InvertedIndex<u32, u32> = InvertedIndex::default();
    for id in 0..200 {
        index.insert(id, [0]);
    }
    let score = |s: f64, _: &u32, p: &postlist_core::Posting<u32>, _: usize| {
        if p.document_id % 3 == 0 { f64::NAN } else { s + f64::from(p.document_id % 7) }
    };

    let top = index.top_k(&[0], &score, 150);
    assert_eq!(top.len(), 150);
    // 67 ids in 0..200 are multiples of 3.
    let (numbers, nans) = top.split_at(133);
    assert!(numbers.iter().all(|m| !m.score.is_nan()));
    assert!(numbers.windows(2).all(|w| w[0].score >= w[1].score));
    let nan_ids: Vec<u32> = nans.iter().map(|m| m.document_id).collect();
    assert_eq!(nan_ids, (0..17).map(|i| i * 3).collect::<Vec<_>>());
}
