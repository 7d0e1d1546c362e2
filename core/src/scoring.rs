//! Scoring functions.
//!
//! A scoring function has the shape
//! `Fn(previous: S, term: &T, posting: &Posting<D, P>, total_postings: usize) -> S`
//! and is applied once per matched posting. `total_postings` is the length of
//! the term's posting list, which is enough to derive rarity weights.

use crate::posting::Posting;

/// Counts matched postings. With combined postings this is the number of
/// distinct query terms a document contains.
pub fn match_count<T, D, P>(score: u32, _term: &T, _posting: &Posting<D, P>, _total_postings: usize) -> u32 {
    score + 1
}

/// Adds `1 / total_postings` per matched posting so rare terms weigh more.
pub fn inverse_frequency<T, D, P>(score: f64, _term: &T, _posting: &Posting<D, P>, total_postings: usize) -> f64 {
    score + 1.0 / total_postings.max(1) as f64
}
