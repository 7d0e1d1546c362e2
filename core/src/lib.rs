//! In-memory inverted index with pluggable posting payloads and scoring, and a
//! nearest-neighbor classifier built on it.

pub mod accumulator;
pub mod error;
pub mod index;
pub mod inverted_index;
pub mod knn;
pub mod posting;
pub mod scoring;

pub use accumulator::{Accumulator, Match};
pub use error::{Error, Result};
pub use index::{CombinePolicy, Index};
pub use inverted_index::InvertedIndex;
pub use knn::{majority_vote, Knn, LabelCounts};
pub use posting::{NoPostingData, Positions, Posting, PostingData, TermFrequency};
pub use scoring::{inverse_frequency, match_count};
