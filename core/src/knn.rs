//! Nearest-neighbor classification over discrete feature vectors.
//!
//! Each learned example becomes a document whose terms are the
//! `(position, value)` pairs of its feature vector. A query vector is scored
//! with [`match_count`], so similarity is the number of positions at which the
//! two vectors hold the same value.

use std::collections::BTreeMap;

use crate::accumulator::Match;
use crate::error::{Error, Result};
use crate::index::CombinePolicy;
use crate::inverted_index::InvertedIndex;
use crate::scoring::match_count;

/// Number of neighbors per label.
pub type LabelCounts<L> = BTreeMap<L, usize>;

#[derive(Debug, Clone)]
pub struct Knn<L, V = i64> {
    index: InvertedIndex<(usize, V), usize>,
    labels: Vec<L>,
}

impl<L, V> Default for Knn<L, V> {
    fn default() -> Self {
        // Positions are unique within a vector, so there is nothing to combine.
        Self { index: InvertedIndex::new(CombinePolicy::Append), labels: Vec::new() }
    }
}

impl<L, V: Ord> Knn<L, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of learned examples.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels indexed by example id.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Learn one example. Returns its id.
    pub fn learn<I>(&mut self, features: I, label: L) -> usize
    where
        I: IntoIterator<Item = V>,
    {
        self.labels.push(label);
        let id = self.labels.len() - 1;
        self.index.insert(id, features.into_iter().enumerate())
    }

    /// Label of the most similar example. Among equally similar examples the
    /// earliest learned wins.
    pub fn classify_1nn<I>(&self, features: I) -> Result<&L>
    where
        I: IntoIterator<Item = V>,
    {
        let terms: Vec<(usize, V)> = features.into_iter().enumerate().collect();
        let best = self.index.best_match(&terms, &match_count)?;
        Ok(&self.labels[best.document_id])
    }

    /// The `k` most similar examples, most similar first. Equally similar
    /// examples are ordered by id. `k == 0` returns every example sharing at
    /// least one feature, in id order.
    pub fn neighbors<I>(&self, features: I, k: usize) -> Vec<Match<usize, u32>>
    where
        I: IntoIterator<Item = V>,
    {
        let terms: Vec<(usize, V)> = features.into_iter().enumerate().collect();
        self.index.top_k(&terms, &match_count, k)
    }

    /// How many of the `k` nearest neighbors carry each label.
    pub fn label_counts<I>(&self, features: I, k: usize) -> LabelCounts<L>
    where
        I: IntoIterator<Item = V>,
        L: Ord + Clone,
    {
        let terms: Vec<(usize, V)> = features.into_iter().enumerate().collect();
        let mut counts = LabelCounts::new();
        self.index.matches(
            &terms,
            &match_count,
            |id, _| *counts.entry(self.labels[*id].clone()).or_insert(0) += 1,
            k,
        );
        tracing::debug!(k, labels = counts.len(), "tallied neighbor labels");
        counts
    }

    /// Classify from the labels of the `k` nearest neighbors using `combine`.
    ///
    /// Fails with [`Error::EmptyResult`] when no example shares a feature with
    /// the query, so `combine` always sees at least one label.
    pub fn classify_knn<I, C>(&self, features: I, k: usize, combine: C) -> Result<L>
    where
        I: IntoIterator<Item = V>,
        L: Ord + Clone,
        C: FnOnce(&LabelCounts<L>) -> L,
    {
        let counts = self.label_counts(features, k);
        if counts.is_empty() {
            return Err(Error::EmptyResult);
        }
        Ok(combine(&counts))
    }

    /// [`Knn::classify_knn`] with [`majority_vote`].
    pub fn classify_knn_majority<I>(&self, features: I, k: usize) -> Result<L>
    where
        I: IntoIterator<Item = V>,
        L: Ord + Clone,
    {
        self.classify_knn(features, k, majority_vote)
    }
}

/// The label with the most votes; ties go to the smallest label.
///
/// # Panics
///
/// Panics if `counts` is empty.
pub fn majority_vote<L: Clone>(counts: &LabelCounts<L>) -> L {
    let mut entries = counts.iter();
    let (mut best, mut best_count) = entries.next().expect("majority vote over empty tallies");
    for (label, count) in entries {
        if count > best_count {
            best = label;
            best_count = count;
        }
    }
    best.clone()
}
