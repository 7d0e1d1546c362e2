use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::posting::Posting;

/// A scored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match<D, S> {
    pub document_id: D,
    pub score: S,
}

/// Per-query map from document to running score.
///
/// Scores start at `S::default()` and are replaced by the scoring function on
/// every posting fed in through [`Accumulator::update`]. Documents that no
/// posting touched never appear.
pub struct Accumulator<'f, D, S, F> {
    scores: BTreeMap<D, S>,
    score: &'f F,
}

impl<'f, D, S, F> Accumulator<'f, D, S, F> {
    pub fn new(score: &'f F) -> Self {
        Self { scores: BTreeMap::new(), score }
    }

    /// Number of documents with a score.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl<'f, D, S, F> Accumulator<'f, D, S, F>
where
    D: Ord + Clone,
    S: Default,
{
    pub fn update<T, P>(&mut self, term: &T, posting: &Posting<D, P>, total_postings: usize)
    where
        F: Fn(S, &T, &Posting<D, P>, usize) -> S,
    {
        let slot = self.scores.entry(posting.document_id.clone()).or_default();
        let previous = std::mem::take(slot);
        *slot = (self.score)(previous, term, posting, total_postings);
    }
}

impl<'f, D: Ord, S, F> Accumulator<'f, D, S, F> {
    /// The highest-scoring document. Among equal scores the smallest document
    /// id wins.
    pub fn best_match(&self) -> Result<Match<D, S>>
    where
        D: Clone,
        S: PartialOrd + Clone,
    {
        let mut scores = self.scores.iter();
        let (mut best_id, mut best_score) = scores.next().ok_or(Error::EmptyResult)?;
        for (id, score) in scores {
            if score > best_score {
                best_id = id;
                best_score = score;
            }
        }
        Ok(Match { document_id: best_id.clone(), score: best_score.clone() })
    }

    /// Visit every scored document in ascending document id order.
    pub fn all_matches<V>(&self, mut visit: V)
    where
        V: FnMut(&D, &S),
    {
        for (id, score) in &self.scores {
            visit(id, score);
        }
    }

    /// Visit the `k` best documents, highest score first. Equal scores are
    /// visited in ascending document id order. Scores that do not compare
    /// with themselves (NaN) rank below every other score. `k == 0` visits
    /// everything in document id order, like [`Accumulator::all_matches`].
    pub fn top_k_matches<V>(&self, mut visit: V, k: usize)
    where
        V: FnMut(&D, &S),
        S: PartialOrd,
    {
        if k == 0 {
            return self.all_matches(visit);
        }

        let mut ranking: Vec<(&D, &S)> = self.scores.iter().collect();
        if k < ranking.len() {
            ranking.select_nth_unstable_by(k - 1, by_rank);
            ranking.truncate(k);
        }
        ranking.sort_unstable_by(by_rank);

        for (id, score) in ranking {
            visit(id, score);
        }
    }

    /// Owned form of [`Accumulator::top_k_matches`].
    pub fn ranked(&self, k: usize) -> Vec<Match<D, S>>
    where
        D: Clone,
        S: PartialOrd + Clone,
    {
        let mut out = Vec::with_capacity(if k == 0 { self.len() } else { k.min(self.len()) });
        self.top_k_matches(
            |id, score| out.push(Match { document_id: id.clone(), score: score.clone() }),
            k,
        );
        out
    }
}

/// Score descending, then document id ascending. Incomparable scores form
/// one bucket after all comparable ones so the order stays total.
fn by_rank<D: Ord, S: PartialOrd>(a: &(&D, &S), b: &(&D, &S)) -> Ordering {
    let comparable = |s: &S| s.partial_cmp(s).is_some();
    let by_score = match (comparable(a.1), comparable(b.1)) {
        (true, true) => b.1.partial_cmp(a.1).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    };
    by_score.then_with(|| a.0.cmp(b.0))
}
