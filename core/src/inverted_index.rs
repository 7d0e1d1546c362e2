use crate::accumulator::{Accumulator, Match};
use crate::error::Result;
use crate::index::{CombinePolicy, Index};
use crate::posting::{NoPostingData, Posting, PostingData};

/// An [`Index`] plus the query entry points that score documents against a
/// sequence of terms.
///
/// Every query builds its own [`Accumulator`]; querying never mutates the
/// index, so the same query always yields the same result.
#[derive(Debug, Clone)]
pub struct InvertedIndex<T, D, P = NoPostingData> {
    index: Index<T, D, P>,
}

impl<T, D, P> Default for InvertedIndex<T, D, P> {
    fn default() -> Self {
        Self::new(CombinePolicy::default())
    }
}

impl<T, D, P> InvertedIndex<T, D, P> {
    pub fn new(policy: CombinePolicy) -> Self {
        Self { index: Index::new(policy) }
    }

    pub fn index(&self) -> &Index<T, D, P> {
        &self.index
    }
}

impl<T, D, P> InvertedIndex<T, D, P>
where
    T: Ord,
    D: PartialEq + Clone,
    P: PostingData<T, D>,
{
    pub fn insert_posting(&mut self, document_id: &D, position: usize, term: T) {
        self.index.insert_posting(document_id, position, term);
    }

    /// Index a document given as its term sequence. Returns `document_id`.
    pub fn insert<I>(&mut self, document_id: D, terms: I) -> D
    where
        I: IntoIterator<Item = T>,
    {
        self.index.insert(document_id, terms)
    }
}

impl<T: Ord, D: Ord + Clone, P> InvertedIndex<T, D, P> {
    /// Run `query` through a fresh accumulator.
    pub fn accumulate<'q, 'f, Q, S, F>(&self, query: Q, score: &'f F) -> Accumulator<'f, D, S, F>
    where
        T: 'q,
        Q: IntoIterator<Item = &'q T>,
        S: Default,
        F: Fn(S, &T, &Posting<D, P>, usize) -> S,
    {
        let mut accumulator = Accumulator::new(score);
        let mut terms = 0usize;
        for term in query {
            self.index.match_term(term, &mut accumulator);
            terms += 1;
        }
        tracing::debug!(terms, matched = accumulator.len(), "accumulated query");
        accumulator
    }

    /// The single best document for `query`.
    ///
    /// Fails with [`crate::Error::EmptyResult`] when no query term is indexed.
    pub fn best_match<'q, Q, S, F>(&self, query: Q, score: &F) -> Result<Match<D, S>>
    where
        T: 'q,
        Q: IntoIterator<Item = &'q T>,
        S: Default + PartialOrd + Clone,
        F: Fn(S, &T, &Posting<D, P>, usize) -> S,
    {
        self.accumulate(query, score).best_match()
    }

    /// Visit the `k` best documents for `query`, highest score first, or every
    /// matched document in id order when `k == 0`.
    pub fn matches<'q, Q, S, F, V>(&self, query: Q, score: &F, visit: V, k: usize)
    where
        T: 'q,
        Q: IntoIterator<Item = &'q T>,
        S: Default + PartialOrd,
        F: Fn(S, &T, &Posting<D, P>, usize) -> S,
        V: FnMut(&D, &S),
    {
        self.accumulate(query, score).top_k_matches(visit, k);
    }

    /// Collecting form of [`InvertedIndex::matches`].
    pub fn top_k<'q, Q, S, F>(&self, query: Q, score: &F, k: usize) -> Vec<Match<D, S>>
    where
        T: 'q,
        Q: IntoIterator<Item = &'q T>,
        S: Default + PartialOrd + Clone,
        F: Fn(S, &T, &Posting<D, P>, usize) -> S,
    {
        self.accumulate(query, score).ranked(k)
    }
}
