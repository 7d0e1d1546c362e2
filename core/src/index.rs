use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::accumulator::Accumulator;
use crate::posting::{NoPostingData, Posting, PostingData};

/// How repeated occurrences of a term within one document are stored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombinePolicy {
    /// Fold an occurrence into the last posting of the list when that posting
    /// belongs to the same document.
    #[default]
    Combine,
    /// Every occurrence gets its own posting.
    Append,
}

/// Term → posting list. Lists are append-only and kept in insertion order.
#[derive(Debug, Clone)]
pub struct Index<T, D, P = NoPostingData> {
    terms: BTreeMap<T, Vec<Posting<D, P>>>,
    policy: CombinePolicy,
    num_postings: usize,
}

impl<T, D, P> Default for Index<T, D, P> {
    fn default() -> Self {
        Self::new(CombinePolicy::default())
    }
}

impl<T, D, P> Index<T, D, P> {
    pub fn new(policy: CombinePolicy) -> Self {
        Self { terms: BTreeMap::new(), policy, num_postings: 0 }
    }

    pub fn policy(&self) -> CombinePolicy {
        self.policy
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    pub fn num_postings(&self) -> usize {
        self.num_postings
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<T, D, P> Index<T, D, P>
where
    T: Ord,
    D: PartialEq + Clone,
    P: PostingData<T, D>,
{
    /// Record one occurrence of `term` at `position` in `document_id`.
    pub fn insert_posting(&mut self, document_id: &D, position: usize, term: T) {
        match self.policy {
            CombinePolicy::Combine => self.insert_combined(document_id, position, term),
            CombinePolicy::Append => self.insert_appended(document_id, position, term),
        }
    }

    /// Insert a whole document; positions are the offsets in `terms`.
    ///
    /// Contiguous occurrences of a term are only combined within one call, so
    /// a document should be submitted as a single sequence.
    pub fn insert<I>(&mut self, document_id: D, terms: I) -> D
    where
        I: IntoIterator<Item = T>,
    {
        let mut count = 0usize;
        for (position, term) in terms.into_iter().enumerate() {
            self.insert_posting(&document_id, position, term);
            count += 1;
        }
        tracing::trace!(terms = count, postings = self.num_postings, "inserted document");
        document_id
    }

    fn insert_appended(&mut self, document_id: &D, position: usize, term: T) {
        let posting = Posting::new(document_id.clone(), position, &term);
        self.terms.entry(term).or_default().push(posting);
        self.num_postings += 1;
    }

    fn insert_combined(&mut self, document_id: &D, position: usize, term: T) {
        if let Some(postings) = self.terms.get_mut(&term) {
            match postings.last_mut() {
                Some(last) if last.document_id == *document_id => last.update(position, &term),
                _ => {
                    postings.push(Posting::new(document_id.clone(), position, &term));
                    self.num_postings += 1;
                }
            }
        } else {
            self.insert_appended(document_id, position, term);
        }
    }
}

impl<T: Ord, D, P> Index<T, D, P> {
    /// Postings for `term` in insertion order; empty when the term is unknown.
    pub fn postings(&self, term: &T) -> &[Posting<D, P>] {
        self.terms.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_term(&self, term: &T) -> bool {
        self.terms.contains_key(term)
    }

    /// Feed every posting of `term` into `accumulator`, in list order, along
    /// with the list length. Unknown terms contribute nothing.
    pub fn match_term<S, F>(&self, term: &T, accumulator: &mut Accumulator<'_, D, S, F>)
    where
        D: Ord + Clone,
        S: Default,
        F: Fn(S, &T, &Posting<D, P>, usize) -> S,
    {
        if let Some((key, postings)) = self.terms.get_key_value(term) {
            for posting in postings {
                accumulator.update(key, posting, postings.len());
            }
        }
    }
}
