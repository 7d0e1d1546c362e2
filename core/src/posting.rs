use serde::{Deserialize, Serialize};

/// Payload carried by every posting.
///
/// A payload is built from the first occurrence of a term in a document. When
/// the index combines postings, each further contiguous occurrence of the same
/// term in the same document is folded in through `update`.
pub trait PostingData<T, D> {
    fn new(document_id: &D, position: usize, term: &T) -> Self;

    /// Fold a repeated occurrence into this payload. Keeps only the first
    /// occurrence by default.
    fn update(&mut self, _document_id: &D, _position: usize, _term: &T) {}
}

/// The default payload: stores nothing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoPostingData;

impl<T, D> PostingData<T, D> for NoPostingData {
    fn new(_document_id: &D, _position: usize, _term: &T) -> Self {
        NoPostingData
    }
}

/// Number of occurrences folded into the posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermFrequency(pub u32);

impl<T, D> PostingData<T, D> for TermFrequency {
    fn new(_document_id: &D, _position: usize, _term: &T) -> Self {
        TermFrequency(1)
    }

    fn update(&mut self, _document_id: &D, _position: usize, _term: &T) {
        self.0 += 1;
    }
}

/// Every position folded into the posting, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Positions(pub Vec<usize>);

impl<T, D> PostingData<T, D> for Positions {
    fn new(_document_id: &D, position: usize, _term: &T) -> Self {
        Positions(vec![position])
    }

    fn update(&mut self, _document_id: &D, position: usize, _term: &T) {
        self.0.push(position);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting<D, P = NoPostingData> {
    pub document_id: D,
    pub data: P,
}

impl<D, P> Posting<D, P> {
    pub fn new<T>(document_id: D, position: usize, term: &T) -> Self
    where
        P: PostingData<T, D>,
    {
        let data = P::new(&document_id, position, term);
        Self { document_id, data }
    }

    pub fn document_id(&self) -> &D {
        &self.document_id
    }

    pub fn data(&self) -> &P {
        &self.data
    }

    pub(crate) fn update<T>(&mut self, position: usize, term: &T)
    where
        P: PostingData<T, D>,
    {
        self.data.update(&self.document_id, position, term);
    }
}
