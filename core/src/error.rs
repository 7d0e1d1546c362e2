use thiserror::Error;

/// Errors returned by index queries and the classifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No document accumulated a score: none of the query terms are indexed.
    #[error("no matching documents")]
    EmptyResult,
}

pub type Result<T> = std::result::Result<T, Error>;
