//! Command-line driver for `postlist-core`: search pre-tokenized documents,
//! evaluate the nearest-neighbor classifier on CSV datasets, and generate
//! synthetic datasets to evaluate it on.

pub mod classify;
pub mod search;
pub mod synth;

pub use classify::{evaluate, read_examples, write_examples, Evaluation, Example};
pub use search::{load_corpus, search, Corpus, InputDoc, Scoring, SearchHit, SearchResponse};
pub use synth::{generate, SynthConfig};
