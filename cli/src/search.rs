use anyhow::{Context, Result};
use clap::ValueEnum;
use postlist_core::{inverse_frequency, match_count, CombinePolicy, InvertedIndex, Posting};
use serde::{Deserialize, Serialize};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub type DocId = u32;

/// A document that has already been split into terms.
#[derive(Debug, Deserialize)]
pub struct InputDoc {
    pub id: String,
    pub terms: Vec<String>,
}

/// Documents loaded into an index, with their external ids by `DocId`.
pub struct Corpus {
    pub index: InvertedIndex<String, DocId>,
    pub external_ids: Vec<String>,
}

impl Corpus {
    pub fn new(policy: CombinePolicy) -> Self {
        Self { index: InvertedIndex::new(policy), external_ids: Vec::new() }
    }

    pub fn num_docs(&self) -> usize {
        self.external_ids.len()
    }

    pub fn add(&mut self, doc: InputDoc) -> Result<DocId> {
        let doc_id = DocId::try_from(self.external_ids.len())
            .with_context(|| format!("too many documents, cannot add {}", doc.id))?;
        self.external_ids.push(doc.id);
        Ok(self.index.insert(doc_id, doc.terms))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scoring {
    /// Number of query terms the document contains
    Count,
    /// Sum of 1 / posting-list length over matched terms
    Inverse,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub id: String,
    pub score: f64,
}

/// JSON and JSONL files under `input`, or `input` itself when it is a file.
pub fn collect_input_files(input: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

pub fn load_corpus(input: &Path, policy: CombinePolicy) -> Result<Corpus> {
    let mut corpus = Corpus::new(policy);
    for file in collect_input_files(input) {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            ingest_jsonl(&file, &mut corpus)?;
        } else {
            ingest_json(&file, &mut corpus)?;
        }
    }
    tracing::info!(
        num_docs = corpus.num_docs(),
        num_terms = corpus.index.index().num_terms(),
        num_postings = corpus.index.index().num_postings(),
        "loaded corpus"
    );
    Ok(corpus)
}

fn ingest_jsonl(file: &Path, corpus: &mut Corpus) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid document", file.display(), line_no + 1))?;
        corpus.add(doc)?;
    }
    Ok(())
}

fn ingest_json(file: &Path, corpus: &mut Corpus) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    let json: serde_json::Value =
        serde_json::from_reader(reader).with_context(|| format!("{}: invalid JSON", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for (n, v) in arr.into_iter().enumerate() {
                let doc = serde_json::from_value(v)
                    .with_context(|| format!("{}: element {}: invalid document", file.display(), n))?;
                corpus.add(doc)?;
            }
        }
        serde_json::Value::Object(_) => {
            let doc = serde_json::from_value(json)
                .with_context(|| format!("{}: invalid document", file.display()))?;
            corpus.add(doc)?;
        }
        _ => tracing::warn!(file = %file.display(), "skipping file without documents"),
    }
    Ok(())
}

/// Score every document against the whitespace-separated terms of `query`
/// and keep the `k` best (all of them when `k == 0`).
pub fn search(corpus: &Corpus, query: &str, k: usize, scoring: Scoring) -> SearchResponse {
    let start = std::time::Instant::now();
    let terms: Vec<String> = query.split_whitespace().map(str::to_string).collect();

    let (total_hits, ranked) = match scoring {
        Scoring::Count => rank(corpus, &terms, &match_count, k, |s: u32| f64::from(s)),
        Scoring::Inverse => rank(corpus, &terms, &inverse_frequency, k, |s: f64| s),
    };
    let results = ranked
        .into_iter()
        .map(|(doc_id, score)| SearchHit { doc_id, id: corpus.external_ids[doc_id as usize].clone(), score })
        .collect();

    let elapsed = start.elapsed();
    tracing::debug!(total_hits, took_s = elapsed.as_secs_f64(), "search complete");
    SearchResponse { query: query.to_string(), took_s: elapsed.as_secs_f64(), total_hits, results }
}

fn rank<S, F, C>(corpus: &Corpus, terms: &[String], score: &F, k: usize, to_f64: C) -> (usize, Vec<(DocId, f64)>)
where
    S: Default + PartialOrd + Clone,
    F: Fn(S, &String, &Posting<DocId>, usize) -> S,
    C: Fn(S) -> f64,
{
    let accumulator = corpus.index.accumulate(terms, score);
    let ranked = accumulator.ranked(k).into_iter().map(|m| (m.document_id, to_f64(m.score))).collect();
    (accumulator.len(), ranked)
}
