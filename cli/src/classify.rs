use anyhow::{bail, Context, Result};
use postlist_core::{Error as IndexError, Knn};
use serde::Serialize;

use std::path::Path;

/// One labelled feature vector. On disk: a CSV row of integer features
/// followed by the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub features: Vec<i64>,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct Evaluation {
    pub train_examples: usize,
    pub test_examples: usize,
    pub k: usize,
    pub correct: usize,
    /// Test rows that share no feature with any training row.
    pub unmatched: usize,
    pub accuracy: f64,
}

pub fn read_examples(path: &Path) -> Result<Vec<Example>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut examples = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("{}: row {}", path.display(), row + 1))?;
        let fields: Vec<&str> = record.iter().collect();
        let Some((label, features)) = fields.split_last() else {
            continue;
        };
        if features.is_empty() {
            bail!("{}: row {} has a label but no features", path.display(), row + 1);
        }
        let features = features
            .iter()
            .map(|f| f.parse::<i64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .with_context(|| format!("{}: row {}: features must be integers", path.display(), row + 1))?;
        examples.push(Example { features, label: label.to_string() });
    }
    Ok(examples)
}

pub fn write_examples(path: &Path, examples: &[Example]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for example in examples {
        let mut row: Vec<String> = example.features.iter().map(i64::to_string).collect();
        row.push(example.label.clone());
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn train(examples: &[Example]) -> Knn<String> {
    let mut knn = Knn::new();
    for example in examples {
        knn.learn(example.features.iter().copied(), example.label.clone());
    }
    knn
}

/// Predict one label: nearest neighbor when `k == 1`, majority vote over the
/// `k` nearest otherwise (every matching example when `k == 0`).
pub fn predict(knn: &Knn<String>, features: &[i64], k: usize) -> postlist_core::Result<String> {
    if k == 1 {
        knn.classify_1nn(features.iter().copied()).cloned()
    } else {
        knn.classify_knn_majority(features.iter().copied(), k)
    }
}

pub fn evaluate(train_set: &[Example], test_set: &[Example], k: usize) -> Evaluation {
    let knn = train(train_set);
    let mut correct = 0;
    let mut unmatched = 0;
    for example in test_set {
        match predict(&knn, &example.features, k) {
            Ok(label) if label == example.label => correct += 1,
            Ok(_) => {}
            Err(IndexError::EmptyResult) => unmatched += 1,
        }
    }
    let accuracy = if test_set.is_empty() { 0.0 } else { correct as f64 / test_set.len() as f64 };
    tracing::info!(correct, unmatched, accuracy, "evaluated classifier");
    Evaluation {
        train_examples: train_set.len(),
        test_examples: test_set.len(),
        k,
        correct,
        unmatched,
        accuracy,
    }
}
