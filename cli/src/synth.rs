use anyhow::{ensure, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::classify::Example;

/// Parameters for a synthetic labelled dataset.
#[derive(Debug, Clone)]
pub struct SynthConfig {
    pub rows: usize,
    pub features: usize,
    /// Feature values are drawn from `0..values`.
    pub values: i64,
    pub labels: usize,
    /// Probability that a feature is redrawn instead of copied from the
    /// label's prototype.
    pub noise: f64,
    pub seed: u64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self { rows: 1000, features: 16, values: 4, labels: 3, noise: 0.2, seed: 42 }
    }
}

/// Draw one prototype vector per label, then emit `rows` noisy copies.
/// Labels are assigned round-robin (`label0`, `label1`, …).
pub fn generate(config: &SynthConfig) -> Result<Vec<Example>> {
    ensure!(config.labels > 0, "need at least one label");
    ensure!(config.features > 0, "need at least one feature");
    ensure!(config.values > 0, "need at least one feature value");
    ensure!((0.0..=1.0).contains(&config.noise), "noise must be within [0, 1], got {}", config.noise);

    let mut rng = StdRng::seed_from_u64(config.seed);
    let prototypes: Vec<Vec<i64>> = (0..config.labels)
        .map(|_| (0..config.features).map(|_| rng.random_range(0..config.values)).collect())
        .collect();

    let examples = (0..config.rows)
        .map(|row| {
            let label = row % config.labels;
            let features = prototypes[label]
                .iter()
                .map(|&v| if rng.random_bool(config.noise) { rng.random_range(0..config.values) } else { v })
                .collect();
            Example { features, label: format!("label{label}") }
        })
        .collect();
    tracing::debug!(rows = config.rows, labels = config.labels, "generated dataset");
    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_data() {
        let config = SynthConfig { rows: 20, ..SynthConfig::default() };
        assert_eq!(generate(&config).unwrap(), generate(&config).unwrap());
    }

    #[test]
    fn rows_cycle_through_labels() {
        let config = SynthConfig { rows: 5, labels: 2, ..SynthConfig::default() };
        let labels: Vec<String> = generate(&config).unwrap().into_iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["label0", "label1", "label0", "label1", "label0"]);
    }

    #[test]
    fn values_stay_in_range() {
        let config = SynthConfig { rows: 50, values: 3, noise: 1.0, ..SynthConfig::default() };
        for example in generate(&config).unwrap() {
            assert_eq!(example.features.len(), config.features);
            assert!(example.features.iter().all(|v| (0..3).contains(v)));
        }
    }

    #[test]
    fn rejects_bad_noise() {
        let config = SynthConfig { noise: 1.5, ..SynthConfig::default() };
        assert!(generate(&config).is_err());
    }
}
