use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use postlist_cli::{evaluate, generate, load_corpus, read_examples, search, write_examples, Scoring, SynthConfig};
use postlist_core::CombinePolicy;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "postlist")]
#[command(about = "Query an in-memory inverted index and run a nearest-neighbor classifier", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index pre-tokenized JSON/JSONL documents and run one query
    Search {
        /// Input path (file or directory)
        #[arg(long)]
        input: PathBuf,
        /// Whitespace-separated query terms
        #[arg(long)]
        query: String,
        /// Number of hits to return, 0 for all
        #[arg(long, default_value_t = 10)]
        k: usize,
        #[arg(long, value_enum, default_value_t = Policy::Combine)]
        policy: Policy,
        #[arg(long, value_enum, default_value_t = Scoring::Count)]
        scoring: Scoring,
    },
    /// Train on one CSV dataset and report accuracy on another
    Classify {
        #[arg(long)]
        train: PathBuf,
        #[arg(long)]
        test: PathBuf,
        /// Neighbors to vote over, 0 for all; 1 uses the single nearest neighbor
        #[arg(long, default_value_t = 1)]
        k: usize,
    },
    /// Write a synthetic labelled CSV dataset
    Synth {
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = 1000)]
        rows: usize,
        #[arg(long, default_value_t = 16)]
        features: usize,
        #[arg(long, default_value_t = 4)]
        values: i64,
        #[arg(long, default_value_t = 3)]
        labels: usize,
        #[arg(long, default_value_t = 0.2)]
        noise: f64,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    /// Fold repeated terms of one document into a single posting
    Combine,
    /// Keep one posting per occurrence
    Append,
}

impl From<Policy> for CombinePolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Combine => CombinePolicy::Combine,
            Policy::Append => CombinePolicy::Append,
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { input, query, k, policy, scoring } => {
            let corpus = load_corpus(&input, policy.into())?;
            let response = search(&corpus, &query, k, scoring);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Classify { train, test, k } => {
            let train_set = read_examples(&train)?;
            let test_set = read_examples(&test)?;
            let evaluation = evaluate(&train_set, &test_set, k);
            println!("{}", serde_json::to_string_pretty(&evaluation)?);
        }
        Commands::Synth { output, rows, features, values, labels, noise, seed } => {
            let examples = generate(&SynthConfig { rows, features, values, labels, noise, seed })?;
            write_examples(&output, &examples)?;
            tracing::info!(output = %output.display(), rows = examples.len(), "dataset written");
        }
    }
    Ok(())
}
