//! Command line interface for spam-rs
//!
//! # Usage
//!
//! ```bash
//! # Train a model and save it
//! spam-rs train data/train --model model/nb.json
//!
//! # Add more labeled mail to the saved model
//! spam-rs extend data/extra --model model/nb.json
//!
//! # Write !prediction.txt for a directory of emails
//! spam-rs test data/test --model model/nb.json
//!
//! # Score an existing !prediction.txt against !truth.txt
//! spam-rs quality data/test
//!
//! # Compare all filters
//! spam-rs evaluate data/train data/test
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use spam_rs::config::{Config, LoggingConfig};
use spam_rs::corpus::TrainingCorpus;
use spam_rs::filters::{run_test, BayesFilter, NaiveFilter, ParanoidFilter, RandomFilter, SpamFilter};
use spam_rs::quality::{compute_quality_for_corpus, compute_quality_for_filters};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "spam-rs")]
#[command(about = "Naive Bayes spam filter", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model on a labeled corpus and save it
    Train {
        /// Directory with emails and !truth.txt
        corpus: PathBuf,
        /// Model file, overrides filter.model_location
        #[arg(short, long)]
        model: Option<PathBuf>,
    },
    /// Extend a saved model with another labeled corpus
    Extend {
        corpus: PathBuf,
        #[arg(short, long)]
        model: Option<PathBuf>,
    },
    /// Classify a corpus and write !prediction.txt
    Test {
        corpus: PathBuf,
        #[arg(short, long)]
        model: Option<PathBuf>,
    },
    /// Score !prediction.txt against !truth.txt
    Quality { corpus: PathBuf },
    /// Train and test every filter, then print their quality
    Evaluate {
        train: PathBuf,
        test: PathBuf,
        /// Seed for the random baseline
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = if cli.config.exists() {
        Config::from_file(&cli.config)
            .with_context(|| format!("failed to load {}", cli.config.display()))?
    } else {
        Config::default()
    };

    init_logging(&config.logging);
    info!("Starting spam-rs v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Train { corpus, model } => {
            let mut filter = bayes_filter(&config, model);
            filter.train(&TrainingCorpus::new(&corpus)?)?;
            filter.save_model()?;
            println!("✓ Model trained on {}", corpus.display());
        }
        Commands::Extend { corpus, model } => {
            let mut filter = bayes_filter(&config, model);
            filter.load_model()?;
            filter.extend(&TrainingCorpus::new(&corpus)?)?;
            filter.save_model()?;
            println!("✓ Model extended with {}", corpus.display());
        }
        Commands::Test { corpus, model } => {
            let mut filter = bayes_filter(&config, model);
            let predictions = run_test(&mut filter, &corpus)?;
            println!("✓ Classified {} emails in {}", predictions.len(), corpus.display());
        }
        Commands::Quality { corpus } => {
            let quality = compute_quality_for_corpus(&corpus)?;
            println!("Quality: {:.4}", quality);
        }
        Commands::Evaluate { train, test, seed } => {
            evaluate(&config, &train, &test, seed)?;
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("spam_rs={}", logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        "compact" => registry.with(tracing_subscriber::fmt::layer().compact()).init(),
        _ => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
    }
}

fn bayes_filter(config: &Config, model: Option<PathBuf>) -> BayesFilter {
    let mut filter_config = config.filter.clone();
    if model.is_some() {
        filter_config.model_location = model;
    }
    BayesFilter::new(&filter_config)
}

fn evaluate(config: &Config, train: &Path, test: &Path, seed: Option<u64>) -> anyhow::Result<()> {
    // Evaluation trains from scratch; never touch a saved model
    let mut bayes_config = config.filter.clone();
    bayes_config.model_location = None;

    let random = match seed {
        Some(seed) => RandomFilter::with_seed(seed),
        None => RandomFilter::new(),
    };

    let mut filters: Vec<Box<dyn SpamFilter>> = vec![
        Box::new(NaiveFilter),
        Box::new(ParanoidFilter),
        Box::new(random),
        Box::new(BayesFilter::new(&bayes_config)),
    ];

    let qualities = compute_quality_for_filters(train, test, &mut filters)?;

    println!("{:<20} {:>10}", "Filter", "Quality");
    println!("{:-<31}", "");
    for (name, quality) in &qualities {
        println!("{:<20} {:>10.4}", name, quality);
    }

    Ok(())
}
