//! spam-rs: Naive Bayes email spam filter
//!
//! Classifies emails as ham (legitimate) or spam with a Naive Bayes model
//! trained on a labeled corpus, and measures filter quality against simple
//! baselines.
//!
//! # Features
//!
//! - **Tokenizer**: deterministic normalization with placeholders for URLs,
//!   addresses, numbers and currencies, stop-word removal and light stemming
//! - **Model**: top-K vocabulary per class, Laplace smoothing, log-space scoring
//! - **Extension**: grow an existing model with new data, lossy by default or
//!   exact when training counts are preserved
//! - **Evaluation**: confusion matrix and a quality score that punishes false
//!   positives
//!
//! # Example
//!
//! ```no_run
//! use spam_rs::config::Config;
//! use spam_rs::corpus::TrainingCorpus;
//! use spam_rs::filters::{run_test, BayesFilter, SpamFilter};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let mut filter = BayesFilter::new(&config.filter);
//!
//!     filter.train(&TrainingCorpus::new("data/train")?)?;
//!     run_test(&mut filter, "data/test")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`bayes`]: model building, classification and extension
//! - [`config`]: configuration management
//! - [`corpus`]: email directories and truth/prediction files
//! - [`error`]: error types and handling
//! - [`filters`]: the filter trait and its variants
//! - [`mime`]: email body extraction
//! - [`quality`]: confusion matrix and quality score
//! - [`storage`]: model persistence
//! - [`tokenizer`]: text normalization

pub mod bayes;
pub mod config;
pub mod corpus;
pub mod error;
pub mod filters;
pub mod mime;
pub mod quality;
pub mod storage;
pub mod tokenizer;

// Re-export commonly used types
pub use bayes::{Label, Model, ModelBuilder};
pub use config::Config;
pub use error::{FilterError, Result};
