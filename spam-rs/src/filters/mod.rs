//! Spam filter variants
//!
//! Every filter trains on a labeled corpus and predicts a label for each
//! email of another corpus. Each variant owns its own state.

pub mod bayes;
pub mod simple;

use std::path::Path;
use tracing::info;

use crate::corpus::{write_classification_to_file, Corpus, Predictions, TrainingCorpus, PREDICTION_FILENAME};
use crate::error::Result;

pub use self::bayes::{count_tokens, tokenize_email, BayesFilter};
pub use simple::{NaiveFilter, ParanoidFilter, RandomFilter};

/// Spam filter trait
pub trait SpamFilter {
    /// Name used in reports
    fn name(&self) -> &str;

    /// Learn from a labeled corpus
    fn train(&mut self, corpus: &TrainingCorpus) -> Result<()>;

    /// Predict a label for every email of a corpus
    fn predict(&mut self, corpus: &Corpus) -> Result<Predictions>;
}

/// Predict every email in `dir` and write the result to its prediction file
pub fn run_test<P: AsRef<Path>>(filter: &mut dyn SpamFilter, dir: P) -> Result<Predictions> {
    let corpus = Corpus::new(dir)?;
    let predictions = filter.predict(&corpus)?;

    let prediction_path = corpus.path().join(PREDICTION_FILENAME);
    write_classification_to_file(&prediction_path, &predictions)?;

    info!(
        "{} classified {} emails into {}",
        filter.name(),
        predictions.len(),
        prediction_path.display()
    );

    Ok(predictions)
}
