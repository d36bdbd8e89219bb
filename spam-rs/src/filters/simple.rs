//! Baseline filters that ignore email content

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::SpamFilter;
use crate::bayes::Label;
use crate::corpus::{Corpus, Predictions, TrainingCorpus};
use crate::error::Result;

fn predict_constant(corpus: &Corpus, label: Label) -> Result<Predictions> {
    Ok(corpus
        .email_names()?
        .into_iter()
        .map(|name| (name, label))
        .collect())
}

/// Always predicts HAM
#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveFilter;

impl SpamFilter for NaiveFilter {
    fn name(&self) -> &str {
        "NaiveFilter"
    }

    fn train(&mut self, _corpus: &TrainingCorpus) -> Result<()> {
        Ok(())
    }

    fn predict(&mut self, corpus: &Corpus) -> Result<Predictions> {
        predict_constant(corpus, Label::Ham)
    }
}

/// Always predicts SPAM
#[derive(Debug, Default, Clone, Copy)]
pub struct ParanoidFilter;

impl SpamFilter for ParanoidFilter {
    fn name(&self) -> &str {
        "ParanoidFilter"
    }

    fn train(&mut self, _corpus: &TrainingCorpus) -> Result<()> {
        Ok(())
    }

    fn predict(&mut self, corpus: &Corpus) -> Result<Predictions> {
        predict_constant(corpus, Label::Spam)
    }
}

/// Picks HAM or SPAM uniformly at random for each email
#[derive(Debug, Clone)]
pub struct RandomFilter {
    rng: StdRng,
}

impl RandomFilter {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible predictions for a given seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl SpamFilter for RandomFilter {
    fn name(&self) -> &str {
        "RandomFilter"
    }

    fn train(&mut self, _corpus: &TrainingCorpus) -> Result<()> {
        Ok(())
    }

    fn predict(&mut self, corpus: &Corpus) -> Result<Predictions> {
        let mut predictions = Predictions::new();
        for name in corpus.email_names()? {
            let label = if self.rng.gen_bool(0.5) {
                Label::Ham
            } else {
                Label::Spam
            };
            predictions.insert(name, label);
        }
        Ok(predictions)
    }
}
