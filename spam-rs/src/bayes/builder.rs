//! Model construction with Laplace smoothing

use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

use super::types::{FrequencyTable, Model, TrainingCounts};
use crate::config::{FilterConfig, DEFAULT_MAX_TOKENS};
use crate::error::{FilterError, Result};
use crate::tokenizer::Token;

/// Builds smoothed models from per-class token frequencies
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    max_tokens: usize,
    preserve_counts: bool,
}

impl ModelBuilder {
    pub fn new(max_tokens: usize) -> Self {
        Self {
            max_tokens,
            preserve_counts: false,
        }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(config.max_tokens).with_preserved_counts(config.preserve_counts)
    }

    /// Keep exact training counts inside built models
    pub fn with_preserved_counts(mut self, preserve: bool) -> Self {
        self.preserve_counts = preserve;
        self
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Build a model from ham/spam frequencies and email counts.
    ///
    /// Fails with [`FilterError::EmptyTrainingSet`] when both email counts are zero.
    pub fn build(
        &self,
        ham: &FrequencyTable,
        spam: &FrequencyTable,
        ham_count: u64,
        spam_count: u64,
    ) -> Result<Model> {
        let total_emails = ham_count + spam_count;
        if total_emails == 0 {
            return Err(FilterError::EmptyTrainingSet);
        }

        let prior_ham = ham_count as f64 / total_emails as f64;
        let prior_spam = 1.0 - prior_ham;

        let vocabulary: BTreeSet<Token> = ham
            .most_common(self.max_tokens)
            .into_iter()
            .chain(spam.most_common(self.max_tokens))
            .map(|(token, _)| token.to_string())
            .collect();

        let total_ham_tokens = vocabulary_total(ham, &vocabulary);
        let total_spam_tokens = vocabulary_total(spam, &vocabulary);

        let ham_probs = smoothed_probabilities(ham, &vocabulary, total_ham_tokens);
        let spam_probs = smoothed_probabilities(spam, &vocabulary, total_spam_tokens);

        debug!(
            total_ham_tokens,
            total_spam_tokens, "Computed vocabulary token totals"
        );
        info!(
            "Built model from {} ham / {} spam emails, vocabulary size {}",
            ham_count,
            spam_count,
            vocabulary.len()
        );

        let counts = self.preserve_counts.then(|| TrainingCounts {
            ham: ham.clone(),
            spam: spam.clone(),
            ham_emails: ham_count,
            spam_emails: spam_count,
        });

        Ok(Model {
            prior_ham,
            prior_spam,
            ham_probs,
            spam_probs,
            vocabulary,
            total_ham_tokens,
            total_spam_tokens,
            counts,
        })
    }

    /// Build a model from accumulated training counts
    pub fn build_from(&self, counts: &TrainingCounts) -> Result<Model> {
        self.build(&counts.ham, &counts.spam, counts.ham_emails, counts.spam_emails)
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS)
    }
}

/// Sum of a class's counts over the vocabulary; absent tokens count as zero
fn vocabulary_total(table: &FrequencyTable, vocabulary: &BTreeSet<Token>) -> f64 {
    vocabulary.iter().map(|token| table.get(token)).sum()
}

/// Add-one smoothed probability of every vocabulary token
fn smoothed_probabilities(
    table: &FrequencyTable,
    vocabulary: &BTreeSet<Token>,
    total_tokens: f64,
) -> HashMap<Token, f64> {
    let denominator = total_tokens + vocabulary.len() as f64;

    vocabulary
        .iter()
        .map(|token| (token.clone(), (table.get(token) + 1.0) / denominator))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bayes::Label;

    fn table(entries: &[(&str, f64)]) -> FrequencyTable {
        entries.iter().map(|&(t, c)| (t, c)).collect()
    }

    #[test]
    fn test_empty_training_set_rejected() {
        let builder = ModelBuilder::default();
        let result = builder.build(&FrequencyTable::new(), &FrequencyTable::new(), 0, 0);
        assert!(matches!(result, Err(FilterError::EmptyTrainingSet)));
    }

    #[test]
    fn test_priors() {
        let builder = ModelBuilder::default();
        let model = builder
            .build(&table(&[("a", 1.0)]), &table(&[("b", 1.0)]), 3, 1)
            .unwrap();

        assert_eq!(model.prior(Label::Ham), 0.75);
        assert_eq!(model.prior(Label::Spam), 0.25);
        assert_eq!(model.prior(Label::Ham) + model.prior(Label::Spam), 1.0);
    }

    #[test]
    fn test_reference_model() {
        let builder = ModelBuilder::new(10);
        let ham = table(&[("free", 1.0), ("win", 0.0)]);
        let spam = table(&[("free", 0.0), ("win", 2.0)]);
        let model = builder.build(&ham, &spam, 2, 2).unwrap();

        assert_eq!(model.prior(Label::Ham), 0.5);
        assert_eq!(model.prior(Label::Spam), 0.5);

        let vocabulary: Vec<&str> = model.vocabulary().iter().map(String::as_str).collect();
        assert_eq!(vocabulary, vec!["free", "win"]);

        assert_eq!(model.total_tokens(Label::Ham), 1.0);
        assert_eq!(model.total_tokens(Label::Spam), 2.0);

        // (count + 1) / (total + |V|)
        assert!((model.probability(Label::Ham, "free").unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert!((model.probability(Label::Ham, "win").unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert!((model.probability(Label::Spam, "free").unwrap() - 1.0 / 4.0).abs() < 1e-12);
        assert!((model.probability(Label::Spam, "win").unwrap() - 3.0 / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_tables_share_vocabulary() {
        let builder = ModelBuilder::default();
        let ham = table(&[("meeting", 4.0), ("agenda", 2.0)]);
        let spam = table(&[("viagra", 5.0), ("lottery", 1.0)]);
        let model = builder.build(&ham, &spam, 2, 2).unwrap();

        assert_eq!(model.vocabulary().len(), 4);
        for token in ["meeting", "agenda", "viagra", "lottery"] {
            assert!(model.contains(token));
            for label in [Label::Ham, Label::Spam] {
                let p = model.probability(label, token).unwrap();
                assert!(p > 0.0 && p < 1.0, "{label} {token} = {p}");
            }
        }
    }

    #[test]
    fn test_probability_tables_cover_vocabulary() {
        let builder = ModelBuilder::new(2);
        let ham = table(&[("a", 9.0), ("b", 8.0), ("c", 1.0)]);
        let spam = table(&[("x", 7.0), ("b", 6.0), ("y", 1.0)]);
        let model = builder.build(&ham, &spam, 5, 5).unwrap();

        let expected: BTreeSet<Token> =
            ["a", "b", "x"].iter().map(|t| t.to_string()).collect();
        assert_eq!(model.vocabulary(), &expected);

        for label in [Label::Ham, Label::Spam] {
            let keys: BTreeSet<Token> = model.probabilities(label).keys().cloned().collect();
            assert_eq!(keys, expected);
        }
    }

    #[test]
    fn test_unseen_class_token_is_smoothed() {
        let builder = ModelBuilder::default();
        let ham = table(&[("invoice", 1.0)]);
        let spam = table(&[("jackpot", 1000.0)]);
        let model = builder.build(&ham, &spam, 1, 1).unwrap();

        let p = model.probability(Label::Ham, "jackpot").unwrap();
        assert!(p > 0.0);
        assert!((p - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_vocabulary_cutoff_is_deterministic() {
        let builder = ModelBuilder::new(2);
        let ham = table(&[("pear", 3.0), ("apple", 3.0), ("fig", 3.0)]);
        let model = builder.build(&ham, &FrequencyTable::new(), 1, 0).unwrap();

        let vocabulary: Vec<&str> = model.vocabulary().iter().map(String::as_str).collect();
        assert_eq!(vocabulary, vec!["apple", "fig"]);
    }

    #[test]
    fn test_preserved_counts() {
        let ham = table(&[("a", 2.0)]);
        let spam = table(&[("b", 1.0)]);

        let lossy = ModelBuilder::default().build(&ham, &spam, 1, 1).unwrap();
        assert!(lossy.counts().is_none());

        let exact = ModelBuilder::default()
            .with_preserved_counts(true)
            .build(&ham, &spam, 1, 1)
            .unwrap();
        let counts = exact.counts().unwrap();
        assert_eq!(counts.ham, ham);
        assert_eq!(counts.spam_emails, 1);
    }
}
