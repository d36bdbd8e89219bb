//! Bayes model types and data structures

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;
use crate::tokenizer::Token;

/// Wire tag for legitimate mail
pub const HAM_TAG: &str = "OK";
/// Wire tag for spam
pub const SPAM_TAG: &str = "SPAM";

/// Classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "OK")]
    Ham,
    #[serde(rename = "SPAM")]
    Spam,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Ham => HAM_TAG,
            Label::Spam => SPAM_TAG,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            HAM_TAG => Ok(Label::Ham),
            SPAM_TAG => Ok(Label::Spam),
            other => Err(FilterError::UnknownLabel(other.to_string())),
        }
    }
}

/// Token frequencies for one class.
///
/// Training only adds whole occurrences. Weights reconstructed from an
/// existing model may be fractional, hence `f64`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    counts: HashMap<Token, f64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of a token
    pub fn increment(&mut self, token: &str) {
        self.add(token, 1.0);
    }

    /// Add a non-negative weight to a token
    pub fn add(&mut self, token: &str, amount: f64) {
        debug_assert!(amount >= 0.0, "frequencies are never negative");
        match self.counts.get_mut(token) {
            Some(count) => *count += amount,
            None => {
                self.counts.insert(token.to_string(), amount);
            }
        }
    }

    /// Count every token of a sequence
    pub fn update<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            self.increment(token.as_ref());
        }
    }

    /// Add all frequencies of another table
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (token, &count) in &other.counts {
            self.add(token, count);
        }
    }

    /// Frequency of a token, zero when absent
    pub fn get(&self, token: &str) -> f64 {
        self.counts.get(token).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.counts.contains_key(token)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all frequencies
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.counts.iter().map(|(token, &count)| (token.as_str(), count))
    }

    /// The `k` most frequent tokens.
    ///
    /// Higher counts come first and equal counts are ordered by token, so the
    /// selection at the cutoff is reproducible. Zero-count entries are eligible.
    pub fn most_common(&self, k: usize) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        entries.sort_by(|a, b| match b.1.total_cmp(&a.1) {
            Ordering::Equal => a.0.cmp(b.0),
            ordering => ordering,
        });
        entries.truncate(k);
        entries
    }
}

impl<S: Into<Token>> FromIterator<(S, f64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for (token, count) in iter {
            let token: Token = token.into();
            table.add(&token, count);
        }
        table
    }
}

/// Per-class frequencies plus the number of emails they came from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingCounts {
    pub ham: FrequencyTable,
    pub spam: FrequencyTable,
    pub ham_emails: u64,
    pub spam_emails: u64,
}

impl TrainingCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tokenized email of the given class
    pub fn observe<I, S>(&mut self, label: Label, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match label {
            Label::Ham => {
                self.ham.update(tokens);
                self.ham_emails += 1;
            }
            Label::Spam => {
                self.spam.update(tokens);
                self.spam_emails += 1;
            }
        }
    }

    /// Add another set of counts to this one
    pub fn merge(&mut self, other: &TrainingCounts) {
        self.ham.merge(&other.ham);
        self.spam.merge(&other.spam);
        self.ham_emails += other.ham_emails;
        self.spam_emails += other.spam_emails;
    }

    pub fn table(&self, label: Label) -> &FrequencyTable {
        match label {
            Label::Ham => &self.ham,
            Label::Spam => &self.spam,
        }
    }

    pub fn emails(&self, label: Label) -> u64 {
        match label {
            Label::Ham => self.ham_emails,
            Label::Spam => self.spam_emails,
        }
    }
}

/// Trained Naive Bayes model. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub(crate) prior_ham: f64,
    pub(crate) prior_spam: f64,
    pub(crate) ham_probs: HashMap<Token, f64>,
    pub(crate) spam_probs: HashMap<Token, f64>,
    pub(crate) vocabulary: BTreeSet<Token>,
    pub(crate) total_ham_tokens: f64,
    pub(crate) total_spam_tokens: f64,
    /// Exact training counts, kept only when lossless extension is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) counts: Option<TrainingCounts>,
}

impl Model {
    pub fn prior(&self, label: Label) -> f64 {
        match label {
            Label::Ham => self.prior_ham,
            Label::Spam => self.prior_spam,
        }
    }

    /// Smoothed P(token | label), `None` outside the vocabulary
    pub fn probability(&self, label: Label, token: &str) -> Option<f64> {
        self.probabilities(label).get(token).copied()
    }

    pub fn probabilities(&self, label: Label) -> &HashMap<Token, f64> {
        match label {
            Label::Ham => &self.ham_probs,
            Label::Spam => &self.spam_probs,
        }
    }

    pub fn vocabulary(&self) -> &BTreeSet<Token> {
        &self.vocabulary
    }

    pub fn contains(&self, token: &str) -> bool {
        self.vocabulary.contains(token)
    }

    /// Sum of the class's raw counts over vocabulary tokens
    pub fn total_tokens(&self, label: Label) -> f64 {
        match label {
            Label::Ham => self.total_ham_tokens,
            Label::Spam => self.total_spam_tokens,
        }
    }

    pub fn counts(&self) -> Option<&TrainingCounts> {
        self.counts.as_ref()
    }
}
