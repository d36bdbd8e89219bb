//! Log-space Naive Bayes classification

use super::types::{Label, Model};

/// Accumulated log-probabilities for both classes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub log_ham: f64,
    pub log_spam: f64,
}

impl Scores {
    /// HAM only when strictly more likely; ties go to SPAM
    pub fn label(&self) -> Label {
        if self.log_ham > self.log_spam {
            Label::Ham
        } else {
            Label::Spam
        }
    }
}

/// Score a token sequence, starting from the log priors.
///
/// Tokens outside the vocabulary are skipped entirely.
pub fn score<S: AsRef<str>>(model: &Model, tokens: &[S]) -> Scores {
    let mut scores = Scores {
        log_ham: model.prior(Label::Ham).ln(),
        log_spam: model.prior(Label::Spam).ln(),
    };

    for token in tokens {
        let token = token.as_ref();
        if let (Some(p_ham), Some(p_spam)) = (
            model.probability(Label::Ham, token),
            model.probability(Label::Spam, token),
        ) {
            scores.log_ham += p_ham.ln();
            scores.log_spam += p_spam.ln();
        }
    }

    scores
}

pub fn classify<S: AsRef<str>>(model: &Model, tokens: &[S]) -> Label {
    score(model, tokens).label()
}
