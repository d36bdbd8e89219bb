//! Naive Bayes spam filter

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::SpamFilter;
use crate::bayes::{score, FrequencyTable, Label, Model, ModelBuilder, TrainingCounts};
use crate::config::FilterConfig;
use crate::corpus::{Corpus, Predictions, TrainingCorpus};
use crate::error::{FilterError, Result};
use crate::mime::MimeParser;
use crate::storage::ModelStore;
use crate::tokenizer::{Token, Tokenizer};

/// Extract the body of a raw email and tokenize it
pub fn tokenize_email(raw: &[u8]) -> Vec<Token> {
    let body = MimeParser::extract_body(raw);
    Tokenizer::tokenize(body.as_deref())
}

/// Count tokens over `(id, raw email)` pairs.
///
/// Returns the frequency table and the number of emails seen.
pub fn count_tokens<I>(emails: I) -> Result<(FrequencyTable, u64)>
where
    I: IntoIterator<Item = Result<(String, Vec<u8>)>>,
{
    let mut table = FrequencyTable::new();
    let mut count = 0;

    for email in emails {
        let (_, raw) = email?;
        table.update(tokenize_email(&raw));
        count += 1;
    }

    Ok((table, count))
}

/// Probabilistic filter backed by a [`Model`]
pub struct BayesFilter {
    builder: ModelBuilder,
    model_location: Option<PathBuf>,
    model: Option<Model>,
}

impl BayesFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            builder: ModelBuilder::from_config(config),
            model_location: config.model_location.clone(),
            model: None,
        }
    }

    /// Filter starting from an already trained model
    pub fn with_model(config: &FilterConfig, model: Model) -> Self {
        Self {
            model: Some(model),
            ..Self::new(config)
        }
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    /// Add a labeled corpus to the current model
    pub fn extend(&mut self, corpus: &TrainingCorpus) -> Result<()> {
        if self.model.is_none() {
            return Err(FilterError::NotInitialized(
                "model not loaded or trained".to_string(),
            ));
        }

        let update = Self::collect_counts(corpus)?;
        let model = self.builder.extend(self.model.as_ref(), &update)?;
        self.model = Some(model);
        Ok(())
    }

    /// Save to the configured model location
    pub fn save_model(&self) -> Result<()> {
        let path = self.configured_location()?;
        self.save_model_to(path)
    }

    pub fn save_model_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let model = self.model.as_ref().ok_or_else(|| {
            FilterError::NotInitialized("no model to save, train or load first".to_string())
        })?;
        ModelStore::new(path.as_ref()).save(model)
    }

    /// Load from the configured model location
    pub fn load_model(&mut self) -> Result<()> {
        let path = self.configured_location()?.to_path_buf();
        self.load_model_from(path)
    }

    pub fn load_model_from<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.model = Some(ModelStore::new(path.as_ref()).load()?);
        Ok(())
    }

    /// Classify a single raw email
    pub fn classify_email(&self, raw: &[u8]) -> Result<Label> {
        let model = self.model.as_ref().ok_or_else(|| {
            FilterError::NotInitialized("model not loaded or trained".to_string())
        })?;
        Ok(score(model, &tokenize_email(raw)).label())
    }

    fn configured_location(&self) -> Result<&Path> {
        self.model_location.as_deref().ok_or_else(|| {
            FilterError::Config("filter.model_location is not set".to_string())
        })
    }

    fn collect_counts(corpus: &TrainingCorpus) -> Result<TrainingCounts> {
        let (ham, ham_emails) = count_tokens(corpus.hams()?)?;
        let (spam, spam_emails) = count_tokens(corpus.spams()?)?;

        info!(
            "Counted {} distinct ham tokens in {} emails, {} distinct spam tokens in {} emails",
            ham.len(),
            ham_emails,
            spam.len(),
            spam_emails
        );

        Ok(TrainingCounts {
            ham,
            spam,
            ham_emails,
            spam_emails,
        })
    }
}

impl SpamFilter for BayesFilter {
    fn name(&self) -> &str {
        "BayesFilter"
    }

    fn train(&mut self, corpus: &TrainingCorpus) -> Result<()> {
        let counts = Self::collect_counts(corpus)?;
        self.model = Some(self.builder.build_from(&counts)?);
        Ok(())
    }

    fn predict(&mut self, corpus: &Corpus) -> Result<Predictions> {
        if self.model.is_none() {
            self.load_model().map_err(|e| match e {
                FilterError::Config(_) => FilterError::NotInitialized(
                    "no model trained and no model location configured".to_string(),
                ),
                other => other,
            })?;
        }
        let model = self.model.as_ref().ok_or_else(|| {
            FilterError::NotInitialized("model not loaded or trained".to_string())
        })?;

        let mut predictions = Predictions::new();
        for email in corpus.emails()? {
            let (name, raw) = email?;
            let scores = score(model, &tokenize_email(&raw));
            debug!(
                email = %name,
                log_ham = scores.log_ham,
                log_spam = scores.log_spam,
                "Scored email"
            );
            predictions.insert(name, scores.label());
        }

        Ok(predictions)
    }
}
