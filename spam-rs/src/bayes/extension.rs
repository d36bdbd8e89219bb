//! Extending an existing model with new training data

use tracing::{info, warn};

use super::builder::ModelBuilder;
use super::types::{FrequencyTable, Label, Model, TrainingCounts};
use crate::error::{FilterError, Result};

impl ModelBuilder {
    /// Merge new counts into an existing model and rebuild it.
    ///
    /// Fails with [`FilterError::NotInitialized`] when there is no model to extend.
    pub fn extend(&self, existing: Option<&Model>, update: &TrainingCounts) -> Result<Model> {
        let model = existing.ok_or_else(|| {
            FilterError::NotInitialized("no model loaded or trained to extend".to_string())
        })?;

        let mut counts = reconstruct_counts(model);
        counts.merge(update);

        info!(
            "Extending model with {} ham / {} spam emails",
            update.ham_emails, update.spam_emails
        );

        self.build_from(&counts)
    }
}

/// Recover training counts from a model.
///
/// Exact counts are used when the model carries them. Otherwise each token
/// weight is its probability times the class's vocabulary total, and email
/// counts are the priors times the sum of both totals, truncated. Tokens
/// outside the old vocabulary are gone for good.
pub fn reconstruct_counts(model: &Model) -> TrainingCounts {
    if let Some(counts) = model.counts() {
        return counts.clone();
    }

    warn!("Model has no stored counts, reconstructing them from probabilities");

    let token_total = model.total_tokens(Label::Ham) + model.total_tokens(Label::Spam);

    TrainingCounts {
        ham: reconstruct_table(model, Label::Ham),
        spam: reconstruct_table(model, Label::Spam),
        ham_emails: (model.prior(Label::Ham) * token_total) as u64,
        spam_emails: (model.prior(Label::Spam) * token_total) as u64,
    }
}

fn reconstruct_table(model: &Model, label: Label) -> FrequencyTable {
    let total = model.total_tokens(label);
    model
        .probabilities(label)
        .iter()
        .map(|(token, &p)| (token.as_str(), p * total))
        .collect()
}
