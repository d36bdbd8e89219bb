use serde::Serialize;
use std::collections::BTreeMap;

use crate::bayes::Label;
use crate::error::{FilterError, Result};

/// Confusion matrix counts with SPAM as the positive class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionCounts {
    pub tp: u64,
    pub fp: u64,
    #[serde(rename = "fn")]
    pub fn_: u64,
    pub tn: u64,
}

impl ConfusionCounts {
    pub fn total(&self) -> u64 {
        self.tp + self.fp + self.fn_ + self.tn
    }
}

/// Binary confusion matrix over HAM/SPAM
#[derive(Debug, Clone, Default)]
pub struct BinaryConfusionMatrix {
    counts: ConfusionCounts,
}

impl BinaryConfusionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one prediction
    pub fn update(&mut self, truth: Label, prediction: Label) {
        match (truth, prediction) {
            (Label::Spam, Label::Spam) => self.counts.tp += 1,
            (Label::Spam, Label::Ham) => self.counts.fn_ += 1,
            (Label::Ham, Label::Spam) => self.counts.fp += 1,
            (Label::Ham, Label::Ham) => self.counts.tn += 1,
        }
    }

    /// Record every truth entry against its prediction.
    ///
    /// Predictions without a truth entry are ignored.
    pub fn compute_from_maps(
        &mut self,
        truth: &BTreeMap<String, String>,
        predictions: &BTreeMap<String, String>,
    ) -> Result<()> {
        for (name, truth_tag) in truth {
            let prediction_tag = predictions
                .get(name)
                .ok_or_else(|| FilterError::MissingPrediction(name.clone()))?;

            self.update(truth_tag.parse()?, prediction_tag.parse()?);
        }
        Ok(())
    }

    pub fn as_counts(&self) -> ConfusionCounts {
        self.counts
    }
}
