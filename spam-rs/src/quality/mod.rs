//! Filter quality evaluation
//!
//! Compares predictions with truth labels. False positives (ham marked as
//! spam) weigh ten times more than any other error.

pub mod confmat;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::corpus::{read_classification_from_file, TrainingCorpus, PREDICTION_FILENAME, TRUTH_FILENAME};
use crate::error::{FilterError, Result};
use crate::filters::{run_test, SpamFilter};

pub use confmat::{BinaryConfusionMatrix, ConfusionCounts};

/// Weight of a false positive relative to other errors
const FALSE_POSITIVE_WEIGHT: f64 = 10.0;

/// `(tp + tn) / (tp + tn + 10 * fp + fn)`
pub fn quality_score(tp: u64, tn: u64, fp: u64, fn_: u64) -> f64 {
    let correct = (tp + tn) as f64;
    correct / (correct + FALSE_POSITIVE_WEIGHT * fp as f64 + fn_ as f64)
}

/// Score the truth and prediction files of a corpus directory
pub fn compute_quality_for_corpus<P: AsRef<Path>>(corpus_dir: P) -> Result<f64> {
    let corpus_dir = corpus_dir.as_ref();
    let truth = read_classification_from_file(corpus_dir.join(TRUTH_FILENAME))?;
    let predictions = read_classification_from_file(corpus_dir.join(PREDICTION_FILENAME))?;

    let mut matrix = BinaryConfusionMatrix::new();
    matrix.compute_from_maps(&truth, &predictions)?;

    let counts = matrix.as_counts();
    if counts.total() == 0 {
        return Err(FilterError::EmptyCorpus);
    }

    Ok(quality_score(counts.tp, counts.tn, counts.fp, counts.fn_))
}

/// Train on one corpus, test on another and score the predictions.
///
/// The prediction file is removed afterwards.
pub fn compute_quality_for_filter<P, Q>(
    train_dir: P,
    test_dir: Q,
    filter: &mut dyn SpamFilter,
) -> Result<f64>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let test_dir = test_dir.as_ref();

    filter.train(&TrainingCorpus::new(train_dir)?)?;
    run_test(filter, test_dir)?;

    let quality = compute_quality_for_corpus(test_dir);
    fs::remove_file(test_dir.join(PREDICTION_FILENAME))?;
    let quality = quality?;

    info!("{} quality: {:.4}", filter.name(), quality);
    Ok(quality)
}

/// Quality of each filter, keyed by filter name
pub fn compute_quality_for_filters<P, Q>(
    train_dir: P,
    test_dir: Q,
    filters: &mut [Box<dyn SpamFilter>],
) -> Result<BTreeMap<String, f64>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mut qualities = BTreeMap::new();
    for filter in filters.iter_mut() {
        let quality = compute_quality_for_filter(&train_dir, &test_dir, filter.as_mut())?;
        qualities.insert(filter.name().to_string(), quality);
    }
    Ok(qualities)
}
