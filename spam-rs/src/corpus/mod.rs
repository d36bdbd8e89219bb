//! Email corpora on disk
//!
//! - [`directory`]: directory of raw emails
//! - [`training`]: corpus with truth labels
//! - [`classification`]: `name label` truth and prediction files

pub mod classification;
pub mod directory;
pub mod training;

pub use classification::{read_classification_from_file, write_classification_to_file, Predictions};
pub use directory::{Corpus, Emails};
pub use training::{LabeledEmails, TrainingCorpus};

/// Truth labels of a corpus
pub const TRUTH_FILENAME: &str = "!truth.txt";
/// Predictions written by a filter test run
pub const PREDICTION_FILENAME: &str = "!prediction.txt";
