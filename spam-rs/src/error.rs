use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot build a model from an empty training set (no ham and no spam emails)")]
    EmptyTrainingSet,

    #[error("Model not initialized: {0}")]
    NotInitialized(String),

    #[error("Invalid directory path: {}", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    #[error("Missing prediction for email: {0}")]
    MissingPrediction(String),

    #[error("Corpus has no classified emails")]
    EmptyCorpus,
}

pub type Result<T> = std::result::Result<T, FilterError>;
