//! Naive Bayes spam model
//!
//! Builds Laplace-smoothed models from per-class token frequencies, scores
//! token sequences in log space, and extends existing models with new data.

pub mod builder;
pub mod classifier;
pub mod extension;
pub mod types;

pub use builder::ModelBuilder;
pub use classifier::{classify, score, Scores};
pub use extension::reconstruct_counts;
pub use types::*;
