//! Error types for the classifier library.
//!
//! Only structural problems surface here. Malformed cell values never do:
//! the normalizer degrades to an empty string and coercion degrades to null.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while loading data, training, or predicting.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// One or more required columns are absent from the table.
    #[error("Missing columns: {missing:?}. Expected {expected:?}.")]
    MissingColumns {
        /// Required column names that were not found
        missing: Vec<String>,
        /// The full set of required column names
        expected: Vec<String>,
    },

    /// Every row was dropped after type coercion.
    #[error("No valid rows after cleaning.")]
    NoValidRows,

    /// The model artifact does not exist at the given path.
    #[error("Model not found at {}. Please run: `spendwise train`", .0.display())]
    ArtifactNotFound(PathBuf),

    /// The classifier needs at least two distinct labels to learn a boundary.
    #[error("Training needs samples of at least 2 categories; found {found}")]
    TooFewClasses { found: usize },

    /// No labeled rows were left to fit on.
    #[error("No labeled examples available for training")]
    EmptyTrainingSet,

    /// Every description normalized to nothing, so no terms could be learned.
    #[error("Empty vocabulary: the descriptions contain no usable words")]
    EmptyVocabulary,

    /// Prediction was requested from a pipeline that has not been fitted.
    #[error("Pipeline has not been fitted yet")]
    NotFitted,

    /// A file extension the loader does not know how to read.
    #[error("Unsupported file format: {0}. Supported formats: csv, parquet")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
