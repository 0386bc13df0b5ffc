//! Application context: the lazily loaded model and the upload boundary
//!
//! The model is read from disk on first use and reused for every upload
//! handled through the same context. A newly trained artifact is only picked
//! up by a fresh context.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

use crate::error::{ClassifierError, Result};
use crate::pipeline::artifact;
use crate::pipeline::inference::{categorize_frame, categorized_from_frame, CategorizedTransaction};
use crate::pipeline::loader::load_table;
use crate::pipeline::model::TextPipeline;
use crate::pipeline::normalize::normalize;
use crate::pipeline::schema::{coerce_types, drop_invalid_rows, ensure_columns, UPLOAD_COLUMNS};

/// A successfully categorized upload
#[derive(Debug, Clone)]
pub struct CategorizedUpload {
    /// Valid input rows with `clean_text` and `predicted_category` appended
    pub table: DataFrame,
    pub rows: Vec<CategorizedTransaction>,
    /// Rows removed for a null amount or blank description
    pub dropped_rows: usize,
}

/// Why an upload could not be categorized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MissingColumns,
    ArtifactNotFound,
    UnexpectedProcessingFailure,
}

/// A user-facing failure message for one upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<ClassifierError> for UploadFailure {
    fn from(err: ClassifierError) -> Self {
        let kind = match err {
            ClassifierError::MissingColumns { .. } => FailureKind::MissingColumns,
            ClassifierError::ArtifactNotFound(_) => FailureKind::ArtifactNotFound,
            _ => FailureKind::UnexpectedProcessingFailure,
        };
        let message = match kind {
            FailureKind::UnexpectedProcessingFailure => format!("Failed to process file: {}", err),
            _ => err.to_string(),
        };
        Self { kind, message }
    }
}

/// Result of handling one upload at the boundary
#[derive(Debug, Clone)]
pub enum UploadOutcome {
    Categorized(CategorizedUpload),
    /// Nothing survived coercion; a warning, not an error
    NoValidRows,
    Failed(UploadFailure),
}

/// Process-scoped state shared by every upload
#[derive(Debug)]
pub struct AppContext {
    model_path: PathBuf,
    model: OnceCell<TextPipeline>,
}

impl AppContext {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            model: OnceCell::new(),
        }
    }

    /// Build a context around an already fitted pipeline.
    pub fn with_model(model_path: impl Into<PathBuf>, model: TextPipeline) -> Self {
        let ctx = Self::new(model_path);
        let _ = ctx.model.set(model);
        ctx
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    /// The model, loading it from disk on first access.
    pub fn model(&self) -> Result<&TextPipeline> {
        if let Some(model) = self.model.get() {
            return Ok(model);
        }
        let loaded = artifact::load(&self.model_path)?;
        Ok(self.model.get_or_init(|| loaded))
    }

    /// Predict a category for a single raw description.
    pub fn categorize_description(&self, description: &str) -> Result<String> {
        let model = self.model()?;
        model.predict_one(&normalize(Some(description)))
    }

    /// Validate, coerce and categorize an already loaded upload table.
    ///
    /// The model is resolved before the table is looked at, so a missing
    /// artifact is reported even for uploads that would be rejected.
    pub fn categorize_table(&self, df: &DataFrame) -> Result<CategorizedUpload> {
        let model = self.model()?;
        let df = ensure_columns(df, &UPLOAD_COLUMNS)?;
        let coerced = coerce_types(&df)?;
        let valid = drop_invalid_rows(&coerced)?;
        if valid.height() == 0 {
            return Err(ClassifierError::NoValidRows);
        }

        let table = categorize_frame(model, &valid)?;
        let rows = categorized_from_frame(&table)?;

        Ok(CategorizedUpload {
            table,
            rows,
            dropped_rows: coerced.height() - valid.height(),
        })
    }

    /// Load and categorize one uploaded file.
    pub fn categorize_file(&self, path: &Path) -> Result<CategorizedUpload> {
        let df = load_table(path)?;
        self.categorize_table(&df)
    }

    /// The upload boundary: never returns an error, only an outcome to show.
    pub fn handle_upload(&self, path: &Path) -> UploadOutcome {
        match self.categorize_file(path) {
            Ok(upload) => UploadOutcome::Categorized(upload),
            Err(ClassifierError::NoValidRows) => UploadOutcome::NoValidRows,
            Err(err) => UploadOutcome::Failed(err.into()),
        }
    }
}
