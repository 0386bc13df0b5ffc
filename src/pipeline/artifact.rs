//! Model artifact persistence
//!
//! The artifact is a single JSON document. Saving replaces any previous file
//! wholesale; there is no versioning beyond the latest artifact.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::pipeline::model::TextPipeline;

/// Default artifact location, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "models/expense_classifier.json";

pub fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_PATH)
}

#[derive(Serialize)]
struct ArtifactOut<'a> {
    spendwise_version: &'a str,
    saved_at: String,
    pipeline: &'a TextPipeline,
}

#[derive(Deserialize)]
struct ArtifactIn {
    #[allow(dead_code)]
    spendwise_version: String,
    #[allow(dead_code)]
    saved_at: String,
    pipeline: TextPipeline,
}

/// Serialize a fitted pipeline, creating the parent directory if needed.
pub fn save(pipeline: &TextPipeline, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let artifact = ArtifactOut {
        spendwise_version: env!("CARGO_PKG_VERSION"),
        saved_at: Utc::now().to_rfc3339(),
        pipeline,
    };

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, &artifact)?;
    writer.flush()?;
    Ok(())
}

/// Load a pipeline saved by [`save`].
///
/// A missing file is reported as [`ClassifierError::ArtifactNotFound`] so the
/// caller can point the user at training.
pub fn load(path: &Path) -> Result<TextPipeline> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ClassifierError::ArtifactNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };

    let artifact: ArtifactIn = serde_json::from_reader(BufReader::new(file))?;
    if !artifact.pipeline.is_fitted() {
        return Err(ClassifierError::NotFitted);
    }
    Ok(artifact.pipeline)
}
