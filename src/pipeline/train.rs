//! Training with a data-dependent hold-out
//!
//! Counts classes, decides the split, fits the pipeline on the training
//! partition and scores the hold-out when there is one. Evaluation is purely
//! diagnostic; the fitted pipeline is returned either way.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::pipeline::metrics::{classification_report, ClassificationReport};
use crate::pipeline::model::{build_pipeline, PipelineConfig, TextPipeline};
use crate::pipeline::normalize::normalize;
use crate::pipeline::schema::{ensure_columns, CATEGORY, DESCRIPTION, TRAINING_COLUMNS};
use crate::pipeline::split::{
    class_counts, decide_split, train_test_split, SplitDecision, DEFAULT_SPLIT_SEED,
};

/// One labeled description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub description: String,
    pub category: String,
}

impl LabeledExample {
    pub fn new(description: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            category: category.into(),
        }
    }
}

/// Everything that shapes a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub pipeline: PipelineConfig,
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            seed: DEFAULT_SPLIT_SEED,
        }
    }
}

/// Diagnostics of a training run
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub n_samples: usize,
    pub n_classes: usize,
    pub class_counts: Vec<(String, usize)>,
    pub decision: SplitDecision,
    pub n_train: usize,
    pub n_test: usize,
    pub vocabulary_size: usize,
    /// `None` when the hold-out came out empty and all data went to training
    pub evaluation: Option<ClassificationReport>,
}

/// Fitted pipeline together with its diagnostics
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub pipeline: TextPipeline,
    pub report: TrainingReport,
}

/// Extract labeled examples from a table with `description` and `category`.
///
/// Rows missing either value, or holding only whitespace in either, are dropped.
/// Categories are kept exactly as read, so `"Food "` and `"Food"` stay distinct.
pub fn labeled_examples_from_frame(df: &DataFrame) -> Result<Vec<LabeledExample>> {
    let df = ensure_columns(df, &TRAINING_COLUMNS)?;
    let descriptions = df.column(DESCRIPTION)?.cast(&DataType::String)?;
    let categories = df.column(CATEGORY)?.cast(&DataType::String)?;

    let examples = descriptions
        .str()?
        .into_iter()
        .zip(categories.str()?.into_iter())
        .filter_map(|(desc, cat)| match (desc, cat) {
            (Some(d), Some(c)) if !d.trim().is_empty() && !c.trim().is_empty() => {
                Some(LabeledExample::new(d, c))
            }
            _ => None,
        })
        .collect();

    Ok(examples)
}

/// Split, fit and evaluate.
pub fn train(examples: &[LabeledExample], config: &TrainingConfig) -> Result<TrainingOutcome> {
    if examples.is_empty() {
        return Err(ClassifierError::EmptyTrainingSet);
    }

    let texts: Vec<String> = examples
        .iter()
        .map(|e| normalize(Some(&e.description)))
        .collect();
    let labels: Vec<String> = examples.iter().map(|e| e.category.clone()).collect();

    let counts = class_counts(&labels);
    let decision = decide_split(&counts);
    let split = train_test_split(&labels, &decision, config.seed);

    let pick = |indices: &[usize], source: &[String]| -> Vec<String> {
        indices.iter().map(|&i| source[i].clone()).collect()
    };
    let train_texts = pick(&split.train, &texts);
    let train_labels = pick(&split.train, &labels);

    let mut pipeline = build_pipeline(&config.pipeline);
    pipeline.fit(&train_texts, &train_labels)?;

    let evaluation = if split.test.is_empty() {
        None
    } else {
        let test_texts = pick(&split.test, &texts);
        let test_labels = pick(&split.test, &labels);
        let predictions = pipeline.predict(&test_texts)?;
        Some(classification_report(&test_labels, &predictions))
    };

    let report = TrainingReport {
        n_samples: labels.len(),
        n_classes: counts.len(),
        class_counts: counts,
        decision,
        n_train: split.train.len(),
        n_test: split.test.len(),
        vocabulary_size: pipeline.vocabulary_size(),
        evaluation,
    };

    Ok(TrainingOutcome { pipeline, report })
}
