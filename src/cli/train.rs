//! `spendwise train`: fit the classifier and save the artifact

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use console::style;

use crate::pipeline::artifact;
use crate::pipeline::loader::load_table;
use crate::pipeline::train::{labeled_examples_from_frame, train, TrainingConfig, TrainingOutcome};
use crate::report::{display_training_report, export_training_report, ExportParams};
use crate::utils::progress::{create_spinner, finish_with_success};
use crate::utils::styling::{
    print_completion, print_count, print_info, print_step_header, print_success,
    print_training_config, print_warning,
};

/// Options gathered from the command line
pub struct TrainArgs<'a> {
    pub data: &'a Path,
    pub model: &'a Path,
    pub report: Option<&'a Path>,
    pub config: TrainingConfig,
}

/// Run the full training flow: load, split, fit, evaluate and save.
pub fn run_train(args: &TrainArgs) -> Result<TrainingOutcome> {
    let start = Instant::now();

    print_training_config(
        args.data,
        args.model,
        args.config.pipeline.vectorizer.max_features,
        args.config.pipeline.vectorizer.min_df,
        args.config.seed,
    );

    // Step 1: load labeled data
    print_step_header(1, "Loading Labeled Data");
    let spinner = create_spinner("Reading dataset...");
    let df = load_table(args.data)
        .with_context(|| format!("Failed to load training data from {}", args.data.display()))?;
    let examples = labeled_examples_from_frame(&df)?;
    finish_with_success(&spinner, "Dataset loaded");

    print_count("labeled descriptions", examples.len(), None);
    let dropped = df.height() - examples.len();
    if dropped > 0 {
        print_warning(&format!(
            "Skipped {} rows with a blank description or category",
            dropped
        ));
    }

    // Step 2: split, fit, evaluate
    print_step_header(2, "Training Classifier");
    let spinner = create_spinner("Fitting TF-IDF + linear SVM...");
    let outcome = train(&examples, &args.config).context("Training failed")?;
    finish_with_success(
        &spinner,
        &format!(
            "Fitted on {} rows ({} terms)",
            outcome.report.n_train, outcome.report.vocabulary_size
        ),
    );
    display_training_report(&outcome.report);

    // Step 3: persist
    print_step_header(3, "Saving Model");
    artifact::save(&outcome.pipeline, args.model)
        .with_context(|| format!("Failed to save model to {}", args.model.display()))?;
    print_success(&format!("Model saved to {}", args.model.display()));

    if let Some(report_path) = args.report {
        let data_file = args.data.display().to_string();
        let model_file = args.model.display().to_string();
        export_training_report(
            &outcome.report,
            report_path,
            &ExportParams {
                data_file: &data_file,
                model_file: &model_file,
                config: &args.config,
            },
        )?;
        print_info(&format!(
            "Training report written to {}",
            style(report_path.display()).cyan()
        ));
    }

    print_completion(&format!(
        "Training complete in {:.2}s",
        start.elapsed().as_secs_f64()
    ));

    Ok(outcome)
}
