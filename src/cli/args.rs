//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::artifact::DEFAULT_MODEL_PATH;
use crate::report::DEFAULT_PREVIEW_ROWS;

/// Default labeled dataset used by `train`
pub const DEFAULT_DATA_PATH: &str = "data/sample_expenses.csv";

/// Default file written by `template`
pub const DEFAULT_TEMPLATE_PATH: &str = "example.csv";

/// Spendwise - Categorize bank transactions from their free-text descriptions
#[derive(Parser, Debug)]
#[command(name = "spendwise")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Model artifact path, written by `train` and read by `predict`
    #[arg(long, global = true, default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the classifier on a labeled dataset and save the model
    Train {
        /// Labeled CSV or Parquet file with `description` and `category` columns
        #[arg(long, default_value = DEFAULT_DATA_PATH)]
        data: PathBuf,

        /// Maximum vocabulary size, keeping the most frequent terms.
        /// Use 0 to keep every term.
        #[arg(long, default_value = "5000")]
        max_features: usize,

        /// Minimum number of descriptions a term must appear in
        #[arg(long, default_value = "1", value_parser = validate_min_df)]
        min_df: usize,

        /// Seed for the hold-out split
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Optional JSON file receiving the training diagnostics
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Categorize one or more uploaded statements with the saved model
    Predict {
        /// Upload files (CSV or Parquet) with `date`, `amount` and `description` columns
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Export path for the categorized table (single input file only)
        #[arg(short, long, conflicts_with = "output_dir")]
        output: Option<PathBuf>,

        /// Directory receiving timestamped exports
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Number of categorized rows to preview (0 disables the preview)
        #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
        preview: usize,
    },

    /// Write an example upload file
    Template {
        /// Destination path
        #[arg(default_value = DEFAULT_TEMPLATE_PATH)]
        output: PathBuf,
    },
}

/// Translate the `--max-features` flag, where 0 lifts the cap.
pub fn max_features_limit(value: usize) -> Option<usize> {
    if value == 0 {
        None
    } else {
        Some(value)
    }
}

/// Validator for min_df parameter
fn validate_min_df(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;

    if value == 0 {
        Err("min_df must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
