//! Spendwise: Expense Classification CLI Tool
//!
//! Trains a transaction description classifier and categorizes uploaded
//! bank statements with it.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use spendwise::cli::{
    max_features_limit, run_predict, run_template, run_train, Cli, Commands, PredictArgs,
    TrainArgs,
};
use spendwise::pipeline::train::TrainingConfig;
use spendwise::utils::styling::{print_banner, print_error, print_success};
use spendwise::AppContext;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            print_error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    print_banner(env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Train {
            data,
            max_features,
            min_df,
            seed,
            report,
        } => {
            let mut config = TrainingConfig {
                seed: *seed,
                ..TrainingConfig::default()
            };
            config.pipeline.vectorizer.max_features = max_features_limit(*max_features);
            config.pipeline.vectorizer.min_df = *min_df;

            run_train(&TrainArgs {
                data,
                model: &cli.model,
                report: report.as_deref(),
                config,
            })?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Predict {
            files,
            output,
            output_dir,
            preview,
        } => {
            // One context per invocation so the model is read at most once
            let ctx = AppContext::new(&cli.model);
            let summary = run_predict(
                &ctx,
                &PredictArgs {
                    files,
                    output: output.as_deref(),
                    output_dir,
                    preview: *preview,
                },
            )?;
            Ok(if summary.has_failures() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Template { output } => {
            run_template(output)?;
            print_success(&format!("Template written to {}", output.display()));
            Ok(ExitCode::SUCCESS)
        }
    }
}
