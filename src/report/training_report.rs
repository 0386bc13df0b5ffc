//! Training diagnostics: console tables and JSON export

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;
use serde::Serialize;

use crate::pipeline::metrics::ClassificationReport;
use crate::pipeline::train::{TrainingConfig, TrainingReport};

/// Metadata about the training run
#[derive(Serialize)]
pub struct TrainingMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    pub spendwise_version: String,
    pub data_file: String,
    pub model_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_features: Option<usize>,
    pub min_df: usize,
    pub seed: u64,
}

/// Complete training export
#[derive(Serialize)]
pub struct TrainingExport<'a> {
    pub metadata: TrainingMetadata,
    pub training: &'a TrainingReport,
}

/// Paths recorded alongside the diagnostics
pub struct ExportParams<'a> {
    pub data_file: &'a str,
    pub model_file: &'a str,
    pub config: &'a TrainingConfig,
}

/// Show class counts, the split that was used and the hold-out scores.
pub fn display_training_report(report: &TrainingReport) {
    println!();
    println!(
        "    {} {}",
        style("🏷️").cyan(),
        style("CATEGORY COUNTS").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Category").add_attribute(Attribute::Bold),
        Cell::new("Samples").add_attribute(Attribute::Bold),
    ]);
    for (label, count) in &report.class_counts {
        let color = if *count < 2 { Color::Yellow } else { Color::White };
        table.add_row(vec![
            Cell::new(label),
            Cell::new(count).fg(color).set_alignment(CellAlignment::Right),
        ]);
    }
    print_table(&table);

    println!();
    println!(
        "    Samples: {}, Classes: {}, test_size: {}, stratify: {}",
        style(report.n_samples).yellow().bold(),
        style(report.n_classes).yellow().bold(),
        style(report.decision.test_fraction).yellow(),
        style(report.decision.stratify).yellow()
    );

    match &report.evaluation {
        Some(evaluation) => {
            println!(
                "    Train rows: {}, Test rows: {}",
                style(report.n_train).cyan(),
                style(report.n_test).cyan()
            );
            display_classification_report(evaluation);
        }
        None => {
            println!(
                "    {} {}",
                style("ℹ️").cyan(),
                style("Trained on all data (no hold-out available)").dim()
            );
        }
    }
}

/// Render a per-class precision/recall/F1 table with averages.
pub fn display_classification_report(evaluation: &ClassificationReport) {
    println!();
    println!(
        "    {} {}",
        style("🎯").cyan(),
        style("EVALUATION").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let accuracy_color = if evaluation.accuracy >= 0.8 {
        Color::Green
    } else if evaluation.accuracy >= 0.5 {
        Color::Yellow
    } else {
        Color::Red
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Category").add_attribute(Attribute::Bold),
        Cell::new("Precision").add_attribute(Attribute::Bold),
        Cell::new("Recall").add_attribute(Attribute::Bold),
        Cell::new("F1").add_attribute(Attribute::Bold),
        Cell::new("Support").add_attribute(Attribute::Bold),
    ]);

    for class in &evaluation.classes {
        table.add_row(vec![
            Cell::new(&class.label),
            score_cell(class.precision),
            score_cell(class.recall),
            score_cell(class.f1),
            Cell::new(class.support).set_alignment(CellAlignment::Right),
        ]);
    }

    for (name, avg) in [
        ("macro avg", &evaluation.macro_avg),
        ("weighted avg", &evaluation.weighted_avg),
    ] {
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Italic),
            score_cell(avg.precision),
            score_cell(avg.recall),
            score_cell(avg.f1),
            Cell::new(avg.support).set_alignment(CellAlignment::Right),
        ]);
    }
    print_table(&table);

    println!();
    println!(
        "    Accuracy: {}",
        style(format!("{:.4}", evaluation.accuracy))
            .fg(to_console_color(accuracy_color))
            .bold()
    );
}

/// Write the training diagnostics with run metadata to a JSON file
pub fn export_training_report(
    report: &TrainingReport,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let export = TrainingExport {
        metadata: TrainingMetadata {
            timestamp: Utc::now().to_rfc3339(),
            spendwise_version: env!("CARGO_PKG_VERSION").to_string(),
            data_file: params.data_file.to_string(),
            model_file: params.model_file.to_string(),
            max_features: params.config.pipeline.vectorizer.max_features,
            min_df: params.config.pipeline.vectorizer.min_df,
            seed: params.config.seed,
        },
        training: report,
    };

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize training report to JSON")?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write training report to {}", output_path.display()))?;

    Ok(())
}

fn score_cell(value: f64) -> Cell {
    Cell::new(format!("{:.2}", value)).set_alignment(CellAlignment::Right)
}

fn to_console_color(color: Color) -> console::Color {
    match color {
        Color::Green => console::Color::Green,
        Color::Yellow => console::Color::Yellow,
        _ => console::Color::Red,
    }
}

fn print_table(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::train::{train, LabeledExample};

    fn report() -> TrainingReport {
        let examples = vec![
            LabeledExample::new("Zomato order", "Food"),
            LabeledExample::new("Swiggy dinner", "Food"),
            LabeledExample::new("Myntra dress", "Shopping"),
            LabeledExample::new("Ajio shirt", "Shopping"),
        ];
        train(&examples, &TrainingConfig::default()).unwrap().report
    }

    #[test]
    fn test_export_training_report_writes_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("training.json");
        let config = TrainingConfig::default();
        let params = ExportParams {
            data_file: "data/sample_expenses.csv",
            model_file: "models/expense_classifier.json",
            config: &config,
        };

        export_training_report(&report(), &path, &params).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["metadata"]["seed"], 42);
        assert_eq!(json["metadata"]["max_features"], 5000);
        assert_eq!(json["training"]["n_samples"], 4);
        assert_eq!(json["training"]["decision"]["stratify"], true);
        assert!(json["training"]["evaluation"]["accuracy"].is_number());
    }
}
