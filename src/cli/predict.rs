//! `spendwise predict`: categorize uploaded statements

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use console::style;

use crate::context::{AppContext, CategorizedUpload, UploadOutcome};
use crate::pipeline::loader::write_csv;
use crate::report::{display_preview, CategorySummary};
use crate::utils::progress::{create_spinner, finish_with_failure, finish_with_success, finish_with_warning};
use crate::utils::styling::{print_count, print_error, print_section, print_success, print_warning};

/// Options gathered from the command line
pub struct PredictArgs<'a> {
    pub files: &'a [PathBuf],
    pub output: Option<&'a Path>,
    pub output_dir: &'a Path,
    pub preview: usize,
}

/// What happened across all uploads of one invocation
#[derive(Debug, Default)]
pub struct PredictSummary {
    pub categorized: usize,
    pub empty: usize,
    pub failed: usize,
    pub exports: Vec<PathBuf>,
}

impl PredictSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Export path for one upload.
///
/// An explicit `--output` wins. Otherwise the file is timestamped inside the
/// output directory, with the upload's stem appended when several files are
/// processed together.
pub fn export_path(
    output: Option<&Path>,
    output_dir: &Path,
    stamp: &str,
    upload: &Path,
    multiple: bool,
) -> PathBuf {
    if let Some(path) = output {
        return path.to_path_buf();
    }
    let name = if multiple {
        let stem = upload
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("upload");
        format!("categorized_{}_{}.csv", stamp, stem)
    } else {
        format!("categorized_{}.csv", stamp)
    };
    output_dir.join(name)
}

/// Categorize every file independently. A failing file never stops the rest.
pub fn run_predict(ctx: &AppContext, args: &PredictArgs) -> Result<PredictSummary> {
    if args.output.is_some() && args.files.len() > 1 {
        bail!("--output takes a single upload; use --output-dir for several files");
    }

    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let multiple = args.files.len() > 1;
    let mut summary = PredictSummary::default();

    for path in args.files {
        print_section(&format!("Upload: {}", path.display()));

        let spinner = create_spinner("Categorizing transactions...");
        match ctx.handle_upload(path) {
            UploadOutcome::Categorized(upload) => {
                finish_with_success(&spinner, "Transactions categorized");
                let export = export_path(args.output, args.output_dir, &stamp, path, multiple);
                report_upload(upload, &export, args.preview)?;
                summary.categorized += 1;
                summary.exports.push(export);
            }
            UploadOutcome::NoValidRows => {
                finish_with_warning(&spinner, "Nothing to categorize");
                print_warning("No valid rows found after cleaning.");
                summary.empty += 1;
            }
            UploadOutcome::Failed(failure) => {
                finish_with_failure(&spinner, "Upload rejected");
                print_error(&failure.message);
                summary.failed += 1;
            }
        }
    }

    println!();
    println!(
        "    {} categorized, {} empty, {} failed",
        style(summary.categorized).green().bold(),
        style(summary.empty).yellow().bold(),
        style(summary.failed).red().bold()
    );

    Ok(summary)
}

fn report_upload(mut upload: CategorizedUpload, export: &Path, preview: usize) -> Result<()> {
    print_count("categorized transactions", upload.rows.len(), None);
    if upload.dropped_rows > 0 {
        print_warning(&format!(
            "Dropped {} rows with a missing amount or blank description",
            upload.dropped_rows
        ));
    }

    display_preview(&upload.rows, preview);
    CategorySummary::from_rows(&upload.rows).display();

    write_csv(&mut upload.table, export)
        .with_context(|| format!("Failed to export results to {}", export.display()))?;
    println!();
    print_success(&format!("Categorized file saved to {}", export.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_path_explicit_output_wins() {
        let path = export_path(
            Some(Path::new("out/result.csv")),
            Path::new("exports"),
            "20251001_120000",
            Path::new("bank.csv"),
            false,
        );
        assert_eq!(path, PathBuf::from("out/result.csv"));
    }

    #[test]
    fn test_export_path_timestamped() {
        let single = export_path(None, Path::new("exports"), "20251001_120000", Path::new("a/bank.csv"), false);
        assert_eq!(single, PathBuf::from("exports/categorized_20251001_120000.csv"));

        let multi = export_path(None, Path::new("exports"), "20251001_120000", Path::new("a/bank.csv"), true);
        assert_eq!(multi, PathBuf::from("exports/categorized_20251001_120000_bank.csv"));
    }
}
