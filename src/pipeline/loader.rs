//! Dataset loader for CSV and Parquet files

use std::path::Path;

use polars::prelude::*;

use crate::error::{ClassifierError, Result};

/// Load a table from a file (CSV or Parquet based on extension).
///
/// CSV columns are all read as strings so that a stray value like `"n/a"` in
/// the amount column degrades to null during coercion instead of failing the
/// whole read.
pub fn load_table(path: &Path) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => {
            if !path.exists() {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path.display()),
                )
                .into());
            }
            LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(0))
                .finish()?
        }
        "parquet" => LazyFrame::scan_parquet(path, Default::default())?,
        _ => return Err(ClassifierError::UnsupportedFormat(extension)),
    };

    Ok(lf.collect()?)
}

/// Write a table as CSV, creating the parent directory when needed.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = std::fs::File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_csv_columns_read_as_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "date,amount,description").unwrap();
        writeln!(file, "2025-10-01,250,Zomato order 9999").unwrap();
        writeln!(file, "2025-10-02,abc,Myntra").unwrap();
        drop(file);

        let df = load_table(&path).unwrap();
        assert_eq!(df.shape(), (2, 3));
        assert_eq!(df.column("amount").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.xlsx");
        std::fs::File::create(&path).unwrap();

        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, ClassifierError::UnsupportedFormat(ref ext) if ext == "xlsx"));
    }

    #[test]
    fn test_missing_csv_is_io_error() {
        let err = load_table(Path::new("/nonexistent/upload.csv")).unwrap_err();
        assert!(matches!(err, ClassifierError::Io(_)));
    }
}
