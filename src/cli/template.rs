//! `spendwise template`: write an example upload file

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use crate::pipeline::loader::write_csv;
use crate::pipeline::schema::{AMOUNT, DATE, DESCRIPTION};

/// Two rows in the upload layout
pub fn template_frame() -> Result<DataFrame> {
    let df = df! {
        DATE => ["2025-10-01", "2025-10-02"],
        AMOUNT => [250.0f64, 1499.0],
        DESCRIPTION => ["Zomato order 9999", "Myntra fashion sale"],
    }?;
    Ok(df)
}

pub fn run_template(output: &Path) -> Result<()> {
    let mut df = template_frame()?;
    write_csv(&mut df, output)
        .with_context(|| format!("Failed to write template to {}", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::schema::UPLOAD_COLUMNS;

    #[test]
    fn test_template_has_upload_columns() {
        let df = template_frame().unwrap();
        let names: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, UPLOAD_COLUMNS.to_vec());
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_run_template_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("example.csv");
        run_template(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("date,amount,description"));
        assert_eq!(lines.next(), Some("2025-10-01,250.0,Zomato order 9999"));
        assert_eq!(lines.next(), Some("2025-10-02,1499.0,Myntra fashion sale"));
    }
}
