//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use spendwise::pipeline::train::LabeledExample;
use std::path::PathBuf;
use tempfile::TempDir;

/// Five spending categories with ten descriptions each
pub fn labeled_descriptions() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Zomato order 10293", "Food"),
        ("Swiggy dinner txn 88231", "Food"),
        ("Dominos pizza debited", "Food"),
        ("Zomato lunch Rs. 450", "Food"),
        ("Swiggy instamart groceries", "Food"),
        ("KFC meal transaction 4412", "Food"),
        ("Starbucks coffee", "Food"),
        ("Zomato gold renewal", "Food"),
        ("Swiggy breakfast order", "Food"),
        ("Dominos weekend pizza", "Food"),
        ("Myntra fashion sale", "Shopping"),
        ("Amazon order 402-991", "Shopping"),
        ("Flipkart big billion days", "Shopping"),
        ("Ajio shirt purchase", "Shopping"),
        ("Myntra shoes INR 2999", "Shopping"),
        ("Amazon electronics debited", "Shopping"),
        ("Flipkart mobile cover", "Shopping"),
        ("Nykaa cosmetics", "Shopping"),
        ("Ajio jeans sale", "Shopping"),
        ("Amazon household items", "Shopping"),
        ("Uber ride 5521", "Travel"),
        ("Ola cab airport", "Travel"),
        ("IRCTC train ticket", "Travel"),
        ("Uber trip office", "Travel"),
        ("Indigo flight booking", "Travel"),
        ("Ola auto ride", "Travel"),
        ("Rapido bike taxi", "Travel"),
        ("IRCTC tatkal booking", "Travel"),
        ("Uber intercity ride", "Travel"),
        ("Indigo web checkin", "Travel"),
        ("Electricity bill BESCOM", "Bills"),
        ("Airtel postpaid bill", "Bills"),
        ("Jio recharge 299", "Bills"),
        ("Water bill payment", "Bills"),
        ("BESCOM electricity credited refund", "Bills"),
        ("Airtel broadband bill", "Bills"),
        ("Gas cylinder bill", "Bills"),
        ("Jio fiber bill", "Bills"),
        ("Electricity bill late fee", "Bills"),
        ("Water tanker bill", "Bills"),
        ("Netflix subscription", "Entertainment"),
        ("Spotify premium", "Entertainment"),
        ("BookMyShow movie tickets", "Entertainment"),
        ("Netflix monthly plan", "Entertainment"),
        ("Hotstar subscription", "Entertainment"),
        ("PVR cinemas", "Entertainment"),
        ("Spotify family plan", "Entertainment"),
        ("BookMyShow concert", "Entertainment"),
        ("Prime video rental", "Entertainment"),
        ("PVR popcorn combo", "Entertainment"),
    ]
}

pub fn labeled_examples() -> Vec<LabeledExample> {
    labeled_descriptions()
        .into_iter()
        .map(|(d, c)| LabeledExample::new(d, c))
        .collect()
}

/// Labeled table with a date column that training ignores
pub fn create_labeled_dataframe() -> DataFrame {
    let rows = labeled_descriptions();
    let dates: Vec<String> = (0..rows.len())
        .map(|i| format!("2025-09-{:02}", i % 28 + 1))
        .collect();
    let descriptions: Vec<&str> = rows.iter().map(|(d, _)| *d).collect();
    let categories: Vec<&str> = rows.iter().map(|(_, c)| *c).collect();

    df! {
        "date" => dates,
        "description" => descriptions,
        "category" => categories,
    }
    .unwrap()
}

/// Create a temporary directory with a labeled training CSV
pub fn create_labeled_csv() -> (TempDir, PathBuf) {
    let mut df = create_labeled_dataframe();
    create_temp_csv(&mut df, "labeled.csv")
}

/// Create a temporary directory holding a CSV built from a DataFrame
pub fn create_temp_csv(df: &mut DataFrame, name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join(name);

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Write raw CSV text into a file inside an existing temp dir
pub fn write_raw_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// A small upload with one row that cannot be used
pub const UPLOAD_CSV: &str = "\
date,amount,description
2025-10-01,250.0,Zomato order 9999
2025-10-02,1499.0,Myntra fashion sale
2025-10-03,320,Uber ride to office
2025-10-04,not-a-number,Netflix subscription
2025-10-05,799,Netflix subscription
";

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}
