//! Column validation and type coercion for transaction tables
//!
//! Coercion is lenient by construction: a date or amount that cannot be
//! parsed becomes null, and no row is ever removed here. Dropping invalid rows
//! is a separate, explicit step ([`drop_invalid_rows`]).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;

use crate::error::{ClassifierError, Result};

pub const DATE: &str = "date";
pub const AMOUNT: &str = "amount";
pub const DESCRIPTION: &str = "description";
pub const CATEGORY: &str = "category";
pub const CLEAN_TEXT: &str = "clean_text";
pub const PREDICTED_CATEGORY: &str = "predicted_category";

/// Columns an uploaded transaction file must carry.
pub const UPLOAD_COLUMNS: [&str; 3] = [DATE, AMOUNT, DESCRIPTION];

/// Columns a labeled training file must carry.
pub const TRAINING_COLUMNS: [&str; 2] = [DESCRIPTION, CATEGORY];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%b %d %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Check that every required column is present.
///
/// Returns a copy of the table on success; the input is never modified.
pub fn ensure_columns(df: &DataFrame, required: &[&str]) -> Result<DataFrame> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<String> = required
        .iter()
        .filter(|name| !present.iter().any(|p| p == *name))
        .map(|name| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(ClassifierError::MissingColumns {
            missing,
            expected: required.iter().map(|s| s.to_string()).collect(),
        });
    }

    Ok(df.clone())
}

/// Coerce the date, amount and description columns to their working types.
///
/// - `date` becomes a `Date` column; unparsable entries become null
/// - `amount` becomes `Float64`; unparsable or non-finite entries become null
/// - `description` becomes `String`; nulls become `""`
///
/// Columns that are absent are left alone, as is every other column.
pub fn coerce_types(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();

    if let Ok(col) = df.column(DATE) {
        out.with_column(coerce_dates(col)?)?;
    }
    if let Ok(col) = df.column(AMOUNT) {
        out.with_column(coerce_amounts(col)?)?;
    }
    if let Ok(col) = df.column(DESCRIPTION) {
        out.with_column(coerce_text(col)?)?;
    }

    Ok(out)
}

/// Remove rows whose amount is null or whose description is blank.
pub fn drop_invalid_rows(df: &DataFrame) -> Result<DataFrame> {
    let amounts = df.column(AMOUNT)?.f64()?;
    let descriptions = df.column(DESCRIPTION)?.str()?;

    let mask: BooleanChunked = amounts
        .into_iter()
        .zip(descriptions.into_iter())
        .map(|(amount, desc)| {
            Some(amount.is_some_and(f64::is_finite) && desc.is_some_and(|d| !d.trim().is_empty()))
        })
        .collect();

    Ok(df.filter(&mask)?)
}

/// Parse a date in any of the commonly exported bank statement formats.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Parse a plain decimal amount. Thousands separators and currency symbols
/// are not accepted.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Days since the Unix epoch, the physical representation of a polars `Date`.
pub fn date_to_days(date: NaiveDate) -> Option<i32> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    i32::try_from(date.signed_duration_since(epoch).num_days()).ok()
}

/// Inverse of [`date_to_days`].
pub fn days_to_date(days: i32) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    epoch.checked_add_signed(chrono::Duration::days(days as i64))
}

fn coerce_dates(col: &Column) -> Result<Series> {
    match col.dtype() {
        DataType::Date => Ok(col.as_materialized_series().clone()),
        DataType::Datetime(_, _) => Ok(col.cast(&DataType::Date)?.as_materialized_series().clone()),
        _ => {
            let strings = col.cast(&DataType::String)?;
            let ca: Int32Chunked = strings
                .str()?
                .into_iter()
                .map(|v| v.and_then(parse_date).and_then(date_to_days))
                .collect();
            Ok(ca
                .with_name(col.name().clone())
                .into_series()
                .cast(&DataType::Date)?)
        }
    }
}

fn coerce_amounts(col: &Column) -> Result<Series> {
    if col.dtype().is_primitive_numeric() {
        let floats = col.cast(&DataType::Float64)?;
        let ca: Float64Chunked = floats
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect();
        return Ok(ca.with_name(col.name().clone()).into_series());
    }

    let strings = col.cast(&DataType::String)?;
    let ca: Float64Chunked = strings
        .str()?
        .into_iter()
        .map(|v| v.and_then(parse_amount))
        .collect();
    Ok(ca.with_name(col.name().clone()).into_series())
}

fn coerce_text(col: &Column) -> Result<Series> {
    let strings = col.cast(&DataType::String)?;
    let ca: StringChunked = strings
        .str()?
        .into_iter()
        .map(|v| Some(v.unwrap_or("")))
        .collect();
    Ok(ca.with_name(col.name().clone()).into_series())
}
