//! Category prediction for transaction rows

use chrono::NaiveDate;
use polars::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::pipeline::model::TextPipeline;
use crate::pipeline::normalize::normalize;
use crate::pipeline::schema::{days_to_date, AMOUNT, CLEAN_TEXT, DATE, DESCRIPTION, PREDICTED_CATEGORY};

/// One coerced transaction row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub description: String,
}

/// A transaction with its clean text and predicted category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorizedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub clean_text: String,
    pub predicted_category: String,
}

/// Predict a category for every row. The model is only read.
pub fn predict_categories(
    model: &TextPipeline,
    rows: &[Transaction],
) -> Result<Vec<CategorizedTransaction>> {
    let clean: Vec<String> = rows
        .iter()
        .map(|r| normalize(Some(&r.description)))
        .collect();
    let predictions = model.predict(&clean)?;

    Ok(rows
        .iter()
        .cloned()
        .zip(clean)
        .zip(predictions)
        .map(|((transaction, clean_text), predicted_category)| CategorizedTransaction {
            transaction,
            clean_text,
            predicted_category,
        })
        .collect())
}

/// Read typed rows out of a coerced table (see `schema::coerce_types`).
pub fn transactions_from_frame(df: &DataFrame) -> Result<Vec<Transaction>> {
    let dates = df.column(DATE)?.cast(&DataType::Int32)?;
    let amounts = df.column(AMOUNT)?.cast(&DataType::Float64)?;
    let descriptions = df.column(DESCRIPTION)?.cast(&DataType::String)?;

    let rows = dates
        .i32()?
        .into_iter()
        .zip(amounts.f64()?.into_iter())
        .zip(descriptions.str()?.into_iter())
        .map(|((days, amount), desc)| Transaction {
            date: days.and_then(days_to_date),
            amount,
            description: desc.unwrap_or("").to_string(),
        })
        .collect();

    Ok(rows)
}

/// Append `clean_text` and `predicted_category` columns to a coerced table.
///
/// The input table is left untouched; the enriched copy is what gets exported.
pub fn categorize_frame(model: &TextPipeline, df: &DataFrame) -> Result<DataFrame> {
    let descriptions = df.column(DESCRIPTION)?.cast(&DataType::String)?;
    let clean: Vec<String> = descriptions.str()?.into_iter().map(normalize).collect();
    let predictions = model.predict(&clean)?;

    let mut out = df.clone();
    out.with_column(Column::new(CLEAN_TEXT.into(), clean))?;
    out.with_column(Column::new(PREDICTED_CATEGORY.into(), predictions))?;
    Ok(out)
}

/// Read categorized rows back out of a table produced by [`categorize_frame`].
pub fn categorized_from_frame(df: &DataFrame) -> Result<Vec<CategorizedTransaction>> {
    let transactions = transactions_from_frame(df)?;
    let clean = df.column(CLEAN_TEXT)?.cast(&DataType::String)?;
    let predicted = df.column(PREDICTED_CATEGORY)?.cast(&DataType::String)?;

    let rows = transactions
        .into_iter()
        .zip(clean.str()?.into_iter())
        .zip(predicted.str()?.into_iter())
        .map(|((transaction, clean_text), category)| CategorizedTransaction {
            transaction,
            clean_text: clean_text.unwrap_or("").to_string(),
            predicted_category: category.unwrap_or("").to_string(),
        })
        .collect();

    Ok(rows)
}
