//! Spendwise: Expense Classification Library
//!
//! Cleans free-text bank transaction descriptions, trains a TF-IDF + linear
//! SVM text classifier on labeled spending, and categorizes uploaded
//! statements with the saved model.

pub mod cli;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use context::{AppContext, UploadOutcome};
pub use error::{ClassifierError, Result};
