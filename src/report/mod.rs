//! Report module - training diagnostics and upload summaries

pub mod category_summary;
pub mod training_report;

pub use category_summary::*;
pub use training_report::*;
