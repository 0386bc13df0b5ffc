//! Pipeline module - cleaning, training and categorizing transactions

pub mod artifact;
pub mod inference;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod normalize;
pub mod schema;
pub mod split;
pub mod svm;
pub mod train;
pub mod vectorizer;

pub use artifact::{default_model_path, DEFAULT_MODEL_PATH};
pub use inference::*;
pub use loader::*;
pub use metrics::*;
pub use model::*;
pub use normalize::*;
pub use split::*;
pub use train::*;
