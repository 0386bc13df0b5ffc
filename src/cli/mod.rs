//! CLI module - argument parsing and command runners

pub mod args;
pub mod predict;
pub mod template;
pub mod train;

pub use args::{max_features_limit, Cli, Commands};
pub use predict::{run_predict, PredictArgs, PredictSummary};
pub use template::run_template;
pub use train::{run_train, TrainArgs};
