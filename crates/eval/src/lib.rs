//! # Eval Crate
//!
//! Output interpretation for the harness: reduces free-text model answers
//! to numeric rating predictions and scores them against ground truth
//! (RMSE plus a per-class classification report).

pub mod error;
pub mod metrics;
pub mod parse;

pub use error::{EvalError, Result};
pub use metrics::{evaluate, ClassMetrics, ClassificationReport, Evaluation};
pub use parse::parse_prediction;
