//! Error types for output parsing and scoring.

use thiserror::Error;

/// Errors from interpreting model output and computing metrics
#[derive(Error, Debug)]
pub enum EvalError {
    /// The model answer contains no recognizable numeric rating token.
    /// Fatal for the whole batch: a partially scored run would produce a
    /// misleading report.
    #[error("No numeric rating token in model output: {text:?}")]
    NoNumericToken { text: String },

    /// Truth and prediction sequences must pair up one to one
    #[error("Length mismatch: {truth} truth values vs {predictions} predictions")]
    LengthMismatch { truth: usize, predictions: usize },

    /// Metrics over zero cases are meaningless
    #[error("Cannot evaluate an empty prediction set")]
    EmptyInput,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EvalError>;
