//! # Inference Crate
//!
//! The seam between the harness and whatever produces text completions.
//!
//! The core only needs one thing from a model backend: given an ordered
//! batch of prompts, return one free-text answer per prompt in the same
//! order. Real model serving lives behind this trait; the crate ships two
//! offline backends so a run is reproducible end to end without a model:
//!
//! - [`ScriptedCompletions`]: answers read from a file, one per line,
//!   matched to prompts by position (replay of a previous model run)
//! - [`ConstantCompletions`]: the same fixed answer for every prompt
//!   (smoke-testing the pipeline)
//!
//! The harness performs no retries: a backend failure or a response-count
//! mismatch is fatal for the run.

use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from a text-generation backend
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend must answer every prompt, in order
    #[error("Backend returned {actual} completions for {expected} prompts")]
    ResponseCountMismatch { expected: usize, actual: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, InferenceError>;

/// A batch text-generation backend.
///
/// Called exactly once per run with the full prompt batch. `batch_size`
/// is a hint for backends that chunk their work; whether and how they
/// parallelize internally is opaque to the harness.
pub trait TextGeneration {
    /// Human-readable backend name (for logging)
    fn name(&self) -> &str;

    /// Produce one completion per prompt, in prompt order.
    fn complete(&self, prompts: &[String], batch_size: usize) -> Result<Vec<String>>;
}

/// Replays completions recorded in a file, one per line, matched to
/// prompts by position.
pub struct ScriptedCompletions {
    completions: Vec<String>,
}

impl ScriptedCompletions {
    /// Load completions from a file with one answer per line.
    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading scripted completions from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Ok(Self {
            completions: contents.lines().map(str::to_string).collect(),
        })
    }

    pub fn new(completions: Vec<String>) -> Self {
        Self { completions }
    }
}

impl TextGeneration for ScriptedCompletions {
    fn name(&self) -> &str {
        "scripted"
    }

    fn complete(&self, prompts: &[String], batch_size: usize) -> Result<Vec<String>> {
        debug!(
            prompts = prompts.len(),
            batch_size, "Replaying scripted completions"
        );
        if self.completions.len() != prompts.len() {
            return Err(InferenceError::ResponseCountMismatch {
                expected: prompts.len(),
                actual: self.completions.len(),
            });
        }
        Ok(self.completions.clone())
    }
}

/// Answers every prompt with the same fixed text.
pub struct ConstantCompletions {
    answer: String,
}

impl ConstantCompletions {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

impl TextGeneration for ConstantCompletions {
    fn name(&self) -> &str {
        "constant"
    }

    fn complete(&self, prompts: &[String], batch_size: usize) -> Result<Vec<String>> {
        debug!(
            prompts = prompts.len(),
            batch_size, "Emitting constant completions"
        );
        Ok(vec![self.answer.clone(); prompts.len()])
    }
}
