//! Error types for prompt construction.

use data_loader::{CatalogError, UserId};
use thiserror::Error;

/// Errors that can occur while building context and prompts
#[derive(Error, Debug)]
pub enum PromptError {
    /// Both the likes and the dislikes sample came back empty for a user
    /// whose context was requested. There is deliberately no fallback to
    /// nearby rating values, so this aborts the run.
    #[error("User {user_id} has no sampleable likes or dislikes")]
    EmptyContext { user_id: UserId },

    /// Task description template version that doesn't exist
    #[error("Unknown task description version {version} (known: 1, 2)")]
    UnknownTaskVersion { version: u8 },

    /// More few-shot examples requested than training records exist
    #[error("Requested {requested} few-shot examples but only {available} training records exist")]
    NotEnoughExamples { requested: usize, available: usize },

    /// Catalog lookup failed for a movie referenced by a rating record
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, PromptError>;
