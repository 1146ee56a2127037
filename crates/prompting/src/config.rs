//! Run configuration for prompt construction.
//!
//! Every knob that shapes a prompt lives in one value that gets passed by
//! reference into the renderer and composer, instead of a long tail of
//! parallel bool/count arguments.

use crate::error::{PromptError, Result};

/// Prompt-shaping configuration for one run.
///
/// Together with the dataset content and the two seeds this fully
/// determines every generated prompt.
#[derive(Debug, Clone)]
pub struct PromptConfig {
    /// Prepend the user's likes/dislikes context to the question
    pub with_context: bool,
    /// Emit the likes block before the dislikes block
    pub likes_first: bool,
    /// Cap on how many liked movies get sampled into the context
    pub likes_count: usize,
    /// Cap on how many disliked movies get sampled into the context
    pub dislikes_count: usize,
    /// Which task description template to use (1 or 2)
    pub task_version: u8,
    /// Number of few-shot examples drawn from the training split per case
    pub shots: usize,
    /// Append the genre list to each movie description
    pub with_genre: bool,
    /// Append the global median rating to each movie description
    pub with_global_rating: bool,
}

impl PromptConfig {
    /// Reject configurations that would only fail mid-run.
    ///
    /// An unknown template version is a startup error; it must surface
    /// before any sampling work happens.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.task_version, 1 | 2) {
            return Err(PromptError::UnknownTaskVersion {
                version: self.task_version,
            });
        }
        Ok(())
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            with_context: true,
            likes_first: true,
            likes_count: 10,
            dislikes_count: 10,
            task_version: 1,
            shots: 0,
            with_genre: false,
            with_global_rating: false,
        }
    }
}
