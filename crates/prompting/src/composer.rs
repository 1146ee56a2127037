//! Assembles complete prompts: task question, optional context, optional
//! few-shot examples.

use crate::config::PromptConfig;
use crate::context::{movie_info, ContextRenderer};
use crate::error::{PromptError, Result};
use data_loader::{fmt_rating, Catalog, HistoryStore, MovieId, UserId};
use rand::Rng;

/// Builds one prompt string per evaluation case.
///
/// Holds shared references to the read-only catalog, history and run
/// configuration; all per-case state is the rng threaded through the
/// calls, so prompt generation is deterministic given the case order.
pub struct PromptComposer<'a> {
    catalog: &'a Catalog,
    history: &'a HistoryStore,
    config: &'a PromptConfig,
    renderer: ContextRenderer<'a>,
}

impl<'a> PromptComposer<'a> {
    pub fn new(catalog: &'a Catalog, history: &'a HistoryStore, config: &'a PromptConfig) -> Self {
        Self {
            catalog,
            history,
            config,
            renderer: ContextRenderer::new(catalog, history, config),
        }
    }

    /// The question the model is asked about one movie.
    ///
    /// Two template versions exist; both end in a question mark and embed
    /// the movie description (with the configured suffixes).
    pub fn task_description(&self, movie_id: MovieId) -> Result<String> {
        let info = movie_info(self.catalog, movie_id, self.config)?;
        match self.config.task_version {
            1 => Ok(format!(
                "On a scale of 0.5, 1, 1.5, 2, 2.5, 3, 3.5, 4, 4.5, 5, \
                 how would the user rate the movie {info}?"
            )),
            2 => Ok(format!(
                "How would the user rate the movie {info} \
                 on a scale of 0.5, 1, 1.5, 2, 2.5, 3, 3.5, 4, 4.5, 5.0?"
            )),
            version => Err(PromptError::UnknownTaskVersion { version }),
        }
    }

    /// Task question alone, or context + period + blank line + question
    /// when context is enabled.
    pub fn zero_shot_prompt<R: Rng>(
        &self,
        user_id: UserId,
        movie_id: MovieId,
        rng: &mut R,
    ) -> Result<String> {
        // The task description is built first so an unknown template
        // version fails before any sampling consumes rng state.
        let task = self.task_description(movie_id)?;

        if self.config.with_context {
            let context = self.renderer.render_context(user_id, rng)?;
            Ok(format!("{context}.\n\n{task}"))
        } else {
            Ok(task)
        }
    }

    /// Full prompt for one evaluation case: `shots` labeled examples drawn
    /// fresh from the training split, then the unlabeled target question.
    pub fn prompt<R: Rng>(
        &self,
        user_id: UserId,
        movie_id: MovieId,
        rng: &mut R,
    ) -> Result<String> {
        let mut prompt = String::new();

        if self.config.shots > 0 {
            let training = self.history.training();
            if self.config.shots > training.len() {
                return Err(PromptError::NotEnoughExamples {
                    requested: self.config.shots,
                    available: training.len(),
                });
            }

            let picked = rand::seq::index::sample(rng, training.len(), self.config.shots);
            for idx in picked.iter() {
                let example = training[idx];
                prompt.push_str(&self.zero_shot_prompt(example.user_id, example.movie_id, rng)?);
                prompt.push_str(&format!("\n{}\n\n\n", fmt_rating(example.rating)));
            }
        }

        prompt.push_str(&self.zero_shot_prompt(user_id, movie_id, rng)?);
        Ok(prompt)
    }
}
