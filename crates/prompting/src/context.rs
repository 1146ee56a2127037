//! Natural-language rendering of a user's rating history.
//!
//! Turns sampled preference sets into sentences like
//! `A user rated with 4.5 stars the movie "The Matrix (1999)".` that get
//! prepended to the task question as personalization context.

use crate::config::PromptConfig;
use crate::error::{PromptError, Result};
use crate::sampler::{rating_bounds, sample_rated_movies};
use data_loader::{fmt_rating, Catalog, HistoryStore, MovieId, UserId};
use rand::Rng;

/// Render one movie's description: quoted name plus the optional genre
/// and global-rating suffixes.
pub(crate) fn movie_info(
    catalog: &Catalog,
    movie_id: MovieId,
    config: &PromptConfig,
) -> Result<String> {
    let mut info = format!("\"{}\"", catalog.name(movie_id)?);
    if config.with_genre {
        info.push_str(&format!(" ({})", catalog.genres(movie_id)?.join("|")));
    }
    if config.with_global_rating {
        info.push_str(&format!(
            " (Average rating: {} stars out of 5)",
            fmt_rating(catalog.global_rating(movie_id)?)
        ));
    }
    Ok(info)
}

/// Renders like/dislike context blocks for a user.
pub struct ContextRenderer<'a> {
    catalog: &'a Catalog,
    history: &'a HistoryStore,
    config: &'a PromptConfig,
}

impl<'a> ContextRenderer<'a> {
    pub fn new(catalog: &'a Catalog, history: &'a HistoryStore, config: &'a PromptConfig) -> Self {
        Self {
            catalog,
            history,
            config,
        }
    }

    /// Render one block: a sentence per sampled movie, in sample order.
    ///
    /// The first sentence starts with `first_prefix` ("A" for the first
    /// block of a context); every later sentence in the block starts with
    /// "The". Each sentence ends in a period with no trailing space.
    pub fn render_block(
        &self,
        rating_value: f32,
        sample: &[MovieId],
        first_prefix: &str,
    ) -> Result<String> {
        let mut block = String::new();
        let mut prefix = first_prefix;
        for &movie_id in sample {
            let info = movie_info(self.catalog, movie_id, self.config)?;
            block.push_str(&format!(
                "{prefix} user rated with {} stars the movie {info}.",
                fmt_rating(rating_value)
            ));
            prefix = " The";
        }
        Ok(block)
    }

    /// Render the full context for a user: the likes block and the
    /// dislikes block (ordered by `likes_first`), skipping whichever came
    /// back empty, separated by a blank line.
    ///
    /// Fails with `EmptyContext` when both samples are empty; a context
    /// was requested and silently omitting it would change the prompt's
    /// meaning.
    pub fn render_context<R: Rng>(&self, user_id: UserId, rng: &mut R) -> Result<String> {
        let (max_rating, min_rating) = rating_bounds(self.history, user_id)
            .ok_or(PromptError::EmptyContext { user_id })?;

        // Likes are always drawn before dislikes so the rng call order
        // doesn't depend on the block ordering flag.
        let likes =
            sample_rated_movies(self.history, user_id, max_rating, self.config.likes_count, rng);
        let dislikes = sample_rated_movies(
            self.history,
            user_id,
            min_rating,
            self.config.dislikes_count,
            rng,
        );

        tracing::debug!(
            user_id,
            likes = likes.len(),
            dislikes = dislikes.len(),
            "Sampled preference context"
        );
        if likes.is_empty() && dislikes.is_empty() {
            return Err(PromptError::EmptyContext { user_id });
        }

        let mut blocks = [(max_rating, likes), (min_rating, dislikes)];
        if !self.config.likes_first {
            blocks.reverse();
        }

        let mut context = String::new();
        for (rating_value, sample) in &blocks {
            if sample.is_empty() {
                continue;
            }
            let first_prefix = if context.is_empty() { "A" } else { "\n\nThe" };
            context.push_str(&self.render_block(*rating_value, sample, first_prefix)?);
        }
        Ok(context)
    }
}
