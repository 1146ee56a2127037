//! Read-only movie catalog: titles, genres and global median ratings.
//!
//! The catalog is built once at load time and shared immutably for the
//! whole run. Lookups are id-keyed with explicit "not found" results
//! instead of defaulting.

use crate::error::CatalogError;
use crate::types::{Movie, MovieId, Rating};
use rayon::prelude::*;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Matches titles of the form `"<Name>, The (<Year>)"` (also `An`/`A`)
static ARTICLE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.+), (?P<article>The|An|A) (?P<year>\(\d{4}\))$")
        .expect("article-suffix pattern is valid")
});

/// Rewrite a MovieLens title into its article-first form.
///
/// `"Matrix, The (1999)"` becomes `"The Matrix (1999)"`; exactly one
/// leading article is extracted. Titles that don't end in
/// `", The/An/A (YYYY)"` pass through unchanged, which also makes the
/// rewrite idempotent.
pub fn normalize_title(raw: &str) -> String {
    match ARTICLE_SUFFIX.captures(raw) {
        Some(caps) => format!("{} {} {}", &caps["article"], &caps["name"], &caps["year"]),
        None => raw.to_string(),
    }
}

/// Immutable lookup table over all movies plus per-movie median ratings.
#[derive(Debug)]
pub struct Catalog {
    movies: HashMap<MovieId, Movie>,
    /// Median of every rating the movie received across the full history
    global_ratings: HashMap<MovieId, f32>,
}

impl Catalog {
    /// Build the catalog from parsed movies and the full rating history.
    ///
    /// Medians are taken over the complete history, not just the training
    /// split, so they don't depend on the dataset seed. Computing them for
    /// every movie up front is the one data-parallel step in the loader.
    pub fn build(movies: Vec<Movie>, ratings: &[Rating]) -> Self {
        let mut values_by_movie: HashMap<MovieId, Vec<f32>> = HashMap::new();
        for rating in ratings {
            values_by_movie
                .entry(rating.movie_id)
                .or_default()
                .push(rating.rating);
        }

        let global_ratings = values_by_movie
            .into_par_iter()
            .map(|(movie_id, mut values)| (movie_id, median(&mut values)))
            .collect();

        Self {
            movies: movies.into_iter().map(|m| (m.id, m)).collect(),
            global_ratings,
        }
    }

    /// Normalized (article-first) title of a movie
    pub fn name(&self, movie_id: MovieId) -> Result<&str, CatalogError> {
        self.movies
            .get(&movie_id)
            .map(|m| m.normalized_title.as_str())
            .ok_or(CatalogError::NotFound(movie_id))
    }

    /// Genre list of a movie, in file order
    pub fn genres(&self, movie_id: MovieId) -> Result<&[String], CatalogError> {
        self.movies
            .get(&movie_id)
            .map(|m| m.genres.as_slice())
            .ok_or(CatalogError::NotFound(movie_id))
    }

    /// Median rating the movie received across the full history.
    ///
    /// `NotFound` for an unknown id, `NoRatings` for a known movie nobody
    /// rated.
    pub fn global_rating(&self, movie_id: MovieId) -> Result<f32, CatalogError> {
        if !self.movies.contains_key(&movie_id) {
            return Err(CatalogError::NotFound(movie_id));
        }
        self.global_ratings
            .get(&movie_id)
            .copied()
            .ok_or(CatalogError::NoRatings(movie_id))
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// Median of a non-empty value list (mean of the two middles when even)
fn median(values: &mut [f32]) -> f32 {
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}
