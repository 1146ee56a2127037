//! Core domain types for the MovieLens rating history.

use serde::Deserialize;

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

/// One rating a user gave a movie.
///
/// Deserialized straight from `ratings.csv` (header:
/// `userId,movieId,rating,timestamp`). The timestamp column exists in the
/// file but the harness never uses it, so it is not kept.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rating {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    /// Rating value on the half-star grid 0.5..=5.0
    pub rating: f32,
}

/// A movie from `movies.csv`.
#[derive(Debug, Clone)]
pub struct Movie {
    pub id: MovieId,
    /// Title exactly as it appears in the file, e.g. "Matrix, The (1999)"
    pub title: String,
    /// Article-first rewrite of `title`, derived once at load time
    pub normalized_title: String,
    /// Pipe-split genre list, in file order
    pub genres: Vec<String>,
}

/// Canonical string form of a rating value.
///
/// Whole values print with one decimal ("4.0"), fractional values print as
/// they are ("3.5", medians can produce "3.75"). Every place a rating
/// becomes text goes through here: context sentences, few-shot labels,
/// report cells and classification class labels, so that "4" and "4.0"
/// can never end up as two different class labels.
pub fn fmt_rating(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
