//! # Data Loader Crate
//!
//! Loads the MovieLens `ml-latest-small` CSV files and exposes the two
//! read-only lookup structures the rest of the harness is built on:
//!
//! - **Catalog**: normalized titles, genres and global median ratings,
//!   keyed by movie id
//! - **HistoryStore**: all rating records, partitioned into training and
//!   evaluation subsets by a seeded draw
//!
//! Both are built once at load time and never mutated afterwards.

pub mod catalog;
pub mod error;
pub mod history;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use catalog::{normalize_title, Catalog};
pub use error::{CatalogError, DataLoadError, Result};
pub use history::HistoryStore;
pub use types::{fmt_rating, Movie, MovieId, Rating, UserId};

use std::path::Path;

/// Load `movies.csv` and `ratings.csv` from a dataset directory.
///
/// Returns the built catalog plus the full rating list in file order;
/// the caller decides how to split the history (seed and ratio live in
/// the run configuration, not here).
pub fn load_dataset(dir: &Path) -> Result<(Catalog, Vec<Rating>)> {
    let ratings = parser::parse_ratings(&dir.join("ratings.csv"))?;
    let movies = parser::parse_movies(&dir.join("movies.csv"))?;
    let catalog = Catalog::build(movies, &ratings);
    Ok((catalog, ratings))
}
