//! Parser for the MovieLens `ml-latest-small` CSV files.
//!
//! Two files make up the history source:
//! - `ratings.csv`: userId,movieId,rating,timestamp
//! - `movies.csv`:  movieId,title,genres
//!
//! Titles are quoted CSV (they can contain commas), so parsing goes
//! through the `csv` crate rather than hand-splitting lines. A malformed
//! row is a load-time error; the pipeline never sees partial records.

use crate::catalog::normalize_title;
use crate::error::{DataLoadError, Result};
use crate::types::{Movie, MovieId, Rating};
use serde::Deserialize;
use std::path::Path;

/// Raw row shape of `movies.csv` before normalization
#[derive(Debug, Deserialize)]
struct MovieRow {
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    title: String,
    genres: String,
}

fn csv_error(path: &Path, source: csv::Error) -> DataLoadError {
    DataLoadError::Csv {
        file: path.display().to_string(),
        source,
    }
}

/// Parse `ratings.csv` into rating records, in file order.
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_error(path, e))?;

    let mut ratings = Vec::new();
    for row in reader.deserialize() {
        let rating: Rating = row.map_err(|e| csv_error(path, e))?;
        ratings.push(rating);
    }

    Ok(ratings)
}

/// Parse `movies.csv` into movie records.
///
/// Title normalization (article-first rewrite) happens here, once per
/// movie; the genre string is split on `|` keeping file order.
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_error(path, e))?;

    let mut movies = Vec::new();
    for row in reader.deserialize() {
        let row: MovieRow = row.map_err(|e| csv_error(path, e))?;
        movies.push(Movie {
            id: row.movie_id,
            normalized_title: normalize_title(&row.title),
            title: row.title,
            genres: row.genres.split('|').map(str::to_string).collect(),
        });
    }

    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_ratings_in_file_order() {
        let path = write_temp(
            "dl_test_ratings.csv",
            "userId,movieId,rating,timestamp\n1,10,4.5,964982703\n2,10,2.0,964982931\n",
        );

        let ratings = parse_ratings(&path).unwrap();
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].user_id, 1);
        assert_eq!(ratings[0].movie_id, 10);
        assert_eq!(ratings[0].rating, 4.5);
        assert_eq!(ratings[1].user_id, 2);
    }

    #[test]
    fn parses_quoted_titles_and_splits_genres() {
        let path = write_temp(
            "dl_test_movies.csv",
            "movieId,title,genres\n1,\"American President, The (1995)\",Comedy|Drama|Romance\n",
        );

        let movies = parse_movies(&path).unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "American President, The (1995)");
        assert_eq!(movies[0].normalized_title, "The American President (1995)");
        assert_eq!(movies[0].genres, vec!["Comedy", "Drama", "Romance"]);
    }

    #[test]
    fn malformed_row_is_an_error() {
        let path = write_temp(
            "dl_test_bad_ratings.csv",
            "userId,movieId,rating,timestamp\n1,not-a-number,4.5,0\n",
        );

        assert!(parse_ratings(&path).is_err());
    }
}
