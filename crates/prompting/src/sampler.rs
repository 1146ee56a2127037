//! Seeded sampling of a user's rating history.

use data_loader::{HistoryStore, MovieId, UserId};
use rand::Rng;

/// Draw up to `limit` movies the user rated at exactly `rating_value`.
///
/// Returns `min(limit, matches)` movie ids without replacement, in random
/// draw order under the given rng. An empty result when nothing matches
/// the exact value is intentional: there is no fallback to nearby rating
/// values (the caller decides whether an empty sample is acceptable).
pub fn sample_rated_movies<R: Rng>(
    history: &HistoryStore,
    user_id: UserId,
    rating_value: f32,
    limit: usize,
    rng: &mut R,
) -> Vec<MovieId> {
    let matching: Vec<MovieId> = history
        .user_ratings(user_id)
        .iter()
        .filter(|r| r.rating == rating_value)
        .map(|r| r.movie_id)
        .collect();

    if matching.is_empty() {
        return Vec::new();
    }

    let amount = limit.min(matching.len());
    rand::seq::index::sample(rng, matching.len(), amount)
        .iter()
        .map(|idx| matching[idx])
        .collect()
}

/// The anchor rating values for a user's likes and dislikes.
///
/// Likes are sampled at the user's maximum rating, dislikes at the
/// minimum. When the user only ever gave one distinct value the dislike
/// anchor is forced to 0.0. No record rates 0.0, so the dislikes sample
/// comes back empty instead of duplicating the likes sample.
///
/// Returns `None` for a user with no ratings at all.
pub fn rating_bounds(history: &HistoryStore, user_id: UserId) -> Option<(f32, f32)> {
    let ratings = history.user_ratings(user_id);
    if ratings.is_empty() {
        return None;
    }

    let mut max = f32::MIN;
    let mut min = f32::MAX;
    for r in ratings {
        max = max.max(r.rating);
        min = min.min(r.rating);
    }

    if max == min {
        min = 0.0;
    }
    Some((max, min))
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Rating;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store(ratings: Vec<Rating>) -> HistoryStore {
        HistoryStore::new(ratings, 1.0, 0).unwrap()
    }

    fn rating(user_id: UserId, movie_id: MovieId, value: f32) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating: value,
        }
    }

    fn five_star_fixture() -> HistoryStore {
        store(vec![
            rating(1, 10, 5.0),
            rating(1, 11, 5.0),
            rating(1, 12, 5.0),
            rating(1, 13, 2.0),
            rating(2, 10, 3.0),
        ])
    }

    #[test]
    fn sample_length_is_min_of_limit_and_matches() {
        let history = five_star_fixture();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(sample_rated_movies(&history, 1, 5.0, 2, &mut rng).len(), 2);
        assert_eq!(sample_rated_movies(&history, 1, 5.0, 10, &mut rng).len(), 3);
        assert_eq!(sample_rated_movies(&history, 1, 2.0, 10, &mut rng).len(), 1);
    }

    #[test]
    fn no_exact_match_means_empty_sample() {
        let history = five_star_fixture();
        let mut rng = StdRng::seed_from_u64(0);

        // User 1 never rated anything 4.0; no nearby-value fallback
        assert!(sample_rated_movies(&history, 1, 4.0, 10, &mut rng).is_empty());
        assert!(sample_rated_movies(&history, 99, 5.0, 10, &mut rng).is_empty());
    }

    #[test]
    fn sample_has_no_duplicates_and_only_matching_movies() {
        let history = five_star_fixture();
        let mut rng = StdRng::seed_from_u64(7);

        let sample = sample_rated_movies(&history, 1, 5.0, 3, &mut rng);
        let mut sorted = sample.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
        for movie_id in sample {
            assert!((10..=12).contains(&movie_id));
        }
    }

    #[test]
    fn sampling_is_reproducible_from_the_seed() {
        let history = five_star_fixture();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        assert_eq!(
            sample_rated_movies(&history, 1, 5.0, 2, &mut a),
            sample_rated_movies(&history, 1, 5.0, 2, &mut b)
        );
    }

    #[test]
    fn bounds_are_max_and_min() {
        let history = five_star_fixture();
        assert_eq!(rating_bounds(&history, 1), Some((5.0, 2.0)));
    }

    #[test]
    fn single_valued_user_gets_zero_dislike_anchor() {
        let history = five_star_fixture();
        // User 2 only ever rated 3.0
        assert_eq!(rating_bounds(&history, 2), Some((3.0, 0.0)));
    }

    #[test]
    fn unknown_user_has_no_bounds() {
        let history = five_star_fixture();
        assert_eq!(rating_bounds(&history, 99), None);
    }
}
