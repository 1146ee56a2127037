//! Rating history store and the seeded training/evaluation split.

use crate::error::{DataLoadError, Result};
use crate::types::{Rating, UserId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

/// All rating records plus a seeded partition into training and
/// evaluation subsets.
///
/// The two subsets are disjoint and together cover the full history. The
/// partition is drawn once at construction time and is exactly
/// reproducible from the seed: the training subset is `floor(N * ratio)`
/// records drawn without replacement (kept in draw order), the evaluation
/// subset is the complement in file order.
#[derive(Debug)]
pub struct HistoryStore {
    training: Vec<Rating>,
    evaluation: Vec<Rating>,
    /// Full history per user, used for preference sampling. Bounds and
    /// like/dislike samples are taken over everything the user rated,
    /// regardless of the split.
    by_user: HashMap<UserId, Vec<Rating>>,
}

impl HistoryStore {
    /// Partition `ratings` with the given training ratio and seed.
    ///
    /// `training_ratio` must be in `(0, 1]`; anything else is rejected
    /// before any sampling happens.
    pub fn new(ratings: Vec<Rating>, training_ratio: f64, dataset_seed: u64) -> Result<Self> {
        if !(training_ratio > 0.0 && training_ratio <= 1.0) {
            return Err(DataLoadError::InvalidValue {
                field: "training_ratio".to_string(),
                value: training_ratio.to_string(),
            });
        }

        let mut rng = StdRng::seed_from_u64(dataset_seed);
        let training_size = (ratings.len() as f64 * training_ratio).floor() as usize;

        let picked = rand::seq::index::sample(&mut rng, ratings.len(), training_size);
        let mut in_training = vec![false; ratings.len()];
        let mut training = Vec::with_capacity(training_size);
        for idx in picked.iter() {
            in_training[idx] = true;
            training.push(ratings[idx]);
        }

        let evaluation = ratings
            .iter()
            .enumerate()
            .filter(|(idx, _)| !in_training[*idx])
            .map(|(_, r)| *r)
            .collect();

        let mut by_user: HashMap<UserId, Vec<Rating>> = HashMap::new();
        for rating in ratings {
            by_user.entry(rating.user_id).or_default().push(rating);
        }

        Ok(Self {
            training,
            evaluation,
            by_user,
        })
    }

    /// Training records, in draw order
    pub fn training(&self) -> &[Rating] {
        &self.training
    }

    /// Evaluation records, in original file order
    pub fn evaluation(&self) -> &[Rating] {
        &self.evaluation
    }

    /// Everything the user ever rated, in file order.
    ///
    /// Returns an empty slice for an unknown user.
    pub fn user_ratings(&self, user_id: UserId) -> &[Rating] {
        self.by_user
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Total record count across both subsets
    pub fn len(&self) -> usize {
        self.training.len() + self.evaluation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MovieId;

    fn rating(user_id: UserId, movie_id: MovieId, value: f32) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating: value,
        }
    }

    fn fixture(n: u32) -> Vec<Rating> {
        (0..n).map(|i| rating(i % 7, i, (i % 10) as f32 / 2.0 + 0.5)).collect()
    }

    fn key(r: &Rating) -> (UserId, MovieId) {
        (r.user_id, r.movie_id)
    }

    #[test]
    fn split_is_disjoint_and_covers_everything() {
        let store = HistoryStore::new(fixture(100), 0.8, 7).unwrap();

        assert_eq!(store.training().len(), 80);
        assert_eq!(store.evaluation().len(), 20);

        let mut seen: Vec<_> = store
            .training()
            .iter()
            .chain(store.evaluation())
            .map(key)
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 100);
    }

    #[test]
    fn split_is_reproducible_from_the_seed() {
        let a = HistoryStore::new(fixture(50), 0.6, 42).unwrap();
        let b = HistoryStore::new(fixture(50), 0.6, 42).unwrap();

        assert_eq!(
            a.training().iter().map(key).collect::<Vec<_>>(),
            b.training().iter().map(key).collect::<Vec<_>>()
        );
        assert_eq!(
            a.evaluation().iter().map(key).collect::<Vec<_>>(),
            b.evaluation().iter().map(key).collect::<Vec<_>>()
        );
    }

    #[test]
    fn different_seeds_draw_different_training_sets() {
        let a = HistoryStore::new(fixture(100), 0.5, 1).unwrap();
        let b = HistoryStore::new(fixture(100), 0.5, 2).unwrap();

        assert_ne!(
            a.training().iter().map(key).collect::<Vec<_>>(),
            b.training().iter().map(key).collect::<Vec<_>>()
        );
    }

    #[test]
    fn training_size_is_floored() {
        let store = HistoryStore::new(fixture(7), 0.5, 0).unwrap();
        assert_eq!(store.training().len(), 3);
        assert_eq!(store.evaluation().len(), 4);
    }

    #[test]
    fn ratio_of_one_puts_everything_in_training() {
        let store = HistoryStore::new(fixture(10), 1.0, 0).unwrap();
        assert_eq!(store.training().len(), 10);
        assert!(store.evaluation().is_empty());
    }

    #[test]
    fn out_of_range_ratio_is_rejected() {
        assert!(HistoryStore::new(fixture(10), 0.0, 0).is_err());
        assert!(HistoryStore::new(fixture(10), 1.2, 0).is_err());
        assert!(HistoryStore::new(fixture(10), -0.1, 0).is_err());
    }

    #[test]
    fn user_ratings_cover_the_full_history() {
        let store = HistoryStore::new(fixture(70), 0.5, 3).unwrap();
        // Every user appears 10 times in the fixture regardless of split
        assert_eq!(store.user_ratings(0).len(), 10);
        assert!(store.user_ratings(999).is_empty());
    }
}
