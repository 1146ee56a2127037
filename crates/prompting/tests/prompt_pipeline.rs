//! Integration test for the full prompt pipeline.
//!
//! Builds a small two-user history, splits it 50/50, and checks that the
//! prompt generated for every evaluation case carries that case's user
//! context (max-rated and min-rated movies only) followed by exactly one
//! task question.

use data_loader::{normalize_title, Catalog, HistoryStore, Movie, MovieId, Rating, UserId};
use prompting::{PromptComposer, PromptConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn movie(id: MovieId, title: &str, genres: &[&str]) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        normalized_title: normalize_title(title),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

fn rating(user_id: UserId, movie_id: MovieId, value: f32) -> Rating {
    Rating {
        user_id,
        movie_id,
        rating: value,
    }
}

fn build_fixture() -> (Catalog, HistoryStore) {
    let movies = vec![
        movie(1, "Matrix, The (1999)", &["Action", "Sci-Fi"]),
        movie(2, "Heat (1995)", &["Action", "Crime"]),
        movie(3, "Toy Story (1995)", &["Animation", "Comedy"]),
        movie(4, "Fargo (1996)", &["Crime", "Drama"]),
        movie(5, "Clueless (1995)", &["Comedy", "Romance"]),
        movie(6, "Casino (1995)", &["Crime", "Drama"]),
    ];
    let ratings = vec![
        rating(1, 1, 5.0),
        rating(1, 2, 5.0),
        rating(1, 3, 1.0),
        rating(2, 4, 4.5),
        rating(2, 5, 2.0),
        rating(2, 6, 2.0),
    ];
    let catalog = Catalog::build(movies, &ratings);
    let history = HistoryStore::new(ratings, 0.5, 11).unwrap();
    (catalog, history)
}

#[test]
fn evaluation_prompts_carry_only_their_users_extremes() {
    let (catalog, history) = build_fixture();
    let config = PromptConfig::default(); // context on, likes first, shots 0
    config.validate().unwrap();
    let composer = PromptComposer::new(&catalog, &history, &config);

    let mut rng = StdRng::seed_from_u64(0);
    for case in history.evaluation() {
        let prompt = composer.prompt(case.user_id, case.movie_id, &mut rng).unwrap();

        // Exactly one task question, at the end, ending in a question mark
        assert_eq!(prompt.matches("how would the user rate").count(), 1);
        assert!(prompt.ends_with('?'));

        // The context only ever mentions the user's own max/min-rated
        // movies. User 1's extremes are 5.0 and 1.0; user 2's are 4.5
        // and 2.0. No sentence may describe the other user's history.
        let context = prompt.split("\n\nOn a scale of").next().unwrap();
        match case.user_id {
            1 => {
                assert!(context.contains("rated with 5.0 stars") || context.contains("rated with 1.0 stars"));
                assert!(!context.contains("rated with 4.5 stars"));
                assert!(!context.contains("rated with 2.0 stars"));
            }
            2 => {
                assert!(context.contains("rated with 4.5 stars") || context.contains("rated with 2.0 stars"));
                assert!(!context.contains("rated with 5.0 stars"));
                assert!(!context.contains("rated with 1.0 stars"));
            }
            other => panic!("unexpected user {other} in evaluation split"),
        }

        // Likes-first ordering: the context opens with the max-rated
        // block.
        match case.user_id {
            1 => assert!(context.starts_with("A user rated with 5.0 stars")),
            _ => assert!(context.starts_with("A user rated with 4.5 stars")),
        }
    }
}

#[test]
fn whole_runs_are_reproducible() {
    let (catalog, history) = build_fixture();
    let config = PromptConfig::default();
    let composer = PromptComposer::new(&catalog, &history, &config);

    let generate = || {
        let mut rng = StdRng::seed_from_u64(3);
        history
            .evaluation()
            .iter()
            .map(|case| composer.prompt(case.user_id, case.movie_id, &mut rng).unwrap())
            .collect::<Vec<_>>()
    };

    assert_eq!(generate(), generate());
}

#[test]
fn few_shot_examples_come_from_the_training_split() {
    let (catalog, history) = build_fixture();
    let config = PromptConfig {
        with_context: false,
        shots: 2,
        ..PromptConfig::default()
    };
    let composer = PromptComposer::new(&catalog, &history, &config);

    let mut rng = StdRng::seed_from_u64(0);
    let case = history.evaluation()[0];
    let prompt = composer.prompt(case.user_id, case.movie_id, &mut rng).unwrap();

    // Two labeled blocks plus the target question
    assert_eq!(prompt.matches("how would the user rate").count(), 3);

    // Every label is a training record's rating in canonical form
    for label_block in prompt.split("\n\n\n").take(2) {
        let label = label_block.rsplit('\n').next().unwrap();
        assert!(history
            .training()
            .iter()
            .any(|r| data_loader::fmt_rating(r.rating) == label));
    }
}
