//! # Prompting Crate
//!
//! Deterministic prompt synthesis for the rating-prediction harness:
//!
//! - **sampler**: seeded draws from a user's rating history
//! - **context**: natural-language rendering of likes/dislikes
//! - **composer**: task question, context and few-shot assembly
//! - **config**: the one configuration value threaded through all of it
//!
//! Everything here is synchronous and free of hidden state; the only
//! cross-call dependency is the rng the caller threads through, so a
//! fixed seed plus a fixed case order reproduces every prompt exactly.

pub mod composer;
pub mod config;
pub mod context;
pub mod error;
pub mod sampler;

pub use composer::PromptComposer;
pub use config::PromptConfig;
pub use context::ContextRenderer;
pub use error::{PromptError, Result};
pub use sampler::{rating_bounds, sample_rated_movies};
