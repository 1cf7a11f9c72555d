//! Recommender crate for the similar-movie engine.
//!
//! This crate ranks catalog movies by precomputed similarity and pairs each
//! result with a poster URL.

pub mod error;
pub mod ranking;
pub mod recommender;

pub use error::RecommendError;
pub use ranking::{ScoredCandidate, rank_similar};
pub use recommender::{DEFAULT_RECOMMENDATION_COUNT, Recommendation, Recommender};
