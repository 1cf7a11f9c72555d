//! # Recommender
//!
//! Coordinates a recommendation request:
//! 1. Resolve the requested title to a catalog row
//! 2. Rank the other rows by similarity
//! 3. Resolve a poster for every selected movie, concurrently
//! 4. Return the movies in ranked order

use std::sync::Arc;
use std::time::Instant;

use catalog::{Catalog, MovieId};
use posters::PosterResolver;
use tracing::{info, instrument, warn};

use crate::error::RecommendError;
use crate::ranking::{ScoredCandidate, rank_similar};

/// Number of recommendations returned when the caller doesn't ask for more
pub const DEFAULT_RECOMMENDATION_COUNT: usize = 10;

/// A recommended movie ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    /// Similarity to the queried movie
    pub score: f32,
    pub poster_url: String,
}

/// Similar-movie recommender over a shared catalog
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    posters: PosterResolver,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>, posters: PosterResolver) -> Self {
        Self { catalog, posters }
    }

    pub fn posters(&self) -> &PosterResolver {
        &self.posters
    }

    /// Recommend the `count` movies most similar to `title`.
    ///
    /// Fails only when the title is not in the catalog. Poster lookup
    /// problems show up as placeholder URLs, never as errors.
    #[instrument(skip(self))]
    pub async fn recommend(
        &self,
        title: &str,
        count: usize,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let start_time = Instant::now();

        let entry = self
            .catalog
            .find_by_title(title)
            .ok_or_else(|| RecommendError::NotFound(title.to_string()))?;
        info!(
            "Resolved '{}' to row {} (movie {})",
            title, entry.row_index, entry.movie_id
        );

        let ranked = rank_similar(&self.catalog, entry.row_index, count);
        let recommendations = self.attach_posters(ranked).await;

        info!(
            "Recommended {} movies for '{}' in {:.2?}",
            recommendations.len(),
            entry.title,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Resolve posters for the ranked candidates in parallel, keeping rank order
    async fn attach_posters(&self, ranked: Vec<ScoredCandidate>) -> Vec<Recommendation> {
        let mut pending = Vec::with_capacity(ranked.len());

        for candidate in ranked {
            let Some(entry) = self.catalog.entry(candidate.row_index) else {
                continue;
            };
            let resolver = self.posters.clone();
            let movie_id = entry.movie_id;
            let handle = tokio::spawn(async move { resolver.resolve(movie_id).await });
            pending.push((entry, candidate.score, handle));
        }

        let mut recommendations = Vec::with_capacity(pending.len());
        for (entry, score, handle) in pending {
            let poster_url = match handle.await {
                Ok(url) => url,
                Err(e) => {
                    warn!(movie_id = entry.movie_id, error = %e, "Poster task failed");
                    self.posters.placeholder().to_string()
                }
            };
            recommendations.push(Recommendation {
                movie_id: entry.movie_id,
                title: entry.title.clone(),
                score,
                poster_url,
            });
        }

        recommendations
    }
}
