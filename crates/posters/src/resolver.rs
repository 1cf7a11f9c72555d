//! # Poster Resolver
//!
//! Maps a movie id to a display-ready poster URL:
//! 1. Return the cached URL if this id was resolved before
//! 2. Ask the metadata service for the poster path, bounded by a timeout
//! 3. On failure, sleep and retry with exponential backoff
//! 4. Build `<image base>/<size>/<poster path>`, or fall back to the placeholder
//!
//! Resolution never fails: the worst outcome is the placeholder URL, which
//! is cached like any other result.

use std::sync::Arc;
use std::time::Duration;

use catalog::MovieId;
use tracing::{debug, instrument, warn};

use crate::cache::PosterCache;
use crate::client::{MetadataClient, TmdbClient};
use crate::config::{
    PosterConfig, DEFAULT_IMAGE_BASE_URL, DEFAULT_IMAGE_SIZE, DEFAULT_INITIAL_BACKOFF_MS,
    DEFAULT_MAX_RETRIES, DEFAULT_PLACEHOLDER_URL, DEFAULT_TIMEOUT_MS,
};
use crate::error::PosterFetchError;

/// How hard to try before giving up on a poster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_retries: u32,
    /// Upper bound on a single metadata request
    pub timeout: Duration,
    /// Wait after the first failure; doubled after each further failure
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            initial_backoff: Duration::from_millis(DEFAULT_INITIAL_BACKOFF_MS),
        }
    }
}

impl From<&PosterConfig> for RetryPolicy {
    fn from(config: &PosterConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            timeout: config.timeout(),
            initial_backoff: config.initial_backoff(),
        }
    }
}

impl RetryPolicy {
    /// Attempts actually made; zero is treated as a single attempt
    pub fn attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    /// Wait after failed attempt number `attempt` (1-based)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_backoff.saturating_mul(1u32 << exponent)
    }
}

/// Where poster images live and what to show when there is none
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    pub base_url: String,
    pub size: String,
    pub placeholder: String,
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            size: DEFAULT_IMAGE_SIZE.to_string(),
            placeholder: DEFAULT_PLACEHOLDER_URL.to_string(),
        }
    }
}

impl From<&PosterConfig> for ImageUrls {
    fn from(config: &PosterConfig) -> Self {
        Self {
            base_url: config.image_base_url.clone(),
            size: config.image_size.clone(),
            placeholder: config.placeholder_url.clone(),
        }
    }
}

impl ImageUrls {
    /// Full image URL for a poster path
    ///
    /// Example: "/abc.jpg" -> "https://image.tmdb.org/t/p/w500/abc.jpg"
    pub fn poster_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.size.trim_matches('/'),
            poster_path.trim_start_matches('/')
        )
    }
}

/// Resolves poster URLs through a metadata client, with caching and retry.
///
/// Cloning is cheap: clones share the client and the cache.
#[derive(Clone)]
pub struct PosterResolver {
    client: Arc<dyn MetadataClient>,
    cache: Arc<PosterCache>,
    images: ImageUrls,
    policy: RetryPolicy,
}

impl PosterResolver {
    pub fn new(
        client: Arc<dyn MetadataClient>,
        cache: Arc<PosterCache>,
        images: ImageUrls,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            client,
            cache,
            images,
            policy,
        }
    }

    /// Build a TMDB-backed resolver with a fresh cache
    pub fn from_config(config: &PosterConfig) -> Result<Self, PosterFetchError> {
        let client = TmdbClient::from_config(config)?;
        Ok(Self::new(
            Arc::new(client),
            Arc::new(PosterCache::new()),
            ImageUrls::from(config),
            RetryPolicy::from(config),
        ))
    }

    pub fn cache(&self) -> &PosterCache {
        &self.cache
    }

    pub fn placeholder(&self) -> &str {
        &self.images.placeholder
    }

    /// Poster URL for a movie: real image, or the placeholder
    pub async fn resolve(&self, movie_id: MovieId) -> String {
        self.cache
            .get_or_resolve(movie_id, || self.fetch_with_retry(movie_id))
            .await
    }

    #[instrument(skip(self), fields(client = self.client.name()))]
    async fn fetch_with_retry(&self, movie_id: MovieId) -> String {
        let attempts = self.policy.attempts();
        let mut attempt = 1;

        loop {
            match self.fetch_once(movie_id).await {
                Ok(Some(path)) => return self.images.poster_url(&path),
                Ok(None) => {
                    debug!(movie_id, "No poster available, using placeholder");
                    return self.images.placeholder.clone();
                }
                Err(e) if attempt < attempts => {
                    let backoff = self.policy.backoff_for(attempt);
                    debug!(
                        movie_id,
                        attempt,
                        error = %e,
                        "Poster fetch failed, retrying in {:?}",
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!(
                        movie_id,
                        attempts,
                        error = %e,
                        "Failed to fetch poster, using placeholder"
                    );
                    return self.images.placeholder.clone();
                }
            }
        }
    }

    async fn fetch_once(&self, movie_id: MovieId) -> Result<Option<String>, PosterFetchError> {
        tokio::time::timeout(self.policy.timeout, self.client.poster_path(movie_id))
            .await
            .map_err(|_| PosterFetchError::Timeout(self.policy.timeout))?
    }
}
