//! Clients for the external movie metadata service.
//!
//! The resolver only needs one thing from the service: the poster path of a
//! movie. `MetadataClient` is that seam; `TmdbClient` is the HTTP
//! implementation.

use catalog::MovieId;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::PosterConfig;
use crate::error::PosterFetchError;

/// Source of poster metadata
#[async_trait::async_trait]
pub trait MetadataClient: Send + Sync {
    /// Fetch the poster path for a movie.
    ///
    /// `Ok(None)` means the service answered but has no poster for it.
    async fn poster_path(&self, movie_id: MovieId) -> Result<Option<String>, PosterFetchError>;

    /// Client name for logging
    fn name(&self) -> &'static str;
}

/// Subset of the movie details payload we care about
#[derive(Debug, Deserialize)]
struct MovieDetails {
    poster_path: Option<String>,
}

/// TMDB movie details client
#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
    timeout: Duration,
}

impl TmdbClient {
    pub fn new(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PosterFetchError> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key: api_key.into(),
            api_url: api_url.into(),
            language: language.into(),
            timeout,
        })
    }

    pub fn from_config(config: &PosterConfig) -> Result<Self, PosterFetchError> {
        Self::new(
            config.api_key.clone(),
            config.api_base_url.clone(),
            config.language.clone(),
            config.timeout(),
        )
    }

    fn movie_url(&self, movie_id: MovieId) -> String {
        format!("{}/movie/{}", self.api_url.trim_end_matches('/'), movie_id)
    }
}

#[async_trait::async_trait]
impl MetadataClient for TmdbClient {
    #[instrument(skip(self))]
    async fn poster_path(&self, movie_id: MovieId) -> Result<Option<String>, PosterFetchError> {
        let response = self
            .http_client
            .get(self.movie_url(movie_id))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PosterFetchError::Timeout(self.timeout)
                } else {
                    PosterFetchError::Transport(e)
                }
            })?;

        if !response.status().is_success() {
            return Err(PosterFetchError::Status {
                status: response.status().as_u16(),
            });
        }

        let details: MovieDetails = response
            .json()
            .await
            .map_err(|e| PosterFetchError::Decode(e.to_string()))?;

        debug!(movie_id, poster_path = ?details.poster_path, "Received movie details");

        Ok(details.poster_path.filter(|p| !p.trim().is_empty()))
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
