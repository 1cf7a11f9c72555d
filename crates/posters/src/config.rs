use serde::Deserialize;
use std::time::Duration;

/// Poster resolution settings, loaded from `TMDB_*` environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct PosterConfig {
    /// TMDB API key
    pub api_key: String,

    /// Base URL of the movie metadata API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Locale tag sent with every metadata request
    #[serde(default = "default_language")]
    pub language: String,

    /// Base URL of the image CDN
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Size segment inserted between the image base URL and the poster path
    #[serde(default = "default_image_size")]
    pub image_size: String,

    /// Image shown when a movie has no poster or the lookup failed
    #[serde(default = "default_placeholder_url")]
    pub placeholder_url: String,

    /// Attempts per movie before falling back to the placeholder
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Wait before the first retry in milliseconds, doubled after each failure
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_IMAGE_SIZE: &str = "w500";
pub const DEFAULT_PLACEHOLDER_URL: &str = "https://via.placeholder.com/500x750?text=No+Image";
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 1000;

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_image_size() -> String {
    DEFAULT_IMAGE_SIZE.to_string()
}

fn default_placeholder_url() -> String {
    DEFAULT_PLACEHOLDER_URL.to_string()
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_initial_backoff_ms() -> u64 {
    DEFAULT_INITIAL_BACKOFF_MS
}

impl PosterConfig {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed("TMDB_")
            .from_env::<PosterConfig>()
            .map_err(|e| anyhow::anyhow!("Failed to load poster config: {}", e))
    }

    /// Configuration with every default and the given API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: default_api_base_url(),
            language: default_language(),
            image_base_url: default_image_base_url(),
            image_size: default_image_size(),
            placeholder_url: default_placeholder_url(),
            max_retries: default_max_retries(),
            timeout_ms: default_timeout_ms(),
            initial_backoff_ms: default_initial_backoff_ms(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<PosterConfig, envy::Error> {
        envy::prefixed("TMDB_").from_iter(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn test_defaults_only_need_api_key() {
        let config = from_pairs(&[("TMDB_API_KEY", "secret")]).unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.api_base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.language, "en-US");
        assert_eq!(config.image_base_url, "https://image.tmdb.org/t/p");
        assert_eq!(config.image_size, "w500");
        assert_eq!(
            config.placeholder_url,
            "https://via.placeholder.com/500x750?text=No+Image"
        );
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.initial_backoff(), Duration::from_secs(1));
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("TMDB_API_KEY", "secret"),
            ("TMDB_MAX_RETRIES", "5"),
            ("TMDB_IMAGE_SIZE", "w342"),
            ("TMDB_PLACEHOLDER_URL", "https://example.com/none.png"),
        ])
        .unwrap();

        assert_eq!(config.max_retries, 5);
        assert_eq!(config.image_size, "w342");
        assert_eq!(config.placeholder_url, "https://example.com/none.png");
    }

    #[test]
    fn test_missing_api_key() {
        assert!(from_pairs(&[]).is_err());
    }

    #[test]
    fn test_with_api_key_matches_env_defaults() {
        let built = PosterConfig::with_api_key("secret");
        let loaded = from_pairs(&[("TMDB_API_KEY", "secret")]).unwrap();

        assert_eq!(built.api_base_url, loaded.api_base_url);
        assert_eq!(built.placeholder_url, loaded.placeholder_url);
        assert_eq!(built.max_retries, loaded.max_retries);
        assert_eq!(built.timeout_ms, loaded.timeout_ms);
    }
}
