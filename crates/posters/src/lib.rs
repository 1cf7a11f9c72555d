//! Poster resolution for recommended movies.
//!
//! This crate turns movie ids into display-ready poster URLs. It handles:
//! - Talking to the movie metadata service (TMDB) over HTTP
//! - Caching every resolved URL for the lifetime of the process
//! - Retrying failed lookups with exponential backoff
//! - Falling back to a placeholder image when nothing else works

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod resolver;

pub use cache::PosterCache;
pub use client::{MetadataClient, TmdbClient};
pub use config::PosterConfig;
pub use error::PosterFetchError;
pub use resolver::{ImageUrls, PosterResolver, RetryPolicy};
