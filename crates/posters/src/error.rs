use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while asking the metadata service for a poster.
///
/// These never leave the resolver: every failure is retried and finally
/// downgraded to the placeholder image.
#[derive(Error, Debug)]
pub enum PosterFetchError {
    #[error("Request to metadata service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Metadata service returned HTTP {status}")]
    Status { status: u16 },

    #[error("Metadata service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Invalid response from metadata service: {0}")]
    Decode(String),
}
