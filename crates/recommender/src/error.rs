use thiserror::Error;

/// Errors returned to callers of [`crate::Recommender::recommend`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// The requested title has no exact (normalized) match in the catalog
    #[error("Movie '{0}' not found in database!")]
    NotFound(String),
}
