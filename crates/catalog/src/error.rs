//! Error types for the catalog crate.
//!
//! Every failure while reading the movie table or the similarity matrix is
//! reported as a [`LoadError`]. None of them are recoverable: without a
//! consistent catalog no recommendation can be produced.

use thiserror::Error;

/// Errors that can occur while loading or validating the catalog artifacts
#[derive(Error, Debug)]
pub enum LoadError {
    /// Artifact file could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading an artifact
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The movie table is not valid JSON or does not have the expected columns
    #[error("Invalid JSON in {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// Line in the similarity file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The `movie_id` and `title` columns have different lengths
    #[error("Column length mismatch: {movie_ids} movie ids but {titles} titles")]
    ColumnLengthMismatch { movie_ids: usize, titles: usize },

    /// A similarity row doesn't have one value per catalog entry
    #[error("Expected {expected} values but found {found} in line {line}")]
    RowLengthMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Matrix dimension and catalog size disagree
    #[error("Similarity matrix is {matrix}x{matrix} but the catalog has {catalog} movies")]
    DimensionMismatch { catalog: usize, matrix: usize },

    /// A similarity score is NaN or infinite
    #[error("Non-finite similarity score at row {row}, column {column}")]
    NonFiniteScore { row: usize, column: usize },

    /// An entry's row index doesn't match its position in the catalog
    #[error("Entry at position {position} claims row index {row_index}")]
    RowIndexMismatch { position: usize, row_index: usize },

    /// Artifact contained no data
    #[error("No data found in {file}")]
    Empty { file: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, LoadError>;
