//! # Catalog Crate
//!
//! This crate loads the fixed movie table and its precomputed similarity
//! matrix, and answers title lookups against them.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (CatalogEntry, SimilarityMatrix, Catalog)
//! - **parser**: Parse the movie table and the matrix artifacts
//! - **index**: Build and validate the catalog, title index
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_dir(Path::new("data"))?;
//!
//! let entry = catalog.find_by_title("avatar").unwrap();
//! let scores = catalog.similarity().row(entry.row_index).unwrap();
//! println!("{} has {} neighbours", entry.title, scores.len() - 1);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{LoadError, Result};
pub use index::{MOVIES_FILE, SIMILARITY_FILE};
pub use types::{normalize_title, Catalog, CatalogEntry, MovieId, SimilarityMatrix};
