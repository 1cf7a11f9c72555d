//! Core domain types for the movie catalog.
//!
//! - `MovieId` is the identifier used by the external metadata service
//! - `CatalogEntry` is one movie, addressed by its row in the matrix
//! - `SimilarityMatrix` holds the precomputed pairwise scores
//! - `Catalog` ties the two together and owns the title lookup index

use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a movie in the external metadata service (TMDB)
pub type MovieId = u32;

// =============================================================================
// Catalog Entries
// =============================================================================

/// A single movie in the catalog.
///
/// `row_index` is the position of the movie on both axes of the
/// similarity matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub row_index: usize,
    pub movie_id: MovieId,
    /// Display title as authored in the movie table
    pub title: String,
    /// Lookup key derived from `title`, see [`normalize_title`]
    pub normalized_title: String,
}

impl CatalogEntry {
    pub fn new(row_index: usize, movie_id: MovieId, title: impl Into<String>) -> Self {
        let title = title.into();
        let normalized_title = normalize_title(&title);
        Self {
            row_index,
            movie_id,
            title,
            normalized_title,
        }
    }
}

/// Build the lookup key for a title: surrounding whitespace removed, lower-cased.
///
/// Example: "  The Dark Knight " -> "the dark knight"
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Dense square matrix of similarity scores, stored row-major.
///
/// `get(i, j)` is the similarity of entry `i` to entry `j`. Symmetry is not
/// required, but every value is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from its rows, checking that it is square and finite
    pub fn from_rows(rows: Vec<Vec<f32>>) -> crate::Result<Self> {
        let dim = rows.len();
        let mut scores = Vec::with_capacity(dim * dim);

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != dim {
                return Err(crate::LoadError::RowLengthMismatch {
                    line: row + 1,
                    expected: dim,
                    found: values.len(),
                });
            }
            if let Some(column) = values.iter().position(|v| !v.is_finite()) {
                return Err(crate::LoadError::NonFiniteScore { row, column });
            }
            scores.extend(values);
        }

        Ok(Self { dim, scores })
    }

    /// Number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Similarity scores of `row` against every entry, or `None` when out of range
    pub fn row(&self, row: usize) -> Option<&[f32]> {
        if row >= self.dim {
            return None;
        }
        let start = row * self.dim;
        Some(&self.scores[start..start + self.dim])
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f32> {
        self.row(row)?.get(column).copied()
    }
}

// =============================================================================
// Catalog - The In-Memory Movie Table
// =============================================================================

/// Immutable movie table paired with its similarity matrix.
///
/// Built once at startup and shared (usually behind an `Arc`) by every
/// recommendation request. Lookups borrow from the catalog.
#[derive(Debug)]
pub struct Catalog {
    pub(crate) entries: Vec<CatalogEntry>,
    pub(crate) similarity: SimilarityMatrix,
    /// Normalized title -> first row carrying that title
    pub(crate) title_index: HashMap<String, usize>,
}

impl Catalog {
    /// Number of movies in the catalog
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the entry stored at `row`
    pub fn entry(&self, row: usize) -> Option<&CatalogEntry> {
        self.entries.get(row)
    }

    /// All entries in row order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Find a movie by title.
    ///
    /// The input is normalized the same way entry titles were, and the first
    /// entry with an equal key is returned. No partial matching.
    pub fn find_by_title(&self, title: &str) -> Option<&CatalogEntry> {
        let key = normalize_title(title);
        self.title_index
            .get(&key)
            .and_then(|&row| self.entries.get(row))
    }

    /// Display titles in catalog order
    pub fn all_titles(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.title.as_str()).collect()
    }

    /// Entries whose normalized title contains `fragment` (case-insensitive), in row order
    pub fn search(&self, fragment: &str) -> Vec<&CatalogEntry> {
        let needle = normalize_title(fragment);
        self.entries
            .iter()
            .filter(|e| e.normalized_title.contains(&needle))
            .collect()
    }
}
