//! Catalog building and validation.
//!
//! Turns the parsed artifacts into a `Catalog`:
//! - build one `CatalogEntry` per movie row
//! - check that the matrix is aligned with the movie table
//! - build the normalized-title lookup index (first row wins)

use crate::error::{LoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;
use tracing::{info, warn};

/// File name of the movie table inside a data directory
pub const MOVIES_FILE: &str = "movies.json";

/// File name of the similarity matrix inside a data directory
pub const SIMILARITY_FILE: &str = "similarity.txt";

impl Catalog {
    /// Load the catalog from its two artifacts.
    ///
    /// Both files are parsed in parallel, then the result is validated:
    /// any missing, malformed, or inconsistent artifact is a `LoadError`.
    pub fn load(movies_path: &Path, similarity_path: &Path) -> Result<Self> {
        info!(
            movies = %movies_path.display(),
            similarity = %similarity_path.display(),
            "Loading catalog"
        );

        let (movies, rows) = rayon::join(
            || parser::parse_movies(movies_path),
            || parser::parse_similarity(similarity_path),
        );
        let movies = movies?;
        let similarity = SimilarityMatrix::from_rows(rows?)?;

        let catalog = Self::from_movies(movies, similarity)?;
        info!("Loaded catalog with {} movies", catalog.len());
        Ok(catalog)
    }

    /// Load `movies.json` and `similarity.txt` from a data directory
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        Self::load(&data_dir.join(MOVIES_FILE), &data_dir.join(SIMILARITY_FILE))
    }

    /// Build a catalog from `(movie_id, title)` pairs given in row order
    pub fn from_movies(movies: Vec<(MovieId, String)>, similarity: SimilarityMatrix) -> Result<Self> {
        let entries = movies
            .into_iter()
            .enumerate()
            .map(|(row, (movie_id, title))| CatalogEntry::new(row, movie_id, title))
            .collect();
        Self::new(entries, similarity)
    }

    /// Build a catalog from prepared entries
    ///
    /// Fails when an entry's `row_index` doesn't match its position or when
    /// the matrix dimension differs from the number of entries.
    pub fn new(entries: Vec<CatalogEntry>, similarity: SimilarityMatrix) -> Result<Self> {
        if similarity.dim() != entries.len() {
            return Err(LoadError::DimensionMismatch {
                catalog: entries.len(),
                matrix: similarity.dim(),
            });
        }

        let mut title_index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if entry.row_index != position {
                return Err(LoadError::RowIndexMismatch {
                    position,
                    row_index: entry.row_index,
                });
            }

            match title_index.entry(entry.normalized_title.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
                Entry::Occupied(first) => {
                    warn!(
                        title = %entry.title,
                        first_row = *first.get(),
                        duplicate_row = position,
                        "Duplicate normalized title, lookups resolve to the first row"
                    );
                }
            }
        }

        Ok(Self {
            entries,
            similarity,
            title_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f32>>) -> SimilarityMatrix {
        SimilarityMatrix::from_rows(rows).unwrap()
    }

    fn sample_catalog() -> Catalog {
        Catalog::from_movies(
            vec![
                (1, "Avatar".to_string()),
                (2, "Titanic".to_string()),
                (3, "Inception".to_string()),
            ],
            matrix(vec![
                vec![1.0, 0.2, 0.8],
                vec![0.2, 1.0, 0.1],
                vec![0.8, 0.1, 1.0],
            ]),
        )
        .unwrap()
    }

    #[test]
    fn test_find_by_title_normalizes_input() {
        let catalog = sample_catalog();

        let entry = catalog.find_by_title("  AVATAR ").unwrap();
        assert_eq!(entry.row_index, 0);
        assert_eq!(entry.movie_id, 1);
        assert_eq!(entry.title, "Avatar");
    }

    #[test]
    fn test_find_by_title_round_trips_every_entry() {
        let catalog = sample_catalog();
        for entry in catalog.entries() {
            assert_eq!(catalog.find_by_title(&entry.title), Some(entry));
        }
    }

    #[test]
    fn test_find_by_title_is_exact() {
        let catalog = sample_catalog();
        assert!(catalog.find_by_title("Avat").is_none());
        assert!(catalog.find_by_title("Nonexistent Movie").is_none());
    }

    #[test]
    fn test_duplicate_titles_resolve_to_first_row() {
        let catalog = Catalog::from_movies(
            vec![
                (10, "Heat".to_string()),
                (11, "heat ".to_string()),
            ],
            matrix(vec![vec![1.0, 0.5], vec![0.5, 1.0]]),
        )
        .unwrap();

        let entry = catalog.find_by_title("HEAT").unwrap();
        assert_eq!(entry.row_index, 0);
        assert_eq!(entry.movie_id, 10);
        // The duplicate is still part of the catalog
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_all_titles_in_row_order() {
        let catalog = sample_catalog();
        assert_eq!(catalog.all_titles(), vec!["Avatar", "Titanic", "Inception"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalog = sample_catalog();
        let hits: Vec<_> = catalog.search("TAN").iter().map(|e| e.movie_id).collect();
        assert_eq!(hits, vec![2]);
        assert_eq!(catalog.search("").len(), 3);
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let err = Catalog::from_movies(
            vec![(1, "Avatar".to_string()), (2, "Titanic".to_string())],
            matrix(vec![vec![1.0]]),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            LoadError::DimensionMismatch { catalog: 2, matrix: 1 }
        ));
    }

    #[test]
    fn test_row_index_mismatch_is_rejected() {
        let entries = vec![CatalogEntry::new(0, 1, "Avatar"), CatalogEntry::new(5, 2, "Titanic")];
        let err = Catalog::new(entries, matrix(vec![vec![1.0, 0.0], vec![0.0, 1.0]])).unwrap_err();

        assert!(matches!(
            err,
            LoadError::RowIndexMismatch { position: 1, row_index: 5 }
        ));
    }

    #[test]
    fn test_non_square_matrix_is_rejected() {
        let err = SimilarityMatrix::from_rows(vec![vec![1.0, 0.2, 0.3], vec![0.2, 1.0, 0.3]])
            .unwrap_err();
        assert!(matches!(err, LoadError::RowLengthMismatch { .. }));
    }

    #[test]
    fn test_non_finite_score_is_rejected() {
        let err = SimilarityMatrix::from_rows(vec![vec![1.0, f32::NAN], vec![0.2, 1.0]])
            .unwrap_err();
        assert!(matches!(err, LoadError::NonFiniteScore { row: 0, column: 1 }));
    }

    #[test]
    fn test_matrix_accessors() {
        let m = matrix(vec![vec![1.0, 0.2], vec![0.3, 1.0]]);
        assert_eq!(m.dim(), 2);
        assert_eq!(m.row(1), Some(&[0.3, 1.0][..]));
        assert_eq!(m.get(0, 1), Some(0.2));
        assert!(m.row(2).is_none());
        assert!(m.get(0, 2).is_none());
    }
}
