//! Parsers for the two catalog artifacts.
//!
//! - movies.json: column-oriented table `{"movie_id": [...], "title": [...]}`
//! - similarity.txt: one matrix row per line, values separated by whitespace
//!   and/or commas; blank lines and `#` comments are skipped

use crate::error::{LoadError, Result};
use crate::types::MovieId;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a whole artifact into memory, reporting a missing file explicitly
fn read_artifact(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => LoadError::IoError(e),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Columns of the movie table. Any other column (tags, overview...) is ignored.
#[derive(Debug, Deserialize)]
struct MovieColumns {
    movie_id: Vec<MovieId>,
    title: Vec<String>,
}

/// Parse the movie table
///
/// Returns `(movie_id, title)` pairs in row order.
pub fn parse_movies(path: &Path) -> Result<Vec<(MovieId, String)>> {
    let content = read_artifact(path)?;
    parse_movies_str(&content, &file_name(path))
}

pub(crate) fn parse_movies_str(content: &str, file: &str) -> Result<Vec<(MovieId, String)>> {
    let columns: MovieColumns = serde_json::from_str(content).map_err(|source| LoadError::Json {
        file: file.to_string(),
        source,
    })?;

    if columns.movie_id.len() != columns.title.len() {
        return Err(LoadError::ColumnLengthMismatch {
            movie_ids: columns.movie_id.len(),
            titles: columns.title.len(),
        });
    }
    if columns.movie_id.is_empty() {
        return Err(LoadError::Empty {
            file: file.to_string(),
        });
    }

    Ok(columns.movie_id.into_iter().zip(columns.title).collect())
}

/// Parse the similarity matrix
///
/// Only checks that every row has the same width as the first one; squareness
/// and alignment with the movie table are checked when the catalog is built.
pub fn parse_similarity(path: &Path) -> Result<Vec<Vec<f32>>> {
    let content = read_artifact(path)?;
    parse_similarity_str(&content, &file_name(path))
}

pub(crate) fn parse_similarity_str(content: &str, file: &str) -> Result<Vec<Vec<f32>>> {
    let mut rows: Vec<Vec<f32>> = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('#') {
            continue;
        }

        let row = parse_row(line_trimmed).map_err(|reason| LoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason,
        })?;

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(LoadError::RowLengthMismatch {
                    line: line_no,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }

        rows.push(row);
    }

    if rows.is_empty() {
        return Err(LoadError::Empty {
            file: file.to_string(),
        });
    }
    Ok(rows)
}

/// Split one line into scores
///
/// Example: "1.0, 0.2 0.8" -> vec![1.0, 0.2, 0.8]
fn parse_row(line: &str) -> std::result::Result<Vec<f32>, String> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f32>()
                .map_err(|e| format!("Invalid score '{}': {}", s, e))
        })
        .collect()
}
