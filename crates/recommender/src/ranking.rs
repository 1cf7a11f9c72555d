//! Nearest-neighbour selection over the similarity matrix.
//!
//! ## Algorithm
//! 1. Read the queried movie's row of the matrix
//! 2. Drop the queried movie itself
//! 3. Sort by score descending, ties by ascending row index
//! 4. Keep the first `count`

use std::cmp::Ordering;

use catalog::Catalog;

/// A catalog row with its similarity to the queried movie
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    pub row_index: usize,
    pub score: f32,
}

impl ScoredCandidate {
    pub fn new(row_index: usize, score: f32) -> Self {
        Self { row_index, score }
    }
}

/// Descending score, then ascending row index
fn by_rank(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.row_index.cmp(&b.row_index))
}

/// Rank every other movie by similarity to the movie at `row`.
///
/// Returns at most `count` candidates, never including `row` itself. An
/// out-of-range `row` yields no candidates.
pub fn rank_similar(catalog: &Catalog, row: usize, count: usize) -> Vec<ScoredCandidate> {
    let Some(scores) = catalog.similarity().row(row) else {
        return Vec::new();
    };

    let mut candidates: Vec<ScoredCandidate> = scores
        .iter()
        .enumerate()
        .filter(|&(candidate, _)| candidate != row)
        .map(|(candidate, &score)| ScoredCandidate::new(candidate, score))
        .collect();

    if count < candidates.len() {
        // Only the top `count` need a full sort
        candidates.select_nth_unstable_by(count, by_rank);
        candidates.truncate(count);
    }
    candidates.sort_unstable_by(by_rank);
    candidates
}
