//! Query-time similarity ranking.
//!
//! Exact brute-force scoring: every stored vector is compared against the
//! query with cosine similarity, in `f64` so that scores do not drift with
//! the document count.

mod error;

#[cfg(test)]
mod tests;

pub use error::RankingError;

use std::cmp::Ordering;

use tracing::debug;

use crate::document::Document;
use crate::embedding::Embedder;
use crate::store::VectorStore;

/// One ranked hit. Scores live in `[-1, 1]`.
#[derive(Debug, Clone)]
pub struct SearchResult<'a> {
    pub score: f64,
    pub document: &'a Document,
}

/// Cosine of the angle between two vectors, accumulated in `f64`.
///
/// Defined as `0.0` when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Scores and orders stored documents against a query.
pub struct SimilarityRanker<'a, E: Embedder> {
    embedder: &'a E,
    store: &'a VectorStore,
}

impl<'a, E: Embedder> SimilarityRanker<'a, E> {
    pub fn new(embedder: &'a E, store: &'a VectorStore) -> Self {
        Self { embedder, store }
    }

    /// Embeds a query text. Empty/whitespace queries are rejected.
    pub fn embed_query(&self, text: &str) -> Result<Vec<f32>, RankingError> {
        let query = self.embedder.embed(text)?;

        if !self.store.is_empty() && query.len() != self.store.dim() {
            return Err(RankingError::DimensionMismatch {
                expected: self.store.dim(),
                actual: query.len(),
            });
        }

        Ok(query)
    }

    /// Returns the top `k` documents by descending similarity.
    ///
    /// The sort is stable, so equal scores keep document insertion order
    /// and output is deterministic. At most `min(k, document count)`
    /// results come back; `k == 0` yields none.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult<'a>>, RankingError> {
        let query_vector = self.embed_query(query)?;

        let mut results: Vec<SearchResult<'a>> = self
            .store
            .documents()
            .iter()
            .zip(self.store.vectors())
            .map(|(document, vector)| SearchResult {
                score: cosine_similarity(&query_vector, vector),
                document,
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(k);

        debug!(
            query_len = query.len(),
            k,
            returned = results.len(),
            "Ranked query against document set"
        );

        Ok(results)
    }
}
