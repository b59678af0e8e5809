//! Persisted document-embedding store.
//!
//! [`VectorStore`] holds one embedding per document, aligned index-for-index
//! with the document set. [`VectorRepository`] persists the matrix at an
//! explicit path so tests can redirect it.
//!
//! Freshness is judged by row count alone: a cached matrix whose row count
//! equals the current document count is served as-is, so content edits that
//! keep the count unchanged serve stale vectors until the cache file is
//! removed. This is a documented policy of the tool, not an oversight.

mod error;
mod repository;

#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use repository::VectorRepository;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::document::Document;
use crate::embedding::Embedder;

/// Document set plus its aligned embedding matrix.
///
/// Invariant: `vectors.len() == documents.len()` after any successful
/// build or load.
#[derive(Debug)]
pub struct VectorStore {
    documents: Vec<Document>,
    vectors: Vec<Vec<f32>>,
    by_id: HashMap<String, usize>,
    dim: usize,
}

impl VectorStore {
    /// Embeds every document in order and persists the matrix.
    ///
    /// The whole batch fails on the first embedding failure; no partial
    /// matrix is ever written.
    pub fn build<E: Embedder>(
        embedder: &E,
        documents: Vec<Document>,
        repository: &VectorRepository,
    ) -> Result<Self, StoreError> {
        let dim = embedder.embedding_dim();

        let mut vectors = Vec::with_capacity(documents.len());
        for doc in &documents {
            let vector = embedder.embed(&doc.embedding_input())?;
            if vector.len() != dim {
                return Err(StoreError::DimensionMismatch {
                    expected: dim,
                    actual: vector.len(),
                });
            }
            vectors.push(vector);
        }

        repository.save(&vectors)?;
        info!(rows = vectors.len(), dim, "Built document embedding matrix");

        Ok(Self::assemble(documents, vectors, dim))
    }

    /// Loads the persisted matrix when its row count matches the current
    /// document set, otherwise rebuilds from scratch.
    pub fn load_or_build<E: Embedder>(
        embedder: &E,
        documents: Vec<Document>,
        repository: &VectorRepository,
    ) -> Result<Self, StoreError> {
        let dim = embedder.embedding_dim();

        if let Some(vectors) = repository.load(dim)? {
            if vectors.len() == documents.len() {
                debug!(rows = vectors.len(), "Vector cache is fresh");
                return Ok(Self::assemble(documents, vectors, dim));
            }
            info!(
                cached_rows = vectors.len(),
                document_count = documents.len(),
                "Vector cache is stale, rebuilding"
            );
        }

        Self::build(embedder, documents, repository)
    }

    fn assemble(documents: Vec<Document>, vectors: Vec<Vec<f32>>, dim: usize) -> Self {
        let by_id = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| (doc.id.clone(), i))
            .collect();

        Self {
            documents,
            vectors,
            by_id,
            dim,
        }
    }

    /// Number of stored documents (equals the number of vectors).
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Embedding dimension of every stored vector.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    /// Looks up a document and its vector by id.
    pub fn get(&self, id: &str) -> Option<(&Document, &[f32])> {
        let &index = self.by_id.get(id)?;
        Some((&self.documents[index], self.vectors[index].as_slice()))
    }
}
