//! Composition root: one embedder, one repository, two operations.

mod error;

pub use error::EngineError;

use tracing::debug;

use crate::document::Document;
use crate::embedding::Embedder;
use crate::ranking::{SearchResult, SimilarityRanker};
use crate::store::{VectorRepository, VectorStore};

/// Façade over the store and ranker.
///
/// The only state it tracks is whether [`SearchEngine::index`] has run;
/// everything else is delegated.
pub struct SearchEngine<E: Embedder> {
    embedder: E,
    repository: VectorRepository,
    store: Option<VectorStore>,
}

impl<E: Embedder> SearchEngine<E> {
    pub fn new(embedder: E, repository: VectorRepository) -> Self {
        Self {
            embedder,
            repository,
            store: None,
        }
    }

    /// Loads or builds the embedding matrix for `documents`.
    pub fn index(&mut self, documents: Vec<Document>) -> Result<&VectorStore, EngineError> {
        let store = VectorStore::load_or_build(&self.embedder, documents, &self.repository)?;
        debug!(rows = store.len(), dim = store.dim(), "Index ready");
        Ok(self.store.insert(store))
    }

    /// Ranks indexed documents against `query`, returning at most `k` hits.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult<'_>>, EngineError> {
        let store = self.store.as_ref().ok_or(EngineError::NotIndexed)?;
        let ranker = SimilarityRanker::new(&self.embedder, store);
        Ok(ranker.search(query, k)?)
    }

    pub fn is_indexed(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Option<&VectorStore> {
        self.store.as_ref()
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }
}
