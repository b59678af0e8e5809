use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::EmbeddingError;
use super::{Embedder, unit_vector_from_text};

/// Deterministic embedder for tests.
///
/// Produces the same unit vector for the same text, enforces the
/// empty-input contract, and counts `embed` calls so tests can assert
/// rebuild side effects. Clones share the counter.
#[derive(Debug, Clone)]
pub struct MockEmbedder {
    dim: usize,
    calls: Arc<AtomicUsize>,
}

impl MockEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of successful `embed` calls across all clones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Embedder for MockEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(unit_vector_from_text(text, self.dim))
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }
}
