use std::path::PathBuf;
use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("vector cache I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed vector cache at {path}: {len} bytes is not a whole number of {dim}-dim rows")]
    MalformedCache {
        path: PathBuf,
        len: usize,
        dim: usize,
    },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}
