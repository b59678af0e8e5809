use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error("query dimension mismatch: store holds {expected}-dim vectors, query is {actual}-dim")]
    DimensionMismatch { expected: usize, actual: usize },
}
