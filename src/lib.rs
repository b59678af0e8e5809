//! Semsearch library crate (used by the CLI binary and integration tests).
//!
//! Semantic retrieval over a fixed document collection: documents are
//! embedded once into a persisted matrix, and queries are ranked against
//! every stored vector with exact cosine similarity.
//!
//! # Modules
//!
//! - [`embedding`] - the embedding interface ([`Embedder`]) and its local
//!   BERT implementation ([`TextEmbedder`])
//! - [`store`] - the persisted vector matrix and its count-based
//!   freshness check
//! - [`ranking`] - brute-force cosine scoring and top-k selection
//! - [`chunking`] - overlapping token windows for long texts
//! - [`engine`] - the [`SearchEngine`] façade composing the above
//! - [`document`] / [`config`] / [`constants`] - records, env-backed
//!   configuration, and shared defaults
//!
//! # Test/Mock Support
//!
//! [`MockEmbedder`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod chunking;
pub mod config;
pub mod constants;
pub mod document;
pub mod embedding;
pub mod engine;
pub mod ranking;
pub mod store;

pub use chunking::{ChunkError, Chunks, chunk};
pub use config::{Config, ConfigError};
pub use document::{Document, DocumentError, load_documents};
pub use embedding::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN, Embedder, EmbedderConfig, EmbeddingError,
    TextEmbedder,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use engine::{EngineError, SearchEngine};
pub use ranking::{RankingError, SearchResult, SimilarityRanker, cosine_similarity};
pub use store::{StoreError, VectorRepository, VectorStore};
