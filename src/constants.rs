//! Crate-wide constants.

/// Default embedding dimension (MiniLM-class sentence encoders).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Default maximum number of tokens fed to the model per input.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// File name of the persisted vector matrix inside the cache directory.
pub const CACHE_FILENAME: &str = "embeddings.bin";

/// Bytes per matrix cell (vectors are stored as `f32`).
pub const EMBEDDING_F32_BYTES: usize = std::mem::size_of::<f32>();
