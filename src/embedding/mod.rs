//! Embedding generation.
//!
//! [`TextEmbedder`] maps text to a fixed-dimension `f32` vector using a
//! local BERT-family model, or a deterministic stub when configured with
//! [`EmbedderConfig::stub`]. The store and ranker consume it through the
//! [`Embedder`] trait so tests can inject [`MockEmbedder`].

mod bert;
/// Embedder configuration.
pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;

#[cfg(any(test, feature = "mock"))]
mod mock;


pub use config::{DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN, EmbedderConfig};
pub use error::EmbeddingError;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;

use std::sync::Arc;

use candle_core::Device;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use bert::BertEncoder;
use device::select_device;

/// Interface to the embedding model: text in, fixed-length vector out.
///
/// Implementations must reject empty/whitespace-only input with
/// [`EmbeddingError::EmptyInput`] and keep the output dimension constant
/// for their lifetime.
pub trait Embedder {
    /// Embeds one text.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Output vector dimension.
    fn embedding_dim(&self) -> usize;
}

enum EmbedderBackend {
    Model {
        encoder: Arc<Mutex<BertEncoder>>,
        tokenizer: Arc<tokenizers::Tokenizer>,
    },
    Stub,
}

/// Embedding generator for semantic search (supports stub mode).
pub struct TextEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
    device: Device,
}

impl std::fmt::Debug for TextEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { .. } => "Model",
                    EmbedderBackend::Stub => "Stub",
                },
            )
            .field("device", &self.device)
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl TextEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let device = select_device()?;
        debug!(?device, "Selected compute device");

        if config.testing_stub {
            warn!("Embedder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
                device,
            });
        }

        if !config.model_available() || !config.tokenizer_available() {
            return Err(EmbeddingError::ModelNotFound {
                path: config.model_dir.clone(),
            });
        }

        let (encoder, tokenizer) = Self::load_model(&config, &device)?;

        info!(
            model_dir = %config.model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            hidden_size = encoder.hidden_size(),
            "Embedding model loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                encoder: Arc::new(Mutex::new(encoder)),
                tokenizer: Arc::new(tokenizer),
            },
            config,
            device,
        })
    }

    fn load_model(
        config: &EmbedderConfig,
        device: &Device,
    ) -> Result<(BertEncoder, tokenizers::Tokenizer), EmbeddingError> {
        let tokenizer = tokenizers::Tokenizer::from_file(&config.tokenizer_path).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {e}"),
            }
        })?;

        let encoder = BertEncoder::load(&config.model_dir, device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT model: {e}"),
            }
        })?;

        if config.embedding_dim > encoder.hidden_size() {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "embedding_dim ({}) exceeds model hidden_size ({})",
                    config.embedding_dim,
                    encoder.hidden_size()
                ),
            });
        }

        Ok((encoder, tokenizer))
    }

    fn embed_with_model(
        &self,
        text: &str,
        encoder: &Arc<Mutex<BertEncoder>>,
        tokenizer: &tokenizers::Tokenizer,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let mut tokens: Vec<u32> = encoding.get_ids().to_vec();
        if tokens.is_empty() {
            return Ok(vec![0.0; self.config.embedding_dim]);
        }

        if tokens.len() > self.config.max_seq_len {
            tokens.truncate(self.config.max_seq_len);
        }

        debug!(
            text_len = text.len(),
            token_count = tokens.len(),
            "Generating embedding"
        );

        let pooled = encoder
            .lock()
            .encode(&tokens)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Encoder forward pass failed: {e}"),
            })?;

        let embedding = pooled
            .narrow(0, 0, self.config.embedding_dim)?
            .to_vec1::<f32>()?;

        Ok(normalize(embedding))
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }
}

impl Embedder for TextEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        match &self.backend {
            EmbedderBackend::Model { encoder, tokenizer } => {
                self.embed_with_model(text, encoder, tokenizer)
            }
            EmbedderBackend::Stub => {
                debug!(text_len = text.len(), "Generating stub embedding");
                Ok(unit_vector_from_text(text, self.config.embedding_dim))
            }
        }
    }

    fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }
}

/// Deterministic hash-seeded unit vector for stub/mock embedding.
fn unit_vector_from_text(text: &str, dim: usize) -> Vec<f32> {
    use std::hash::{DefaultHasher, Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    let mut state = hasher.finish();

    let mut embedding = Vec::with_capacity(dim);
    for _ in 0..dim {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
        embedding.push(value);
    }

    normalize(embedding)
}

fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
