//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SEMSEARCH_*` environment
//! variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{CACHE_FILENAME, DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN};
use crate::embedding::EmbedderConfig;

/// Tool configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for the persisted vector cache. Default: `./.cache`.
    pub cache_dir: PathBuf,

    /// Path to the JSON document source. Default: `./data/documents.json`.
    pub documents_path: PathBuf,

    /// Directory holding the embedding model files, if configured.
    pub model_dir: Option<PathBuf>,

    /// Path to `tokenizer.json`, if configured separately.
    pub tokenizer_path: Option<PathBuf>,

    /// Output embedding dimension. Default: 384.
    pub embedding_dim: usize,

    /// Max tokens fed to the model per input. Default: 256.
    pub max_seq_len: usize,

    /// Run the embedder in deterministic stub mode (no model files).
    pub stub_embedder: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./.cache"),
            documents_path: PathBuf::from("./data/documents.json"),
            model_dir: None,
            tokenizer_path: None,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            stub_embedder: false,
        }
    }
}

impl Config {
    const ENV_CACHE_DIR: &'static str = "SEMSEARCH_CACHE_DIR";
    const ENV_DOCUMENTS: &'static str = "SEMSEARCH_DOCUMENTS";
    const ENV_EMBEDDING_DIM: &'static str = "SEMSEARCH_EMBEDDING_DIM";
    const ENV_MAX_SEQ_LEN: &'static str = "SEMSEARCH_MAX_SEQ_LEN";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let embedder_env = EmbedderConfig::from_env();

        Ok(Self {
            cache_dir: Self::parse_path(Self::ENV_CACHE_DIR, defaults.cache_dir),
            documents_path: Self::parse_path(Self::ENV_DOCUMENTS, defaults.documents_path),
            model_dir: Some(embedder_env.model_dir).filter(|p| !p.as_os_str().is_empty()),
            tokenizer_path: Some(embedder_env.tokenizer_path)
                .filter(|p| !p.as_os_str().is_empty()),
            embedding_dim: Self::parse_usize(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim)?,
            max_seq_len: Self::parse_usize(Self::ENV_MAX_SEQ_LEN, defaults.max_seq_len)?,
            stub_embedder: embedder_env.testing_stub,
        })
    }

    /// Full path of the vector cache file.
    pub fn cache_file(&self) -> PathBuf {
        self.cache_dir.join(CACHE_FILENAME)
    }

    /// Builds the embedder configuration this tool config implies.
    pub fn embedder_config(&self) -> EmbedderConfig {
        let mut config = match &self.model_dir {
            Some(dir) => EmbedderConfig::new(dir.clone()),
            None => EmbedderConfig::default(),
        };
        if let Some(tokenizer) = &self.tokenizer_path {
            config.tokenizer_path = tokenizer.clone();
        }
        config.embedding_dim = self.embedding_dim;
        config.max_seq_len = self.max_seq_len;
        config.testing_stub = self.stub_embedder;
        config
    }

    fn parse_path(name: &'static str, default: PathBuf) -> PathBuf {
        env::var(name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_usize(name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(name) {
            Ok(value) => {
                value
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or(ConfigError::InvalidValue { name, value })
            }
            Err(_) => Ok(default),
        }
    }
}
