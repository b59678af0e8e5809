//! Document records and the JSON document source.
//!
//! The document set is loaded once per run and never mutated. The core
//! only ever reads documents; ownership stays with whoever loaded them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read document source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse document source {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("document at index {index} is missing a non-empty `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("duplicate document id: {id}")]
    DuplicateId { id: String },
}

/// One searchable document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique, stable key.
    pub id: String,
    pub title: String,
    pub description: String,
}

impl Document {
    /// The text fed to the embedding model for this document.
    pub fn embedding_input(&self) -> String {
        format!("{}: {}", self.title, self.description)
    }
}

/// Loads an ordered document set from a JSON array file.
///
/// Every document needs a non-empty `id` and `title`, and ids must be
/// unique across the set.
pub fn load_documents<P: AsRef<Path>>(path: P) -> Result<Vec<Document>, DocumentError> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let documents: Vec<Document> =
        serde_json::from_str(&content).map_err(|source| DocumentError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut seen = HashSet::new();
    for (index, doc) in documents.iter().enumerate() {
        if doc.id.trim().is_empty() {
            return Err(DocumentError::MissingField { index, field: "id" });
        }
        if doc.title.trim().is_empty() {
            return Err(DocumentError::MissingField {
                index,
                field: "title",
            });
        }
        if !seen.insert(doc.id.as_str()) {
            return Err(DocumentError::DuplicateId {
                id: doc.id.clone(),
            });
        }
    }

    debug!(count = documents.len(), path = %path.display(), "Loaded document set");
    Ok(documents)
}
