use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::StoreError;
use crate::constants::EMBEDDING_F32_BYTES;

/// On-disk home of the persisted vector matrix.
///
/// The format is headerless: `f32` cells in row-major order, row count
/// derived from the file length and the configured dimension. There is
/// no file locking; concurrent writers race and the last one wins
/// (single-user tool limitation).
#[derive(Debug, Clone)]
pub struct VectorRepository {
    path: PathBuf,
}

impl VectorRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads the matrix back, splitting rows by `dim`.
    ///
    /// Returns `Ok(None)` when no cache file exists. A file whose length
    /// is not a whole number of rows is reported as malformed rather
    /// than silently truncated.
    pub fn load(&self, dim: usize) -> Result<Option<Vec<Vec<f32>>>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = std::fs::read(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        let row_bytes = dim * EMBEDDING_F32_BYTES;
        if row_bytes == 0 || bytes.len() % row_bytes != 0 {
            return Err(StoreError::MalformedCache {
                path: self.path.clone(),
                len: bytes.len(),
                dim,
            });
        }

        let vectors: Vec<Vec<f32>> = bytes
            .chunks_exact(row_bytes)
            .map(bytemuck::pod_collect_to_vec::<u8, f32>)
            .collect();

        debug!(rows = vectors.len(), dim, path = %self.path.display(), "Loaded vector cache");
        Ok(Some(vectors))
    }

    /// Persists the matrix, creating parent directories as needed.
    pub fn save(&self, vectors: &[Vec<f32>]) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let row_bytes = vectors.first().map(|v| v.len()).unwrap_or(0) * EMBEDDING_F32_BYTES;
        let mut bytes = Vec::with_capacity(vectors.len() * row_bytes);
        for row in vectors {
            bytes.extend_from_slice(bytemuck::cast_slice(row.as_slice()));
        }

        std::fs::write(&self.path, &bytes).map_err(io_err)?;

        debug!(rows = vectors.len(), path = %self.path.display(), "Persisted vector cache");
        Ok(())
    }
}
