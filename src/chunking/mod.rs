//! Overlapping token-window chunking.
//!
//! Long texts are split into windows of whitespace tokens before they go
//! to the embedder, whose input length is bounded. Windows may share
//! tokens when an overlap is configured.


use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("chunk_size must be positive")]
    InvalidChunkSize,
}

/// Splits `text` into windows of up to `chunk_size` whitespace tokens,
/// advancing by `chunk_size - overlap` tokens per window.
///
/// When `overlap >= chunk_size` the step is clamped to one token: the
/// sequence stays finite at the cost of many highly overlapping chunks.
/// Empty or whitespace-only input yields an empty sequence.
pub fn chunk(text: &str, chunk_size: usize, overlap: usize) -> Result<Chunks, ChunkError> {
    if chunk_size == 0 {
        return Err(ChunkError::InvalidChunkSize);
    }

    let tokens: Vec<String> = text.split_whitespace().map(str::to_owned).collect();

    Ok(Chunks {
        tokens,
        chunk_size,
        step: chunk_size.saturating_sub(overlap).max(1),
        start: 0,
        done: false,
    })
}

/// Lazy, finite chunk sequence. Each [`chunk`] call produces a fresh
/// iterator; nothing is shared between calls.
#[derive(Debug, Clone)]
pub struct Chunks {
    tokens: Vec<String>,
    chunk_size: usize,
    step: usize,
    start: usize,
    done: bool,
}

impl Iterator for Chunks {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done || self.start >= self.tokens.len() {
            return None;
        }

        let end = usize::min(self.start + self.chunk_size, self.tokens.len());
        let piece = self.tokens[self.start..end].join(" ");

        // The window that reaches the end of the token sequence is the last one.
        if self.start + self.chunk_size >= self.tokens.len() {
            self.done = true;
        }
        self.start += self.step;

        Some(piece)
    }
}
