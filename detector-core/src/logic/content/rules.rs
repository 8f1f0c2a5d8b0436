//! Chunk Rules
//!
//! Thresholds that decide what counts as a classifiable chunk. Changing any
//! of these changes detection ratios for the same page.

/// Minimum chunk length (characters)
pub const MIN_CHUNK_CHARS: usize = 15;

/// Minimum chunk length (whitespace-delimited words)
pub const MIN_CHUNK_WORDS: usize = 3;

/// Longer chunks are truncated to this many characters
pub const MAX_CHUNK_CHARS: usize = 1200;

/// At most this many chunks per page, in document order
pub const MAX_CHUNKS: usize = 300;

/// Chunk filtering limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLimits {
    pub min_chars: usize,
    pub min_words: usize,
    pub max_chars: usize,
    pub max_chunks: usize,
}

impl Default for ChunkLimits {
    fn default() -> Self {
        Self {
            min_chars: MIN_CHUNK_CHARS,
            min_words: MIN_CHUNK_WORDS,
            max_chars: MAX_CHUNK_CHARS,
            max_chunks: MAX_CHUNKS,
        }
    }
}
