//! Content Module - HTML page → classifiable text chunks

pub mod rules;
pub mod extractor;

#[cfg(test)]
mod tests;

pub use rules::{ChunkLimits, MAX_CHUNKS, MAX_CHUNK_CHARS, MIN_CHUNK_CHARS, MIN_CHUNK_WORDS};
pub use extractor::{collapse_whitespace, extract_chunks, split_sentences, ContentExtractor};
