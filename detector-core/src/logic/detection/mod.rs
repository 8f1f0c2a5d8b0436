//! Detection Module
//!
//! Composes the text normalizer with the loaded artifacts into single-text
//! and batch prediction.

pub mod types;
pub mod stats;
pub mod service;


pub use types::{ChunkPrediction, ModelMetadata, Prediction};
pub use stats::{InferenceStats, StatsSnapshot};
pub use service::{DetectionService, EMPTY_TEXT_MESSAGE, NO_CHUNKS_MESSAGE};
