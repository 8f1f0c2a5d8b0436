//! Dark Pattern Detector - Core
//!
//! Classifies short UI texts as manipulative ("dark pattern") or benign and
//! rolls per-page results up into a risk tier.
//!
//! # Pipeline
//!
//! ```text
//!  text ──► TextNormalizer ──► TfidfVectorizer ──► Classifier ──► Prediction
//!
//!  html ──► ContentExtractor ──► [chunks] ──► DetectionService::predict_chunks
//!                                                   │
//!                                                   ▼
//!                                          risk::aggregate ──► DetectionSummary
//! ```

pub mod constants;
pub mod config;
pub mod error;
pub mod logic;

pub use config::{DetectorConfig, ResourceConfig};
pub use error::{DetectorError, DetectorResult, ErrorKind};
pub use logic::content::{extract_chunks, ChunkLimits, ContentExtractor};
pub use logic::detection::{
    ChunkPrediction, DetectionService, ModelMetadata, Prediction, StatsSnapshot, EMPTY_TEXT_MESSAGE,
    NO_CHUNKS_MESSAGE,
};
pub use logic::model::ConfidenceSupport;
pub use logic::risk::{aggregate, summarize_single, DetectedText, DetectionSummary, RiskLevel};
pub use logic::text::TextNormalizer;

#[cfg(any(test, feature = "fixtures"))]
pub use logic::fixtures;
