//! Detection Types
//!
//! Data only, no logic.

use serde::{Deserialize, Serialize};

use crate::logic::model::{ArtifactInfo, ConfidenceSupport, LABEL_DARK_PATTERN};

/// Label + confidence for one unit of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// 0 = benign, 1 = dark pattern
    pub label: u8,
    /// Probability of `label`, or 1.0 when the classifier has none
    pub confidence: f64,
}

impl Prediction {
    pub fn is_dark_pattern(&self) -> bool {
        self.label == LABEL_DARK_PATTERN
    }
}

/// Prediction for one page chunk, carrying the chunk's original text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkPrediction {
    pub text: String,
    pub label: u8,
    pub confidence: f64,
}

impl ChunkPrediction {
    pub fn new(text: impl Into<String>, prediction: Prediction) -> Self {
        Self {
            text: text.into(),
            label: prediction.label,
            confidence: prediction.confidence,
        }
    }

    pub fn is_dark_pattern(&self) -> bool {
        self.label == LABEL_DARK_PATTERN
    }
}

/// What the service loaded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model: ArtifactInfo,
    pub vectorizer: ArtifactInfo,
    pub classifier_kind: String,
    pub confidence_support: ConfidenceSupport,
    pub vocabulary_size: usize,
    pub n_features: usize,
    pub lemmatize: bool,
}
