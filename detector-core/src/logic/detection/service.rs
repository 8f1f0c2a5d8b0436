//! Detection Service
//!
//! Normalizer → Vectorizer → Classifier. Built once per process, then shared
//! read-only between requests.

use std::time::Instant;

use super::stats::{InferenceStats, StatsSnapshot};
use super::types::{ChunkPrediction, ModelMetadata, Prediction};
use crate::config::DetectorConfig;
use crate::error::{DetectorError, DetectorResult};
use crate::logic::content::extract_chunks;
use crate::logic::model::{
    load_classifier, load_vectorizer, ArtifactInfo, Classifier, ConfidenceSupport, TfidfVectorizer,
};
use crate::logic::risk::{aggregate, summarize_single, DetectionSummary};
use crate::logic::text::TextNormalizer;

/// Message for texts that are empty after trimming.
pub const EMPTY_TEXT_MESSAGE: &str = "Text cannot be empty";

/// Message for pages that yield no chunk.
pub const NO_CHUNKS_MESSAGE: &str = "No usable visible text chunks found on page";

/// Single-text and batch dark pattern prediction.
#[derive(Debug)]
pub struct DetectionService {
    normalizer: TextNormalizer,
    vectorizer: TfidfVectorizer,
    classifier: Classifier,
    metadata: ModelMetadata,
    stats: InferenceStats,
}

impl DetectionService {
    /// Load artifacts and language resources described by `config`.
    ///
    /// Any failure here is fatal: the service must not start without both
    /// artifacts.
    pub fn load(config: &DetectorConfig) -> DetectorResult<Self> {
        let normalizer = TextNormalizer::from_config(&config.resources)?;
        Self::load_with_normalizer(config, normalizer)
    }

    /// Load artifacts from disk with an already built normalizer.
    pub fn load_with_normalizer(config: &DetectorConfig, normalizer: TextNormalizer) -> DetectorResult<Self> {
        let (classifier, model_info) = load_classifier(&config.resolved_model_path())?;
        let (vectorizer, vectorizer_info) = load_vectorizer(&config.resolved_vectorizer_path())?;
        Self::assemble(normalizer, vectorizer, vectorizer_info, classifier, model_info)
    }

    /// Build from in-memory parts.
    pub fn new(
        normalizer: TextNormalizer,
        vectorizer: TfidfVectorizer,
        classifier: Classifier,
    ) -> DetectorResult<Self> {
        vectorizer.validate().map_err(DetectorError::ArtifactMismatch)?;
        Self::assemble(
            normalizer,
            vectorizer,
            ArtifactInfo::in_memory(),
            classifier,
            ArtifactInfo::in_memory(),
        )
    }

    fn assemble(
        normalizer: TextNormalizer,
        vectorizer: TfidfVectorizer,
        vectorizer_info: ArtifactInfo,
        classifier: Classifier,
        model_info: ArtifactInfo,
    ) -> DetectorResult<Self> {
        if classifier.n_features() != vectorizer.n_features() {
            return Err(DetectorError::ArtifactMismatch(format!(
                "classifier expects {} features but vectorizer produces {}",
                classifier.n_features(),
                vectorizer.n_features()
            )));
        }

        let metadata = ModelMetadata {
            model: model_info,
            vectorizer: vectorizer_info,
            classifier_kind: classifier.kind().to_string(),
            confidence_support: classifier.support(),
            vocabulary_size: vectorizer.vocabulary.len(),
            n_features: vectorizer.n_features(),
            lemmatize: normalizer.lemmatizes(),
        };

        log::info!(
            "Detection service ready: {} over {} features (lemmatize: {})",
            metadata.classifier_kind,
            metadata.n_features,
            metadata.lemmatize
        );

        Ok(Self {
            normalizer,
            vectorizer,
            classifier,
            metadata,
            stats: InferenceStats::default(),
        })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Classify one text. Rejecting empty input is the caller's job.
    pub fn predict(&self, text: &str) -> DetectorResult<Prediction> {
        let normalized = self.normalizer.normalize(text);
        let mut predictions = self.classify(&[normalized])?;
        predictions
            .pop()
            .ok_or_else(|| DetectorError::Inference("classifier returned no prediction".to_string()))
    }

    /// Classify page chunks in one batch.
    ///
    /// Output keeps input order. Chunks that normalize to nothing are left
    /// out; they carry no signal to classify.
    pub fn predict_chunks<S: AsRef<str>>(&self, chunks: &[S]) -> DetectorResult<Vec<ChunkPrediction>> {
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let (kept, normalized): (Vec<&str>, Vec<String>) = chunks
            .iter()
            .map(|chunk| (chunk.as_ref(), self.normalizer.normalize(chunk.as_ref())))
            .filter(|(_, normalized)| !normalized.trim().is_empty())
            .unzip();

        if normalized.is_empty() {
            log::debug!("All {} chunks normalized to empty text", chunks.len());
            return Ok(Vec::new());
        }

        let predictions = self.classify(&normalized)?;
        log::debug!(
            "Classified {}/{} chunks, {} flagged",
            predictions.len(),
            chunks.len(),
            predictions.iter().filter(|p| p.is_dark_pattern()).count()
        );

        Ok(kept
            .into_iter()
            .zip(predictions)
            .map(|(text, prediction)| ChunkPrediction::new(text, prediction))
            .collect())
    }

    /// Classify one submitted text as a one-item scan.
    pub fn summarize_text(&self, text: &str) -> DetectorResult<DetectionSummary> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DetectorError::InvalidInput(EMPTY_TEXT_MESSAGE.to_string()));
        }
        let prediction = self.predict(text)?;
        Ok(summarize_single(text, &prediction))
    }

    /// Extract chunks from a page, classify them and score the page.
    pub fn scan_html(&self, html: &str) -> DetectorResult<DetectionSummary> {
        let chunks = extract_chunks(html);
        if chunks.is_empty() {
            return Err(DetectorError::NoContent(NO_CHUNKS_MESSAGE.to_string()));
        }
        let predictions = self.predict_chunks(&chunks)?;
        Ok(aggregate(&predictions))
    }

    /// Vectorize + classify a batch of normalized documents.
    fn classify(&self, normalized: &[String]) -> DetectorResult<Vec<Prediction>> {
        let start = Instant::now();

        let rows = self.vectorizer.transform(normalized);
        let labels = self.classifier.predict(&rows)?;
        let probabilities = match self.classifier.support() {
            ConfidenceSupport::Probabilistic => Some(self.classifier.predict_proba(&rows)?),
            ConfidenceSupport::DecisionOnly => None,
        };

        let predictions = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| Prediction {
                label,
                confidence: probabilities
                    .as_ref()
                    .map(|p| p[i][label as usize])
                    .unwrap_or(1.0),
            })
            .collect::<Vec<_>>();

        self.stats.record(predictions.len(), start.elapsed());
        Ok(predictions)
    }
}
