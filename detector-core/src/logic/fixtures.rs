//! Hand-weighted fixture model for tests.
//!
//! Urgency/scarcity vocabulary pulls towards label 1, plain storefront
//! vocabulary towards label 0. Not trained; only meant to make pipeline
//! behaviour predictable.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::{ARTIFACT_FORMAT_VERSION, MODEL_FILE_NAME, MODEL_SUBDIR, VECTORIZER_FILE_NAME};
use crate::logic::detection::DetectionService;
use crate::logic::model::{Classifier, ClassifierArtifact, LinearModel, Norm, TfidfVectorizer};
use crate::logic::text::{StopWords, TextNormalizer};

/// Terms weighted towards "dark pattern".
pub const DARK_TERMS: &[&str] = &[
    "left", "stock", "buy", "gone", "hurry", "limited", "offer", "act", "miss",
    "last", "chance", "expires", "ending", "exclusive", "deal", "countdown",
    "people", "viewing", "selling", "fast", "forever", "time",
];

/// Terms weighted towards "benign".
pub const BENIGN_TERMS: &[&str] = &[
    "privacy", "policy", "contact", "shipping", "return", "account", "help",
    "terms", "service", "learn", "read", "article", "newsletter", "product",
    "description", "cotton", "size", "color", "delivery", "support", "team",
    "information", "welcome", "blog",
];

const TERM_WEIGHT: f64 = 3.0;
const INTERCEPT: f64 = -0.5;

fn vocabulary() -> impl Iterator<Item = &'static str> {
    DARK_TERMS.iter().chain(BENIGN_TERMS.iter()).copied()
}

fn weights() -> Vec<f64> {
    DARK_TERMS
        .iter()
        .map(|_| TERM_WEIGHT)
        .chain(BENIGN_TERMS.iter().map(|_| -TERM_WEIGHT))
        .collect()
}

pub fn vectorizer() -> TfidfVectorizer {
    let vocabulary = vocabulary()
        .enumerate()
        .map(|(i, term)| (term.to_string(), i))
        .collect::<std::collections::HashMap<_, _>>();
    let width = vocabulary.len();

    TfidfVectorizer {
        format_version: ARTIFACT_FORMAT_VERSION,
        vocabulary,
        idf: vec![1.0; width],
        ngram_range: [1, 1],
        sublinear_tf: false,
        binary: false,
        norm: Norm::L2,
    }
}

pub fn logistic_artifact() -> ClassifierArtifact {
    ClassifierArtifact {
        format_version: ARTIFACT_FORMAT_VERSION,
        classes: vec![0, 1],
        model: LinearModel::LogisticRegression { coef: weights(), intercept: INTERCEPT },
    }
}

pub fn svc_artifact() -> ClassifierArtifact {
    ClassifierArtifact {
        format_version: ARTIFACT_FORMAT_VERSION,
        classes: vec![0, 1],
        model: LinearModel::LinearSvc { coef: weights(), intercept: INTERCEPT },
    }
}

/// Stop words only, no lemmatizer.
pub fn normalizer() -> TextNormalizer {
    TextNormalizer::new(Arc::new(StopWords::english()), None)
}

/// Probabilistic fixture service.
pub fn service() -> DetectionService {
    DetectionService::new(
        normalizer(),
        vectorizer(),
        Classifier::new(logistic_artifact().model),
    )
    .expect("fixture artifacts fit together")
}

/// Decision-only fixture service.
pub fn decision_only_service() -> DetectionService {
    DetectionService::new(normalizer(), vectorizer(), Classifier::new(svc_artifact().model))
        .expect("fixture artifacts fit together")
}

/// Write the fixture pair under `<root>/model/`. Returns (model, vectorizer) paths.
pub fn write_artifacts(root: &Path, classifier: &ClassifierArtifact) -> std::io::Result<(PathBuf, PathBuf)> {
    let dir = root.join(MODEL_SUBDIR);
    std::fs::create_dir_all(&dir)?;

    let model_path = dir.join(MODEL_FILE_NAME);
    let vectorizer_path = dir.join(VECTORIZER_FILE_NAME);
    std::fs::write(&model_path, serde_json::to_vec_pretty(classifier)?)?;
    std::fs::write(&vectorizer_path, serde_json::to_vec_pretty(&vectorizer())?)?;

    Ok((model_path, vectorizer_path))
}
