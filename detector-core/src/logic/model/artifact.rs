//! Artifact Loading
//!
//! Reads the vectorizer/classifier files, fingerprints them and turns every
//! failure into a startup error.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::classifier::{Classifier, ClassifierArtifact};
use super::vectorizer::TfidfVectorizer;
use crate::error::{DetectorError, DetectorResult};

/// Where an artifact came from and what it looked like on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub path: PathBuf,
    pub sha256: String,
    pub size_bytes: usize,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

impl ArtifactInfo {
    /// Info for artifacts built in memory.
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::from("<memory>"),
            sha256: String::new(),
            size_bytes: 0,
            loaded_at: chrono::Utc::now(),
        }
    }
}

/// Read and deserialize one JSON artifact.
fn read_artifact<T: DeserializeOwned>(what: &'static str, path: &Path) -> DetectorResult<(T, ArtifactInfo)> {
    if !path.exists() {
        return Err(DetectorError::ArtifactMissing { what, path: path.to_path_buf() });
    }

    let corrupt = |reason: String| DetectorError::ArtifactCorrupt {
        what,
        path: path.to_path_buf(),
        reason,
    };

    let raw = std::fs::read(path).map_err(|e| corrupt(e.to_string()))?;
    let value: T = serde_json::from_slice(&raw).map_err(|e| corrupt(e.to_string()))?;

    let info = ArtifactInfo {
        path: path.to_path_buf(),
        sha256: hex::encode(Sha256::digest(&raw)),
        size_bytes: raw.len(),
        loaded_at: chrono::Utc::now(),
    };
    Ok((value, info))
}

/// Load and validate the vectorizer artifact.
pub fn load_vectorizer(path: &Path) -> DetectorResult<(TfidfVectorizer, ArtifactInfo)> {
    log::info!("Loading vectorizer from: {}", path.display());
    let (vectorizer, info): (TfidfVectorizer, _) = read_artifact("Vectorizer", path)?;
    vectorizer.validate().map_err(|reason| DetectorError::ArtifactCorrupt {
        what: "Vectorizer",
        path: path.to_path_buf(),
        reason,
    })?;
    log::info!(
        "Vectorizer loaded: {} terms, {} features, sha256 {}",
        vectorizer.vocabulary.len(),
        vectorizer.n_features(),
        &info.sha256[..12]
    );
    Ok((vectorizer, info))
}

/// Load and validate the classifier artifact.
pub fn load_classifier(path: &Path) -> DetectorResult<(Classifier, ArtifactInfo)> {
    log::info!("Loading classifier from: {}", path.display());
    let (artifact, info): (ClassifierArtifact, _) = read_artifact("Model", path)?;
    let classifier = Classifier::from_artifact(artifact).map_err(|reason| DetectorError::ArtifactCorrupt {
        what: "Model",
        path: path.to_path_buf(),
        reason,
    })?;
    log::info!(
        "Classifier loaded: {} ({:?}), sha256 {}",
        classifier.kind(),
        classifier.support(),
        &info.sha256[..12]
    );
    Ok((classifier, info))
}
