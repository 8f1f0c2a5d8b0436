//! Detector configuration

use std::path::PathBuf;

use crate::constants;

/// Where the language resources live and whether to use the lemmatizer.
#[derive(Debug, Clone)]
pub struct ResourceConfig {
    /// Local cache directory
    pub data_dir: PathBuf,
    /// Base URL used when the cache is cold
    pub remote_url: Option<String>,
    /// Lemmatize tokens after stop word removal
    pub lemmatize: bool,
}

impl ResourceConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: constants::get_nlp_data_dir(),
            remote_url: constants::get_nlp_data_url(),
            lemmatize: constants::is_lemmatize_enabled(),
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Root directory holding `model/` or `Model/`
    pub model_dir: PathBuf,
    /// Explicit classifier path (wins over `model_dir`)
    pub model_path: Option<PathBuf>,
    /// Explicit vectorizer path (wins over `model_dir`)
    pub vectorizer_path: Option<PathBuf>,
    pub resources: ResourceConfig,
}

impl DetectorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            model_dir: constants::get_model_dir(),
            model_path: constants::get_model_path(),
            vectorizer_path: constants::get_vectorizer_path(),
            resources: ResourceConfig::from_env(),
        }
    }

    /// Classifier artifact path after fallback resolution
    pub fn resolved_model_path(&self) -> PathBuf {
        self.model_path
            .clone()
            .unwrap_or_else(|| resolve_artifact(&self.model_dir, constants::MODEL_FILE_NAME))
    }

    /// Vectorizer artifact path after fallback resolution
    pub fn resolved_vectorizer_path(&self) -> PathBuf {
        self.vectorizer_path
            .clone()
            .unwrap_or_else(|| resolve_artifact(&self.model_dir, constants::VECTORIZER_FILE_NAME))
    }
}

/// `<root>/model/<file>` if it exists, else `<root>/Model/<file>`.
fn resolve_artifact(root: &std::path::Path, file_name: &str) -> PathBuf {
    let preferred = root.join(constants::MODEL_SUBDIR).join(file_name);
    if preferred.exists() {
        return preferred;
    }
    root.join(constants::MODEL_SUBDIR_FALLBACK).join(file_name)
}
