//! Central Configuration Constants
//!
//! Single source of truth for pipeline defaults.
//! Environment overrides are read through the helpers at the bottom.

/// Classifier artifact file name
pub const MODEL_FILE_NAME: &str = "model.json";

/// Vectorizer artifact file name
pub const VECTORIZER_FILE_NAME: &str = "vectorizer.json";

/// Preferred artifact directory (relative to the model root)
pub const MODEL_SUBDIR: &str = "model";

/// Legacy artifact directory, checked when the preferred one has no file
pub const MODEL_SUBDIR_FALLBACK: &str = "Model";

/// Supported artifact format version
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Timeout for one language resource download (seconds)
pub const RESOURCE_DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Stop word list path inside the resource store
pub const STOPWORDS_RESOURCE: &str = "stopwords/english";

/// WordNet noun index path inside the resource store
pub const LEXICON_RESOURCE: &str = "wordnet/index.noun";

/// WordNet noun exception list path inside the resource store
pub const LEXICON_EXCEPTIONS_RESOURCE: &str = "wordnet/noun.exc";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Root directory that holds `model/` (or `Model/`)
pub fn get_model_dir() -> std::path::PathBuf {
    std::env::var("MODEL_DIR")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
}

/// Explicit classifier artifact path, if set
pub fn get_model_path() -> Option<std::path::PathBuf> {
    std::env::var("MODEL_PATH").ok().map(std::path::PathBuf::from)
}

/// Explicit vectorizer artifact path, if set
pub fn get_vectorizer_path() -> Option<std::path::PathBuf> {
    std::env::var("VECTORIZER_PATH").ok().map(std::path::PathBuf::from)
}

/// Local cache directory for language resources
pub fn get_nlp_data_dir() -> std::path::PathBuf {
    std::env::var("NLP_DATA")
        .map(std::path::PathBuf::from)
        .ok()
        .or_else(|| dirs::cache_dir().map(|d| d.join("darkscan").join("nlp_data")))
        .unwrap_or_else(|| std::env::temp_dir().join("nlp_data"))
}

/// Base URL for language resource downloads, if configured
pub fn get_nlp_data_url() -> Option<String> {
    std::env::var("NLP_DATA_URL")
        .ok()
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
}

/// Check if lemmatization is enabled
pub fn is_lemmatize_enabled() -> bool {
    std::env::var("LEMMATIZE")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}
