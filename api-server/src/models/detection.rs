//! Detection request/response models

use std::borrow::Cow;

use darkscan_core::{ConfidenceSupport, ModelMetadata, Prediction, StatsSnapshot};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Longest hostname accepted
const MAX_HOSTNAME_LEN: usize = 253;

// ============================================
// REQUESTS
// ============================================

/// Body of /analyze and /detect-from-text
#[derive(Debug, Deserialize, Validate)]
pub struct TextRequest {
    #[validate(custom(function = "validate_text"))]
    pub text: String,
}

/// Body of /detect-from-url
#[derive(Debug, Deserialize, Validate)]
pub struct UrlRequest {
    #[validate(custom(function = "validate_page_url"))]
    pub url: String,
}

impl UrlRequest {
    /// Copy with the URL trimmed and inner whitespace runs collapsed.
    pub fn normalized(&self) -> Self {
        Self {
            url: darkscan_core::logic::content::collapse_whitespace(&self.url),
        }
    }
}

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(validation_error("blank", darkscan_core::EMPTY_TEXT_MESSAGE));
    }
    Ok(())
}

fn validate_page_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Err(validation_error("blank", "URL cannot be empty"));
    }
    if !is_valid_page_url(url) {
        return Err(validation_error("url", "Invalid URL. Use http:// or https://"));
    }
    Ok(())
}

/// http(s) only, with a dotted ASCII hostname.
pub fn is_valid_page_url(raw: &str) -> bool {
    // Url::parse punycodes non-ASCII hosts, so check the host as typed
    if !raw_host(raw).is_some_and(str::is_ascii) {
        return false;
    }

    let Ok(parsed) = url::Url::parse(raw) else {
        return false;
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    match parsed.host_str() {
        Some(host) => is_valid_hostname(host),
        None => false,
    }
}

/// Host and port as written, between `://` (or `//`) and the path, without
/// userinfo.
fn raw_host(raw: &str) -> Option<&str> {
    let (_, rest) = raw.split_once("//")?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    Some(authority.rsplit('@').next().unwrap_or(authority))
}

fn is_valid_hostname(host: &str) -> bool {
    !host.is_empty()
        && host.len() <= MAX_HOSTNAME_LEN
        && host.contains('.')
        && host.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

// ============================================
// RESPONSES
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub prediction: u8,
    pub confidence: f64,
}

impl From<Prediction> for AnalyzeResponse {
    fn from(p: Prediction) -> Self {
        Self {
            prediction: p.label,
            confidence: p.confidence,
        }
    }
}

/// Loaded model as reported by /health. No filesystem paths.
#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub classifier_kind: String,
    pub confidence_support: ConfidenceSupport,
    pub vocabulary_size: usize,
    pub lemmatize: bool,
    pub model_sha256: String,
    pub vectorizer_sha256: String,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

impl From<&ModelMetadata> for ModelStatus {
    fn from(m: &ModelMetadata) -> Self {
        Self {
            classifier_kind: m.classifier_kind.clone(),
            confidence_support: m.confidence_support,
            vocabulary_size: m.vocabulary_size,
            lemmatize: m.lemmatize,
            model_sha256: m.model.sha256.clone(),
            vectorizer_sha256: m.vectorizer.sha256.clone(),
            loaded_at: m.model.loaded_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: i64,
    pub model: ModelStatus,
    pub inference: StatsSnapshot,
}
