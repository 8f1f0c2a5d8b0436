//! Error types for the detection pipeline.

use std::path::PathBuf;

/// Coarse error class, used by the boundary to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent something the pipeline cannot work with.
    BadInput,
    /// Artifacts or resources are missing or broken; the service is not usable.
    Unavailable,
    /// Anything else. Details stay in the logs.
    Unexpected,
}

/// Errors raised by the detection pipeline.
#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    /// Input rejected before classification.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Nothing classifiable was found in the input.
    #[error("no content: {0}")]
    NoContent(String),

    /// An artifact file does not exist.
    #[error("{what} file not found: {}", path.display())]
    ArtifactMissing { what: &'static str, path: PathBuf },

    /// An artifact file exists but could not be read or deserialized.
    #[error("{what} artifact is corrupt ({}): {reason}", path.display())]
    ArtifactCorrupt {
        what: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// Artifacts loaded fine but do not fit together.
    #[error("artifact mismatch: {0}")]
    ArtifactMismatch(String),

    /// Language resources (stop words, lexicon) could not be obtained.
    #[error("language resource error: {0}")]
    Resource(String),

    /// The classifier produced an unusable result.
    #[error("inference failed: {0}")]
    Inference(String),
}

impl DetectorError {
    /// Caller-facing message for bad-input errors, without the variant prefix.
    pub fn input_message(&self) -> Option<&str> {
        match self {
            DetectorError::InvalidInput(msg) | DetectorError::NoContent(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DetectorError::InvalidInput(_) | DetectorError::NoContent(_) => ErrorKind::BadInput,
            DetectorError::ArtifactMissing { .. }
            | DetectorError::ArtifactCorrupt { .. }
            | DetectorError::ArtifactMismatch(_)
            | DetectorError::Resource(_) => ErrorKind::Unavailable,
            DetectorError::Inference(_) => ErrorKind::Unexpected,
        }
    }
}

/// Result type for pipeline operations.
pub type DetectorResult<T> = std::result::Result<T, DetectorError>;
