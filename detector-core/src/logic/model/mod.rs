//! Model Module - Vectorizer + Classifier artifacts
//!
//! Inference only. Artifacts are loaded once, validated, then never mutated.

pub mod vectorizer;
pub mod classifier;
pub mod artifact;

pub use vectorizer::{Norm, SparseVector, TfidfVectorizer};
pub use classifier::{
    Classifier, ClassifierArtifact, ConfidenceSupport, LinearModel, LABEL_BENIGN, LABEL_DARK_PATTERN,
};
pub use artifact::{load_classifier, load_vectorizer, ArtifactInfo};
