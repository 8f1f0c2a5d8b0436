//! Logic Module - Detection pipeline
//!
//! ## Structure
//! - `text/` - Normalization (stop words, lemmatizer, resource cache)
//! - `model/` - Vectorizer + classifier artifacts
//! - `detection/` - Detection service (single text + batch)
//! - `content/` - HTML → text chunks
//! - `risk/` - Predictions → risk summary

pub mod text;
pub mod model;
pub mod detection;
pub mod content;
pub mod risk;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
