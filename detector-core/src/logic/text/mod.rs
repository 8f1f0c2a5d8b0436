//! Text Module - Normalization before feature extraction
//!
//! ## Structure
//! - `resources`: local cache + one-time download of language data
//! - `stopwords`: English stop word set
//! - `lemmatizer`: WordNet-style noun lemmatizer
//! - `normalizer`: the cleaning pipeline itself

pub mod resources;
pub mod stopwords;
pub mod lemmatizer;
pub mod normalizer;

pub use resources::ResourceStore;
pub use stopwords::StopWords;
pub use lemmatizer::Lemmatizer;
pub use normalizer::TextNormalizer;
