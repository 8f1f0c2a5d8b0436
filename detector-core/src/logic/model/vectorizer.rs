//! TF-IDF Vectorizer
//!
//! Inference-only port of a fitted TF-IDF vectorizer. The vocabulary and idf
//! weights come from the artifact and are never refit; tokens outside the
//! vocabulary are ignored.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::ARTIFACT_FORMAT_VERSION;

/// Word runs of two or more word characters.
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// Row normalization applied after idf weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
    None,
}

fn default_norm() -> Norm {
    Norm::L2
}

fn default_ngram_range() -> [usize; 2] {
    [1, 1]
}

/// One row of the feature matrix. Indices are sorted and unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
}

impl SparseVector {
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Dot product with a dense weight row. Out-of-range indices count as 0.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.indices
            .iter()
            .zip(&self.values)
            .filter_map(|(&i, &v)| dense.get(i).map(|w| w * v))
            .sum()
    }
}

/// Fitted TF-IDF vectorizer, as exported by the training job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    pub format_version: u32,
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: [usize; 2],
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub binary: bool,
    #[serde(default = "default_norm")]
    pub norm: Norm,
}

impl TfidfVectorizer {
    /// Check the fitted state is internally consistent.
    pub fn validate(&self) -> Result<(), String> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(format!(
                "unsupported format_version {} (expected {})",
                self.format_version, ARTIFACT_FORMAT_VERSION
            ));
        }
        let [lo, hi] = self.ngram_range;
        if lo == 0 || lo > hi {
            return Err(format!("invalid ngram_range [{}, {}]", lo, hi));
        }
        if self.idf.is_empty() {
            return Err("empty idf vector".to_string());
        }
        if let Some(i) = self.idf.iter().position(|v| !v.is_finite()) {
            return Err(format!("non-finite idf weight at column {}", i));
        }
        if let Some((term, col)) = self.vocabulary.iter().find(|(_, col)| **col >= self.idf.len()) {
            return Err(format!(
                "term {:?} maps to column {} but idf has {} entries",
                term,
                col,
                self.idf.len()
            ));
        }
        Ok(())
    }

    /// Width of every produced row.
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Vectorize a batch of (already normalized) documents.
    pub fn transform<S: AsRef<str>>(&self, docs: &[S]) -> Vec<SparseVector> {
        docs.iter().map(|doc| self.transform_one(doc.as_ref())).collect()
    }

    fn transform_one(&self, doc: &str) -> SparseVector {
        let lowered = doc.to_lowercase();
        let tokens: Vec<&str> = TOKEN_PATTERN.find_iter(&lowered).map(|m| m.as_str()).collect();

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for gram in word_ngrams(&tokens, self.ngram_range) {
            if let Some(&col) = self.vocabulary.get(&gram) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let (indices, mut values): (Vec<usize>, Vec<f64>) = counts
            .into_iter()
            .map(|(col, count)| {
                let tf = if self.binary {
                    1.0
                } else if self.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                (col, tf * self.idf[col])
            })
            .unzip();

        let norm = match self.norm {
            Norm::L2 => values.iter().map(|v| v * v).sum::<f64>().sqrt(),
            Norm::L1 => values.iter().map(|v| v.abs()).sum::<f64>(),
            Norm::None => 1.0,
        };
        if norm > 0.0 {
            values.iter_mut().for_each(|v| *v /= norm);
        }

        SparseVector { indices, values }
    }
}

/// Word n-grams for every n in the inclusive range, joined by one space.
fn word_ngrams(tokens: &[&str], [lo, hi]: [usize; 2]) -> Vec<String> {
    let mut grams = Vec::new();
    for n in lo..=hi {
        if n > tokens.len() {
            break;
        }
        grams.extend(tokens.windows(n).map(|window| window.join(" ")));
    }
    grams
}
