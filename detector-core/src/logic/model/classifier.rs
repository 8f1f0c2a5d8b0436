//! Binary Text Classifier
//!
//! Linear models exported from the training job. Whether a model can report
//! class probabilities is decided once, at load time, by its kind.

use serde::{Deserialize, Serialize};

use super::vectorizer::SparseVector;
use crate::constants::ARTIFACT_FORMAT_VERSION;
use crate::error::{DetectorError, DetectorResult};

/// Benign class label
pub const LABEL_BENIGN: u8 = 0;

/// Dark pattern class label
pub const LABEL_DARK_PATTERN: u8 = 1;

/// Fitted model weights, tagged by model kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinearModel {
    /// Sigmoid over `coef · x + intercept`.
    LogisticRegression { coef: Vec<f64>, intercept: f64 },
    /// Sign of `coef · x + intercept`; no probabilities.
    LinearSvc { coef: Vec<f64>, intercept: f64 },
    /// Joint log likelihood per class, softmax for probabilities.
    MultinomialNb {
        class_log_prior: [f64; 2],
        feature_log_prob: [Vec<f64>; 2],
    },
}

impl LinearModel {
    pub fn kind(&self) -> &'static str {
        match self {
            LinearModel::LogisticRegression { .. } => "logistic_regression",
            LinearModel::LinearSvc { .. } => "linear_svc",
            LinearModel::MultinomialNb { .. } => "multinomial_nb",
        }
    }

    fn n_features(&self) -> usize {
        match self {
            LinearModel::LogisticRegression { coef, .. } | LinearModel::LinearSvc { coef, .. } => {
                coef.len()
            }
            LinearModel::MultinomialNb { feature_log_prob, .. } => feature_log_prob[0].len(),
        }
    }

    fn weights_are_finite(&self) -> bool {
        match self {
            LinearModel::LogisticRegression { coef, intercept }
            | LinearModel::LinearSvc { coef, intercept } => {
                all_finite(coef) && intercept.is_finite()
            }
            LinearModel::MultinomialNb { class_log_prior, feature_log_prob } => {
                all_finite(&class_log_prior[..]) && feature_log_prob.iter().all(|row| all_finite(row))
            }
        }
    }
}

/// Classifier artifact as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub format_version: u32,
    pub classes: Vec<u8>,
    pub model: LinearModel,
}

/// Whether the classifier can report a probability for its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceSupport {
    Probabilistic,
    DecisionOnly,
}

/// Validated, immutable classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    model: LinearModel,
    support: ConfidenceSupport,
}

impl Classifier {
    pub fn from_artifact(artifact: ClassifierArtifact) -> Result<Self, String> {
        if artifact.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(format!(
                "unsupported format_version {} (expected {})",
                artifact.format_version, ARTIFACT_FORMAT_VERSION
            ));
        }
        if artifact.classes != [LABEL_BENIGN, LABEL_DARK_PATTERN] {
            return Err(format!("expected classes [0, 1], got {:?}", artifact.classes));
        }
        if let LinearModel::MultinomialNb { feature_log_prob, .. } = &artifact.model {
            if feature_log_prob[0].len() != feature_log_prob[1].len() {
                return Err(format!(
                    "feature_log_prob rows differ in width ({} vs {})",
                    feature_log_prob[0].len(),
                    feature_log_prob[1].len()
                ));
            }
        }
        if artifact.model.n_features() == 0 {
            return Err("model has no feature weights".to_string());
        }
        if !artifact.model.weights_are_finite() {
            return Err("model contains non-finite weights".to_string());
        }
        Ok(Self::new(artifact.model))
    }

    pub fn new(model: LinearModel) -> Self {
        let support = match model {
            LinearModel::LogisticRegression { .. } | LinearModel::MultinomialNb { .. } => {
                ConfidenceSupport::Probabilistic
            }
            LinearModel::LinearSvc { .. } => ConfidenceSupport::DecisionOnly,
        };
        Self { model, support }
    }

    pub fn support(&self) -> ConfidenceSupport {
        self.support
    }

    pub fn kind(&self) -> &'static str {
        self.model.kind()
    }

    /// Feature width the weights expect.
    pub fn n_features(&self) -> usize {
        self.model.n_features()
    }

    /// One label per row.
    pub fn predict(&self, rows: &[SparseVector]) -> DetectorResult<Vec<u8>> {
        rows.iter()
            .map(|row| {
                let label = match &self.model {
                    LinearModel::LogisticRegression { coef, intercept }
                    | LinearModel::LinearSvc { coef, intercept } => {
                        let score = checked(row.dot(coef) + intercept)?;
                        if score > 0.0 { LABEL_DARK_PATTERN } else { LABEL_BENIGN }
                    }
                    LinearModel::MultinomialNb { .. } => {
                        let [benign, dark] = self.joint_log_likelihood(row)?;
                        if dark > benign { LABEL_DARK_PATTERN } else { LABEL_BENIGN }
                    }
                };
                Ok(label)
            })
            .collect()
    }

    /// Class probabilities `[p(benign), p(dark)]` per row.
    ///
    /// Only valid for [`ConfidenceSupport::Probabilistic`] models.
    pub fn predict_proba(&self, rows: &[SparseVector]) -> DetectorResult<Vec<[f64; 2]>> {
        rows.iter()
            .map(|row| match &self.model {
                LinearModel::LogisticRegression { coef, intercept } => {
                    let p = sigmoid(checked(row.dot(coef) + intercept)?);
                    Ok([1.0 - p, p])
                }
                LinearModel::MultinomialNb { .. } => {
                    let [benign, dark] = self.joint_log_likelihood(row)?;
                    let max = benign.max(dark);
                    let (eb, ed) = ((benign - max).exp(), (dark - max).exp());
                    Ok([eb / (eb + ed), ed / (eb + ed)])
                }
                LinearModel::LinearSvc { .. } => Err(DetectorError::Inference(format!(
                    "{} does not report probabilities",
                    self.kind()
                ))),
            })
            .collect()
    }

    fn joint_log_likelihood(&self, row: &SparseVector) -> DetectorResult<[f64; 2]> {
        match &self.model {
            LinearModel::MultinomialNb { class_log_prior, feature_log_prob } => Ok([
                checked(class_log_prior[0] + row.dot(&feature_log_prob[0]))?,
                checked(class_log_prior[1] + row.dot(&feature_log_prob[1]))?,
            ]),
            _ => Err(DetectorError::Inference(format!(
                "{} has no joint likelihood",
                self.kind()
            ))),
        }
    }
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn checked(score: f64) -> DetectorResult<f64> {
    if score.is_finite() {
        Ok(score)
    } else {
        Err(DetectorError::Inference(format!("non-finite decision score {}", score)))
    }
}
