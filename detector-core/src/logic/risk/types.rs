//! Risk Types

use serde::{Deserialize, Serialize};

/// Page risk tier derived from the dark ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A flagged text and how sure the classifier was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedText {
    pub text: String,
    pub confidence: f64,
}

/// Scan totals for one page or one submitted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSummary {
    pub total_contents_scanned: usize,
    pub total_dark_patterns_detected: usize,
    /// Percentage, rounded to 2 decimals
    pub dark_ratio: f64,
    pub risk_level: RiskLevel,
    pub detected_texts: Vec<DetectedText>,
}
