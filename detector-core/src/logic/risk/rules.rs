//! Risk Tier Thresholds
//!
//! Lower bounds are inclusive: a ratio of exactly 25.0 is Medium.

/// Minimum dark ratio (%) for Medium
pub const MEDIUM_RISK_MIN_RATIO: f64 = 25.0;

/// Minimum dark ratio (%) for High
pub const HIGH_RISK_MIN_RATIO: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    pub medium_min: f64,
    pub high_min: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium_min: MEDIUM_RISK_MIN_RATIO,
            high_min: HIGH_RISK_MIN_RATIO,
        }
    }
}

impl RiskThresholds {
    pub fn level_for(&self, dark_ratio: f64) -> super::types::RiskLevel {
        use super::types::RiskLevel;

        if dark_ratio >= self.high_min {
            RiskLevel::High
        } else if dark_ratio >= self.medium_min {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}
