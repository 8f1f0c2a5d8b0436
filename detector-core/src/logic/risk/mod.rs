//! Risk Module
//!
//! Per-chunk predictions → page totals, dark ratio and risk tier.

pub mod types;
pub mod rules;
pub mod aggregator;

pub use types::{DetectedText, DetectionSummary, RiskLevel};
pub use rules::{RiskThresholds, HIGH_RISK_MIN_RATIO, MEDIUM_RISK_MIN_RATIO};
pub use aggregator::{aggregate, aggregate_with_thresholds, dark_ratio, risk_level, summarize_single};
