//! Risk Aggregator
//!
//! Pure reduction of per-chunk predictions into a page summary.
//! Input: predictions that already went through empty-chunk exclusion.
//! Output: DetectionSummary

use super::rules::RiskThresholds;
use super::types::{DetectedText, DetectionSummary, RiskLevel};
use crate::logic::detection::{ChunkPrediction, Prediction};

/// Summarize predictions with the default thresholds.
pub fn aggregate(predictions: &[ChunkPrediction]) -> DetectionSummary {
    aggregate_with_thresholds(predictions, &RiskThresholds::default())
}

pub fn aggregate_with_thresholds(
    predictions: &[ChunkPrediction],
    thresholds: &RiskThresholds,
) -> DetectionSummary {
    let detected_texts: Vec<DetectedText> = predictions
        .iter()
        .filter(|p| p.is_dark_pattern())
        .map(|p| DetectedText {
            text: p.text.clone(),
            confidence: p.confidence,
        })
        .collect();

    let total_contents_scanned = predictions.len();
    let total_dark_patterns_detected = detected_texts.len();
    let ratio = dark_ratio(total_dark_patterns_detected, total_contents_scanned);

    DetectionSummary {
        total_contents_scanned,
        total_dark_patterns_detected,
        dark_ratio: ratio,
        risk_level: thresholds.level_for(ratio),
        detected_texts,
    }
}

/// Summary for a single submitted text.
pub fn summarize_single(text: &str, prediction: &Prediction) -> DetectionSummary {
    aggregate(&[ChunkPrediction::new(text, *prediction)])
}

/// Percentage of flagged items, 2 decimals; 0.0 when nothing was scanned.
pub fn dark_ratio(detected: usize, scanned: usize) -> f64 {
    if scanned == 0 {
        return 0.0;
    }
    round2((detected as f64 / scanned as f64) * 100.0)
}

/// Tier for a ratio with the default thresholds.
pub fn risk_level(dark_ratio: f64) -> RiskLevel {
    RiskThresholds::default().level_for(dark_ratio)
}

/// Round to 2 decimals from the exact binary value, ties to even
/// (3.125 → 3.12, 9.375 → 9.38).
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chunk(text: &str, label: u8, confidence: f64) -> ChunkPrediction {
        ChunkPrediction { text: text.to_string(), label, confidence }
    }

    fn labelled(labels: &[u8]) -> Vec<ChunkPrediction> {
        labels
            .iter()
            .enumerate()
            .map(|(i, &label)| chunk(&format!("chunk {}", i), label, 0.9))
            .collect()
    }

    #[test]
    fn test_three_of_ten_is_medium() {
        let summary = aggregate(&labelled(&[0, 1, 0, 0, 1, 0, 0, 0, 1, 0]));

        assert_eq!(summary.total_contents_scanned, 10);
        assert_eq!(summary.total_dark_patterns_detected, 3);
        assert_eq!(summary.dark_ratio, 30.0);
        assert_eq!(summary.risk_level, RiskLevel::Medium);
        assert_eq!(
            summary.detected_texts.iter().map(|d| d.text.as_str()).collect::<Vec<_>>(),
            vec!["chunk 1", "chunk 4", "chunk 8"]
        );
    }

    #[test]
    fn test_empty_input() {
        let summary = aggregate(&[]);

        assert_eq!(summary.total_contents_scanned, 0);
        assert_eq!(summary.dark_ratio, 0.0);
        assert_eq!(summary.risk_level, RiskLevel::Low);
        assert!(summary.detected_texts.is_empty());
    }

    #[test]
    fn test_tier_boundaries_inclusive() {
        assert_eq!(risk_level(0.0), RiskLevel::Low);
        assert_eq!(risk_level(24.99), RiskLevel::Low);
        assert_eq!(risk_level(25.0), RiskLevel::Medium);
        assert_eq!(risk_level(59.99), RiskLevel::Medium);
        assert_eq!(risk_level(60.0), RiskLevel::High);
        assert_eq!(risk_level(100.0), RiskLevel::High);
    }

    #[test]
    fn test_ratio_rounding() {
        assert_eq!(dark_ratio(1, 3), 33.33);
        assert_eq!(dark_ratio(2, 3), 66.67);
        assert_eq!(dark_ratio(1, 4), 25.0);
        assert_eq!(dark_ratio(3, 5), 60.0);
        assert_eq!(dark_ratio(0, 0), 0.0);
    }

    #[test]
    fn test_ratio_exact_halves_round_to_even() {
        // 1/32 and 5/32 land exactly on a binary half at the third decimal
        assert_eq!(dark_ratio(1, 32), 3.12);
        assert_eq!(dark_ratio(5, 32), 15.62);
        assert_eq!(dark_ratio(3, 32), 9.38);
        assert_eq!(dark_ratio(1, 8), 12.5);
    }

    #[test]
    fn test_summarize_single() {
        let flagged = summarize_single("Hurry!", &Prediction { label: 1, confidence: 0.87 });
        assert_eq!(flagged.total_contents_scanned, 1);
        assert_eq!(flagged.dark_ratio, 100.0);
        assert_eq!(flagged.risk_level, RiskLevel::High);
        assert_eq!(flagged.detected_texts, vec![DetectedText { text: "Hurry!".into(), confidence: 0.87 }]);

        let clean = summarize_single("Welcome", &Prediction { label: 0, confidence: 0.99 });
        assert_eq!(clean.total_dark_patterns_detected, 0);
        assert_eq!(clean.risk_level, RiskLevel::Low);
        assert!(clean.detected_texts.is_empty());
    }

    #[test]
    fn test_risk_level_serializes_as_title_case() {
        let json = serde_json::to_string(&aggregate(&labelled(&[1, 1]))).unwrap();
        assert!(json.contains(r#""risk_level":"High""#));
        assert!(json.contains(r#""dark_ratio":100.0"#));
    }

    proptest! {
        #[test]
        fn prop_summary_invariants(labels in prop::collection::vec(0u8..=1, 0..200)) {
            let summary = aggregate(&labelled(&labels));

            prop_assert!((0.0..=100.0).contains(&summary.dark_ratio));
            prop_assert_eq!(summary.detected_texts.len(), summary.total_dark_patterns_detected);
            prop_assert!(summary.total_dark_patterns_detected <= summary.total_contents_scanned);
            prop_assert_eq!(summary.risk_level, risk_level(summary.dark_ratio));
        }
    }
}
