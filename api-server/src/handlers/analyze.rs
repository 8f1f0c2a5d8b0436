//! Single-text handlers

use axum::{extract::State, Json};
use darkscan_core::DetectionSummary;
use validator::Validate;

use crate::models::{AnalyzeResponse, TextRequest};
use crate::{AppResult, AppState};

/// Classify one text
pub async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<TextRequest>,
) -> AppResult<Json<AnalyzeResponse>> {
    payload.validate()?;

    let detector = state.detector.clone();
    let prediction = tokio::task::spawn_blocking(move || detector.predict(&payload.text)).await??;

    tracing::debug!("Analyzed text: label={} confidence={:.3}", prediction.label, prediction.confidence);
    Ok(Json(AnalyzeResponse::from(prediction)))
}

/// Classify one text and report it as a one-item scan summary
pub async fn detect_from_text(
    State(state): State<AppState>,
    Json(payload): Json<TextRequest>,
) -> AppResult<Json<DetectionSummary>> {
    payload.validate()?;

    let detector = state.detector.clone();
    let summary = tokio::task::spawn_blocking(move || detector.summarize_text(&payload.text)).await??;

    Ok(Json(summary))
}
