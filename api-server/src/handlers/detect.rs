//! Page scan handler

use axum::{extract::State, Json};
use darkscan_core::DetectionSummary;
use validator::Validate;

use crate::models::UrlRequest;
use crate::{AppResult, AppState};

/// Fetch a page, classify its visible text chunks and score the page
pub async fn detect_from_url(
    State(state): State<AppState>,
    Json(payload): Json<UrlRequest>,
) -> AppResult<Json<DetectionSummary>> {
    let payload = payload.normalized();
    payload.validate()?;

    let html = state.fetcher.fetch(&payload.url).await?;

    let detector = state.detector.clone();
    let summary = tokio::task::spawn_blocking(move || detector.scan_html(&html)).await??;

    tracing::info!(
        "Scanned {}: {} chunks, {} flagged, risk {}",
        payload.url,
        summary.total_contents_scanned,
        summary.total_dark_patterns_detected,
        summary.risk_level
    );

    Ok(Json(summary))
}
