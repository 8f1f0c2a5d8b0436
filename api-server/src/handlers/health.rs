//! Health check handler

use axum::{extract::State, Json};

use crate::models::{HealthResponse, ModelStatus};
use crate::AppState;

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        model: ModelStatus::from(state.detector.metadata()),
        inference: state.detector.stats(),
    })
}
