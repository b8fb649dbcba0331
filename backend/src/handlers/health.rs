//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub translation: String,
    pub risk_model: String,
    pub recommendation_model: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let scoring = |model_backed: bool| {
        let kind = if model_backed { "model" } else { "heuristic" };
        kind.to_string()
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        translation: state.translator.auth_mode().to_string(),
        risk_model: scoring(state.advisor.scores_risk_with_model()),
        recommendation_model: scoring(state.advisor.recommends_with_model()),
    })
}
