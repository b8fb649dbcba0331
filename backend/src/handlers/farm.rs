//! Farm record HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::services::records::{FarmRecordService, NewActivityLog, UpdateFarmDetails};
use crate::AppState;

fn record_service(state: &AppState) -> FarmRecordService {
    FarmRecordService::new(state.store.clone(), &state.config.firebase.users_root)
}

/// Get a user's farm details
pub async fn get_farm_details(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let service = record_service(&state);

    match service.get_farm_details(&user_id).await {
        Ok(details) => (StatusCode::OK, Json(details)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create or update a user's farm details; absent fields are left unchanged
pub async fn update_farm_details(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let service = record_service(&state);

    let update = match UpdateFarmDetails::from_json(body) {
        Ok(update) => update,
        Err(e) => return e.into_response(),
    };

    match service.update_farm_details(&user_id, &update).await {
        Ok(details) => (StatusCode::OK, Json(details)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List the activity logs of one crop, oldest first
pub async fn list_crop_logs(
    State(state): State<AppState>,
    Path((user_id, crop_key)): Path<(String, String)>,
) -> impl IntoResponse {
    let service = record_service(&state);

    match service.get_crop_logs(&user_id, &crop_key).await {
        Ok(logs) => (StatusCode::OK, Json(serde_json::json!({ "logs": logs }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a new activity log for a crop
pub async fn record_crop_log(
    State(state): State<AppState>,
    Path((user_id, crop_key)): Path<(String, String)>,
    Json(input): Json<NewActivityLog>,
) -> impl IntoResponse {
    let service = record_service(&state);

    match service.record_log(&user_id, &crop_key, input).await {
        Ok(recorded) => (StatusCode::CREATED, Json(recorded)).into_response(),
        Err(e) => e.into_response(),
    }
}
