//! Crop advice HTTP handlers

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{lenient, ActivityLogs, SiteConditions};

use crate::services::AdvisoryService;
use crate::AppState;

/// Advice for logs sent by the client
#[derive(Debug, Deserialize)]
pub struct QuickExistingRequest {
    #[serde(default)]
    pub logs: ActivityLogs,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub language: Option<String>,
}

/// Suggestion for a farmer who has not planted yet
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickNewRequest {
    #[serde(default, deserialize_with = "lenient::text")]
    pub soil_type: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub district: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub weather: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub language: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdviceRequest {
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(flatten)]
    pub site: SiteConditions,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub language: Option<String>,
}

/// Successful advice, flattened next to a `success` flag
#[derive(Debug, Serialize)]
pub struct AdviceEnvelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> AdviceEnvelope<T> {
    pub fn ok(body: T) -> Self {
        Self { success: true, body }
    }
}

/// Advice from the latest of the submitted logs
pub async fn quick_existing_advice(
    State(state): State<AppState>,
    Json(input): Json<QuickExistingRequest>,
) -> impl IntoResponse {
    let service = AdvisoryService::new(&state);

    match service
        .quick_existing_advice(&input.logs, input.language.as_deref())
        .await
    {
        Ok(advice) => (StatusCode::OK, Json(AdviceEnvelope::ok(advice))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Planting suggestion from the submitted soil type
pub async fn quick_new_advice(
    State(state): State<AppState>,
    Json(input): Json<QuickNewRequest>,
) -> impl IntoResponse {
    let service = AdvisoryService::new(&state);

    tracing::debug!(
        "Suggestion requested for soil '{}' in district '{}' (weather '{}')",
        input.soil_type,
        input.district,
        input.weather
    );

    match service
        .quick_new_advice(&input.soil_type, input.language.as_deref())
        .await
    {
        Ok(advice) => (StatusCode::OK, Json(AdviceEnvelope::ok(advice))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Advice for a stored crop, from its full log history.
///
/// An empty body means the default language; any other body must be JSON.
pub async fn crop_advice(
    State(state): State<AppState>,
    Path((user_id, crop_key)): Path<(String, String)>,
    body: Bytes,
) -> impl IntoResponse {
    let service = AdvisoryService::new(&state);

    let input = if body.is_empty() {
        AdviceRequest::default()
    } else {
        match Json::<AdviceRequest>::from_bytes(&body) {
            Ok(Json(input)) => input,
            Err(rejection) => return rejection.into_response(),
        }
    };

    match service
        .existing_crop_advice(&user_id, &crop_key, input.language.as_deref())
        .await
    {
        Ok(advice) => (StatusCode::OK, Json(AdviceEnvelope::ok(advice))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Best crop to plant next on the user's farm
pub async fn crop_recommendation(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(input): Json<RecommendationRequest>,
) -> impl IntoResponse {
    let service = AdvisoryService::new(&state);

    match service
        .new_crop_recommendation(&user_id, &input.site, input.language.as_deref())
        .await
    {
        Ok(recommendation) => {
            (StatusCode::OK, Json(AdviceEnvelope::ok(recommendation))).into_response()
        }
        Err(e) => e.into_response(),
    }
}
