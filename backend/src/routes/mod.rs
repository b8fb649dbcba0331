//! Route definitions for the Crop Advisory backend

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/users/:user_id", user_routes())
}

/// Quick advice routes, which work from the request body alone
pub fn advice_routes() -> Router<AppState> {
    Router::new()
        .route("/existing", post(handlers::quick_existing_advice))
        .route("/new", post(handlers::quick_new_advice))
}

/// Per-user farm record and advisory routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/farm",
            get(handlers::get_farm_details).put(handlers::update_farm_details),
        )
        .route(
            "/crops/:crop_key/logs",
            get(handlers::list_crop_logs).post(handlers::record_crop_log),
        )
        .route("/crops/:crop_key/advice", post(handlers::crop_advice))
        .route("/recommendation", post(handlers::crop_recommendation))
}
