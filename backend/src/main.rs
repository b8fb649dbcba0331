//! Crop Advisory Backend - Server
//!
//! Rule- and model-based advice for farmers: guidance for crops already in
//! the ground, and a recommendation of what to plant next.

use axum::{routing::get, Json, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::{model_files, FirebaseClient, GoogleAuth, ServiceAccountKey, TranslateClient};
use shared::{CropAdvisor, LanguageCode};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub advisor: CropAdvisor,
    pub store: FirebaseClient,
    pub translator: TranslateClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_advisory=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Crop Advisory Server");
    tracing::info!("Environment: {}", config.environment);

    let key = ServiceAccountKey::from_config(&config.google)?;
    let http = reqwest::Client::new();
    let auth = Arc::new(GoogleAuth::new(key, http.clone()));
    tracing::info!("Using service account {}", auth.client_email());

    let advisor = model_files::build_advisor(&config.models);

    let store = FirebaseClient::new(&config.firebase.database_url, auth.clone(), http.clone());
    let translator = TranslateClient::new(
        config.translate.endpoint.clone(),
        config.translate.api_key.clone(),
        LanguageCode::new(config.translate.default_language.as_str()),
        auth,
        http,
    );

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        advisor,
        store,
        translator,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let ip: std::net::IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server host '{}': {}", config.server.host, e))?;
    let addr = SocketAddr::from((ip, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/advice", routes::advice_routes())
        .nest("/api/v1", routes::api_routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "running",
        "service": "Crop Advisory Backend",
        "message": "Use /advice/existing or /advice/new for quick advice, /api/v1 for farm records",
    }))
}
