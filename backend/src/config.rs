//! Configuration management for the crop advisory backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with ADVISORY__ prefix
//! 4. Platform variables (`PORT`, `SERVICE_ACCOUNT_KEY`, `FIREBASE_DB_URL`)

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Realtime database configuration
    pub firebase: FirebaseConfig,

    /// Google service-account credentials
    pub google: GoogleConfig,

    /// Translation API configuration
    pub translate: TranslateConfig,

    /// Trained model locations
    pub models: ModelsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FirebaseConfig {
    /// Realtime database URL, e.g. https://<project>.firebaseio.com
    pub database_url: String,

    /// Top-level node holding user records
    pub users_root: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GoogleConfig {
    /// Service-account key JSON, inline
    pub service_account_key: Option<String>,

    /// Path to a service-account key file
    pub service_account_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TranslateConfig {
    /// Cloud Translation v2 endpoint
    pub endpoint: String,

    /// Language the advice is written in; requests for it skip translation
    pub default_language: String,

    /// API key; the service-account token is used when absent
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelsConfig {
    /// Logistic risk model for existing crops
    pub existing_crop_path: String,

    /// Linear score model for new-crop recommendation
    pub new_crop_path: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("ADVISORY_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("firebase.users_root", "Users")?
            .set_default(
                "translate.endpoint",
                "https://translation.googleapis.com/language/translate/v2",
            )?
            .set_default("translate.default_language", "en")?
            .set_default("models.existing_crop_path", "models/existing_crop_model.json")?
            .set_default("models.new_crop_path", "models/new_crop_model.json")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (ADVISORY__ prefix)
            .add_source(
                Environment::with_prefix("ADVISORY")
                    .separator("__")
                    .try_parsing(true),
            )
            // Hosting platforms inject these directly
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option(
                "google.service_account_key",
                std::env::var("SERVICE_ACCOUNT_KEY").ok(),
            )?
            .set_override_option("firebase.database_url", std::env::var("FIREBASE_DB_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
        }
    }
}
