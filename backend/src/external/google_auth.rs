//! Google service-account authentication
//!
//! Implements the OAuth 2.0 JWT bearer grant: an RS256-signed assertion is
//! exchanged for a short-lived access token, which is cached until shortly
//! before it expires.

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::GoogleConfig;
use crate::error::{AppError, AppResult};

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertions may be valid for at most one hour
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Tokens are refreshed this long before they expire
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Scopes needed for the realtime database and Cloud Translation
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/firebase.database",
    "https://www.googleapis.com/auth/userinfo.email",
    "https://www.googleapis.com/auth/cloud-translation",
];

/// Fields of a service-account key file used for signing
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            AppError::Configuration(format!("Invalid service account key: {}", e))
        })
    }

    /// Inline key JSON wins over a key file path
    pub fn from_config(config: &GoogleConfig) -> AppResult<Self> {
        if let Some(json) = config.service_account_key.as_deref().filter(|s| !s.trim().is_empty()) {
            return Self::from_json(json);
        }

        let path = config.service_account_path.as_deref().ok_or_else(|| {
            AppError::Configuration(
                "SERVICE_ACCOUNT_KEY or google.service_account_path must be set".to_string(),
            )
        })?;
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!("Cannot read service account key {}: {}", path, e))
        })?;
        Self::from_json(&json)
    }
}

/// Claims of the signed assertion
#[derive(Debug, Serialize, Deserialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: i64,
}

/// Access-token provider for one service account
pub struct GoogleAuth {
    key: ServiceAccountKey,
    scope: String,
    http_client: Client,
    cached: Mutex<Option<CachedToken>>,
}

impl GoogleAuth {
    pub fn new(key: ServiceAccountKey, http_client: Client) -> Self {
        Self {
            key,
            scope: SCOPES.join(" "),
            http_client,
            cached: Mutex::new(None),
        }
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Current access token, fetching a new one when the cached token is
    /// missing or about to expire
    pub async fn access_token(&self) -> AppResult<String> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now().timestamp();

        if let Some(token) = cached.as_ref().filter(|t| t.expires_at - EXPIRY_MARGIN_SECS > now) {
            return Ok(token.access_token.clone());
        }

        let token = self.fetch_token(now).await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }

    async fn fetch_token(&self, now: i64) -> AppResult<CachedToken> {
        let assertion = self.sign_assertion(now)?;
        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];

        tracing::debug!("Requesting Google access token for {}", self.key.client_email);

        let response = self
            .http_client
            .post(&self.key.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::Authentication(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Authentication(format!(
                "Token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Authentication(format!("Failed to parse token response: {}", e)))?;

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + token.expires_in,
        })
    }

    fn sign_assertion(&self, now: i64) -> AppResult<String> {
        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: self.scope.clone(),
            aud: self.key.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        let key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| AppError::Configuration(format!("Invalid service account private key: {}", e)))?;

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| AppError::Authentication(format!("Assertion signing failed: {}", e)))
    }
}
