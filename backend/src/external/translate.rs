//! Google Cloud Translation (v2) client

use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{LanguageCode, Translatable};

use crate::error::{AppError, AppResult};
use crate::external::google_auth::GoogleAuth;

/// The v2 API accepts at most 128 segments per request
const MAX_SEGMENTS_PER_REQUEST: usize = 100;

/// Translation API client
#[derive(Clone)]
pub struct TranslateClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    auth: Arc<GoogleAuth>,
    default_language: LanguageCode,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: Vec<&'a str>,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

impl TranslateClient {
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        default_language: LanguageCode,
        auth: Arc<GoogleAuth>,
        client: Client,
    ) -> Self {
        Self {
            client,
            endpoint,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            auth,
            default_language,
        }
    }

    /// How requests authenticate: "api_key" or "service_account"
    pub fn auth_mode(&self) -> &'static str {
        if self.api_key.is_some() {
            "api_key"
        } else {
            "service_account"
        }
    }

    /// True when text for `target` can be returned as written
    pub fn is_identity(&self, target: &LanguageCode) -> bool {
        target.is_default() || *target == self.default_language
    }

    /// Translate many strings, preserving order; empty strings are passed
    /// through without an API call
    pub async fn translate_batch(
        &self,
        texts: &[String],
        target: &LanguageCode,
    ) -> AppResult<Vec<String>> {
        let mut output = texts.to_vec();
        if self.is_identity(target) {
            return Ok(output);
        }

        let pending: Vec<usize> = texts
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.trim().is_empty())
            .map(|(i, _)| i)
            .collect();

        for chunk in pending.chunks(MAX_SEGMENTS_PER_REQUEST) {
            let segments: Vec<&str> = chunk.iter().map(|&i| texts[i].as_str()).collect();
            let translated = self.request(segments, target).await?;
            for (&i, text) in chunk.iter().zip(translated) {
                output[i] = text;
            }
        }

        Ok(output)
    }

    /// Translate every text field of a response in place
    pub async fn localize<T: Translatable>(&self, value: &mut T, target: &LanguageCode) -> AppResult<()> {
        if self.is_identity(target) {
            return Ok(());
        }

        let mut fields = value.text_fields_mut();
        let originals: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        let translated = self.translate_batch(&originals, target).await?;
        for (field, text) in fields.iter_mut().zip(translated) {
            **field = text;
        }
        Ok(())
    }

    async fn request(&self, segments: Vec<&str>, target: &LanguageCode) -> AppResult<Vec<String>> {
        let expected = segments.len();
        let body = TranslateRequest {
            q: segments,
            target: target.as_str(),
            format: "text",
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        request = match &self.api_key {
            Some(key) => request.query(&[("key", key)]),
            None => request.bearer_auth(self.auth.access_token().await?),
        };

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Translation(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Translation(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| AppError::Translation(format!("Failed to parse response: {}", e)))?;

        if parsed.data.translations.len() != expected {
            return Err(AppError::Translation(format!(
                "Expected {} translations, got {}",
                expected,
                parsed.data.translations.len()
            )));
        }

        tracing::debug!("Translated {} segments to {}", expected, target);

        Ok(parsed
            .data
            .translations
            .into_iter()
            .map(|t| t.translated_text)
            .collect())
    }
}
