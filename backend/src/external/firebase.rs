//! Firebase Realtime Database REST client
//!
//! Nodes are addressed by path segments and read/written as JSON through
//! `{database_url}/{path}.json`.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::external::google_auth::GoogleAuth;

/// Realtime database client
#[derive(Clone)]
pub struct FirebaseClient {
    client: Client,
    database_url: String,
    auth: Arc<GoogleAuth>,
}

/// Response to a push (POST) request
#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

impl FirebaseClient {
    /// Create a new FirebaseClient
    pub fn new(database_url: &str, auth: Arc<GoogleAuth>, client: Client) -> Self {
        Self {
            client,
            database_url: database_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    /// REST URL of a node; callers validate segments before building paths
    pub fn node_url(&self, path: &[&str]) -> String {
        format!("{}/{}.json", self.database_url, path.join("/"))
    }

    /// Read a node; absent nodes are `Value::Null`
    pub async fn get(&self, path: &[&str]) -> AppResult<Value> {
        let request = self.client.get(self.node_url(path));
        self.send(request).await
    }

    /// Merge children into a node without touching its other children
    pub async fn update<T: Serialize + ?Sized>(&self, path: &[&str], body: &T) -> AppResult<Value> {
        let request = self.client.patch(self.node_url(path)).json(body);
        self.send(request).await
    }

    /// Append a child under a generated, chronologically ordered key
    pub async fn push<T: Serialize + ?Sized>(&self, path: &[&str], body: &T) -> AppResult<String> {
        let request = self.client.post(self.node_url(path)).json(body);
        let value = self.send(request).await?;
        let pushed: PushResponse = serde_json::from_value(value).map_err(|e| {
            AppError::DocumentStore(format!("Failed to parse push response: {}", e))
        })?;
        Ok(pushed.name)
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Value> {
        let token = self.auth.access_token().await?;

        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::DocumentStore(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::DocumentStore(format!(
                "Database returned {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::DocumentStore(format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::google_auth::ServiceAccountKey;

    fn client(url: &str) -> FirebaseClient {
        let key = ServiceAccountKey::from_json(
            r#"{"client_email": "svc@example.iam.gserviceaccount.com", "private_key": ""}"#,
        )
        .unwrap();
        let http = Client::new();
        FirebaseClient::new(url, Arc::new(GoogleAuth::new(key, http.clone())), http)
    }

    #[test]
    fn test_node_url() {
        let store = client("https://crop-advisory-default-rtdb.firebaseio.com/");
        assert_eq!(
            store.node_url(&["Users", "u1", "farmActivityLogs", "crop-1"]),
            "https://crop-advisory-default-rtdb.firebaseio.com/Users/u1/farmActivityLogs/crop-1.json"
        );
    }
}
