//! Matrix activity provider
//!
//! Fetches one window of a room's message timeline via the client-server API
//! and runs it through the [`timeline`](crate::timeline) pipeline. Credentials
//! come from the standard JSON file written by Matrix session tooling; only
//! the homeserver and access token are used here (the login-only fields are
//! ignored, since this provider reads an existing session).

use super::{Activity, ActivitySource};
use crate::timeline::{self, FormattedMessage};
use crate::{Result, TidingsError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Per-request timeout for timeline fetches
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials file contents (homeserver session)
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixCredentials {
    pub homeserver: String,
    pub access_token: String,
}

impl MatrixCredentials {
    /// Load credentials from a JSON file
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            TidingsError::Config(format!(
                "Cannot read Matrix credentials {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            TidingsError::Parse(format!(
                "Invalid Matrix credentials {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// One fetch window of raw timeline events
///
/// Events stay untyped here; the pipeline parses them fallibly per event.
#[derive(Debug, Default, Deserialize)]
pub struct MessagesBatch {
    #[serde(default)]
    pub chunk: Vec<Value>,
}

/// Matrix client for one configured room
pub struct MatrixClient {
    client: Client,
    homeserver: String,
    access_token: String,
    room_id: String,
}

impl MatrixClient {
    pub fn new(credentials: MatrixCredentials, room_id: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;

        Ok(Self {
            client,
            homeserver: credentials.homeserver.trim_end_matches('/').to_string(),
            access_token: credentials.access_token,
            room_id: room_id.into(),
        })
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Fetch one window of the room timeline
    async fn fetch_batch(&self) -> Result<MessagesBatch> {
        let url = format!(
            "{}/_matrix/client/v3/rooms/{}/messages",
            self.homeserver,
            urlencoding::encode(&self.room_id)
        );

        debug!(room = %self.room_id, "Fetching Matrix timeline window");

        let response = self
            .client
            .get(&url)
            .query(&[("access_token", self.access_token.as_str())])
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(TidingsError::Auth(format!(
                "Matrix access denied for room {}",
                self.room_id
            ))),
            status => {
                let error_body = response.text().await.unwrap_or_default();
                Err(TidingsError::Fetch(format!(
                    "Matrix API error: HTTP {}: {}",
                    status, error_body
                )))
            }
        }
    }

    /// Fetch one batch and reconstruct the conversation
    pub async fn get_messages(&self) -> Result<Vec<FormattedMessage>> {
        let batch = self.fetch_batch().await?;
        let messages = timeline::assemble(&batch.chunk);

        info!(
            room = %self.room_id,
            events = batch.chunk.len(),
            messages = messages.len(),
            "Matrix fetch complete"
        );

        Ok(messages)
    }
}

#[async_trait]
impl ActivitySource for MatrixClient {
    async fn fetch(&self) -> Result<Activity> {
        Ok(Activity::Room(self.get_messages().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_client() -> MatrixClient {
        MatrixClient::new(
            MatrixCredentials {
                homeserver: "https://matrix.example.org/".to_string(),
                access_token: "syt_token".to_string(),
            },
            "!room:example.org",
        )
        .unwrap()
    }

    #[test]
    fn test_homeserver_trailing_slash_trimmed() {
        let client = test_client();
        assert_eq!(client.homeserver, "https://matrix.example.org");
    }

    #[test]
    fn test_batch_deserialization() {
        let batch: MessagesBatch = serde_json::from_value(json!({
            "chunk": [{"type": "m.room.message", "content": {"body": "hi"}}],
            "start": "t1",
            "end": "t2"
        }))
        .unwrap();
        assert_eq!(batch.chunk.len(), 1);
    }

    #[test]
    fn test_batch_missing_chunk_defaults_empty() {
        let batch: MessagesBatch = serde_json::from_value(json!({})).unwrap();
        assert!(batch.chunk.is_empty());
    }

    #[tokio::test]
    async fn test_credentials_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.json");
        tokio::fs::write(
            &path,
            r#"{
                "homeserver": "https://matrix.example.org",
                "access_token": "syt_abc",
                "user_id": "@me:example.org",
                "device_id": "ABCDEF"
            }"#,
        )
        .await
        .unwrap();

        let credentials = MatrixCredentials::load(&path).await.unwrap();
        assert_eq!(credentials.homeserver, "https://matrix.example.org");
        assert_eq!(credentials.access_token, "syt_abc");
    }

    #[tokio::test]
    async fn test_credentials_missing_file() {
        let result = MatrixCredentials::load(Path::new("/nonexistent/matrix.json")).await;
        assert!(matches!(result, Err(TidingsError::Config(_))));
    }
}
