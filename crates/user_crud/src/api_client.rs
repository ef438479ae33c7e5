//! Collaborator seam for user writes. A real client would issue HTTP requests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            message: None,
        }
    }

    pub fn failed(message: Option<String>) -> Self {
        Self { ok: false, message }
    }
}

#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn post(&self, path: &str, body: Value) -> anyhow::Result<ApiResponse>;
}

/// Answers every post with a canned response and remembers what was sent.
#[derive(Debug, Default)]
pub struct StubApiClient {
    failure: Option<String>,
    sent: Mutex<Vec<(String, Value)>>,
}

impl StubApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports not-ok with `message` on every call.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, Value)> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ApiClient for StubApiClient {
    async fn post(&self, path: &str, body: Value) -> anyhow::Result<ApiResponse> {
        debug!("crud stub: post path={path}");
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((path.to_string(), body));
        }
        Ok(match &self.failure {
            Some(message) => ApiResponse::failed(Some(message.clone())),
            None => ApiResponse::ok(),
        })
    }
}
