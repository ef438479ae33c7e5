//! Search endpoints. Each pattern has its own optimized backend call.

use std::sync::Mutex;

use anyhow::bail;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::domain::{UserPage, UserSummary};
use tracing::debug;

/// Detail endpoint response; email is always known here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetail {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[async_trait]
pub trait SearchApiClient: Send + Sync {
    async fn fetch_user_by_id(&self, id: &str) -> anyhow::Result<UserDetail>;
    async fn search_users_by_email(&self, email: &str, page: u32) -> anyhow::Result<UserPage>;
    async fn search_users_by_keyword(&self, keyword: &str, page: u32)
        -> anyhow::Result<UserPage>;
    async fn fetch_users(&self, page: u32) -> anyhow::Result<UserPage>;
}

/// Canned search backend. Records each call as `endpoint?query`.
#[derive(Debug, Default)]
pub struct StubSearchApiClient {
    failure: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl StubSearchApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: String) -> anyhow::Result<()> {
        debug!("search stub: {call}");
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if let Some(message) = &self.failure {
            bail!("{message}");
        }
        Ok(())
    }
}

#[async_trait]
impl SearchApiClient for StubSearchApiClient {
    async fn fetch_user_by_id(&self, id: &str) -> anyhow::Result<UserDetail> {
        self.record(format!("GET /users/{id}"))?;
        Ok(UserDetail {
            id: id.to_string(),
            name: "Taro".into(),
            email: "taro@example.com".into(),
        })
    }

    async fn search_users_by_email(&self, email: &str, page: u32) -> anyhow::Result<UserPage> {
        self.record(format!("GET /users/search/by-email?email={email}&page={page}"))?;
        Ok(UserPage {
            items: vec![UserSummary::new("u1", "Hanako", Some(email.to_string()))],
            total: 1,
        })
    }

    async fn search_users_by_keyword(
        &self,
        keyword: &str,
        page: u32,
    ) -> anyhow::Result<UserPage> {
        self.record(format!("GET /users/search?keyword={keyword}&page={page}"))?;
        Ok(UserPage {
            items: vec![UserSummary::new("u2", format!("Matched:{keyword}"), None)],
            total: 1,
        })
    }

    async fn fetch_users(&self, page: u32) -> anyhow::Result<UserPage> {
        self.record(format!("GET /users?page={page}"))?;
        Ok(UserPage {
            items: vec![UserSummary::new("u3", "DefaultUser", None)],
            total: 1,
        })
    }
}
