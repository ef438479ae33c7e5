//! One users endpoint whose response shape depends on the requested view.

use std::sync::Mutex;

use anyhow::bail;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::domain::{UserPage, UserSummary};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedUser {
    pub id: String,
    pub name: String,
    pub profile: UserProfile,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersDetailResponse {
    pub users: Vec<DetailedUser>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersCsvResponse {
    #[serde(rename = "csvText")]
    pub csv_text: String,
}

#[async_trait]
pub trait UsersApiClient: Send + Sync {
    async fn fetch_summary(&self, page: u32) -> anyhow::Result<UserPage>;
    async fn fetch_detail(&self, page: u32, include_roles: bool)
        -> anyhow::Result<UsersDetailResponse>;
    async fn fetch_csv(&self, page: u32) -> anyhow::Result<UsersCsvResponse>;
}

#[derive(Debug, Default)]
pub struct StubUsersApiClient {
    failure: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl StubUsersApiClient {
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
        debug!("view stub: {call}");
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
impl UsersApiClient for StubUsersApiClient {
    async fn fetch_summary(&self, page: u32) -> anyhow::Result<UserPage> {
        self.record(format!("GET /users?view=summary&page={page}"))?;
        Ok(UserPage {
            items: vec![UserSummary::new(
                "u1",
                "Taro",
                Some("taro@example.com".into()),
            )],
            total: 1,
        })
    }

    async fn fetch_detail(
        &self,
        page: u32,
        include_roles: bool,
    ) -> anyhow::Result<UsersDetailResponse> {
        self.record(format!(
            "GET /users?view=detail&page={page}&includeRoles={include_roles}"
        ))?;
        let roles = if include_roles {
            vec!["admin".to_string()]
        } else {
            Vec::new()
        };
        Ok(UsersDetailResponse {
            users: vec![DetailedUser {
                id: "u1".into(),
                name: "Taro".into(),
                profile: UserProfile {
                    email: "taro@example.com".into(),
                },
                roles,
            }],
            total: 1,
        })
    }

    async fn fetch_csv(&self, page: u32) -> anyhow::Result<UsersCsvResponse> {
        self.record(format!("GET /users?view=csv&page={page}"))?;
        Ok(UsersCsvResponse {
            csv_text: "id,name,email\nu1,Taro,taro@example.com\n".into(),
        })
    }
}
