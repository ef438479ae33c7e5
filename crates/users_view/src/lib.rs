//! Users listing in several views. The backend answers each view with a
//! differently shaped payload; strategies normalize them into a table or csv
//! result so callers only switch on `kind`.

use std::{collections::HashMap, fmt, str::FromStr, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{Discriminator, KitError, StrategyTable};
use tracing::debug;

pub mod api_client;
pub mod bootstrap;
pub mod strategies;

pub use api_client::{
    DetailedUser, StubUsersApiClient, UserProfile, UsersApiClient, UsersCsvResponse,
    UsersDetailResponse,
};
pub use bootstrap::{bootstrap, bootstrap_with};
pub use strategies::{UsersCsvViewStrategy, UsersDetailViewStrategy, UsersSummaryViewStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsersViewMode {
    Summary,
    Detail,
    Csv,
}

impl fmt::Display for UsersViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Summary => "summary",
            Self::Detail => "detail",
            Self::Csv => "csv",
        })
    }
}

impl Discriminator for UsersViewMode {
    const KIND: &'static str = "view";
    const ALL: &'static [Self] = &[Self::Summary, Self::Detail, Self::Csv];
}

impl FromStr for UsersViewMode {
    type Err = KitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `params` is unchecked here; the chosen strategy validates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersViewInput {
    pub view: UsersViewMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl UsersViewInput {
    pub fn new(view: UsersViewMode) -> Self {
        Self { view, params: None }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UsersViewResult {
    Table {
        rows: Vec<UserRow>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total: Option<u64>,
    },
    Csv {
        #[serde(rename = "csvText")]
        csv_text: String,
    },
}

#[async_trait]
pub trait UsersViewStrategy: Send + Sync {
    fn view(&self) -> UsersViewMode;
    async fn execute(&self, input: &UsersViewInput) -> Result<UsersViewResult, KitError>;
}

pub struct UsersViewStrategyFactory {
    table: StrategyTable<UsersViewMode, dyn UsersViewStrategy>,
}

impl UsersViewStrategyFactory {
    pub fn new(map: HashMap<UsersViewMode, Arc<dyn UsersViewStrategy>>) -> Self {
        Self {
            table: StrategyTable::new(map),
        }
    }

    pub fn select(&self, view: UsersViewMode) -> Result<Arc<dyn UsersViewStrategy>, KitError> {
        self.table.select(view)
    }

    pub fn verify(&self) -> Result<(), KitError> {
        self.table.verify()
    }

    pub fn registered(&self) -> Vec<UsersViewMode> {
        self.table.registered()
    }
}

pub struct UsersViewController {
    factory: UsersViewStrategyFactory,
}

impl UsersViewController {
    pub fn new(factory: UsersViewStrategyFactory) -> Self {
        Self { factory }
    }

    pub async fn dispatch(&self, input: UsersViewInput) -> Result<UsersViewResult, KitError> {
        debug!("view: dispatch view={}", input.view);
        let strategy = self.factory.select(input.view)?;
        strategy.execute(&input).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
