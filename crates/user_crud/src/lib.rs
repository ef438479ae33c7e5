//! User create/update/delete behind an action-keyed strategy factory.

use std::{collections::HashMap, fmt, str::FromStr, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{Discriminator, KitError, StrategyTable};
use tracing::debug;

pub mod api_client;
pub mod bootstrap;
pub mod strategies;

pub use api_client::{ApiClient, ApiResponse, StubApiClient};
pub use bootstrap::{bootstrap, bootstrap_with};
pub use strategies::{CreateUserStrategy, DeleteUserStrategy, UpdateUserStrategy};

/// Actions this kit handles. Adding one means registering a strategy for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserCrudAction {
    CreateUser,
    UpdateUser,
    DeleteUser,
}

impl fmt::Display for UserCrudAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreateUser => "CreateUser",
            Self::UpdateUser => "UpdateUser",
            Self::DeleteUser => "DeleteUser",
        })
    }
}

impl Discriminator for UserCrudAction {
    const KIND: &'static str = "action";
    const ALL: &'static [Self] = &[Self::CreateUser, Self::UpdateUser, Self::DeleteUser];
}

impl FromStr for UserCrudAction {
    type Err = KitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Controller input. The payload stays untyped until a strategy validates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCrudInput {
    pub action: UserCrudAction,
    #[serde(default)]
    pub payload: Value,
}

impl UserCrudInput {
    pub fn new(action: UserCrudAction, payload: Value) -> Self {
        Self { action, payload }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCrudResult {
    pub next_route: String,
}

impl UserCrudResult {
    pub fn new(next_route: impl Into<String>) -> Self {
        Self {
            next_route: next_route.into(),
        }
    }
}

#[async_trait]
pub trait UserCrudStrategy: Send + Sync {
    fn action(&self) -> UserCrudAction;
    async fn execute(&self, input: &UserCrudInput) -> Result<UserCrudResult, KitError>;
}

/// Picks the strategy for an action and nothing else.
pub struct UserCrudStrategyFactory {
    table: StrategyTable<UserCrudAction, dyn UserCrudStrategy>,
}

impl UserCrudStrategyFactory {
    pub fn new(map: HashMap<UserCrudAction, Arc<dyn UserCrudStrategy>>) -> Self {
        Self {
            table: StrategyTable::new(map),
        }
    }

    pub fn select(&self, action: UserCrudAction) -> Result<Arc<dyn UserCrudStrategy>, KitError> {
        self.table.select(action)
    }

    pub fn verify(&self) -> Result<(), KitError> {
        self.table.verify()
    }

    pub fn registered(&self) -> Vec<UserCrudAction> {
        self.table.registered()
    }
}

pub struct UserCrudController {
    factory: UserCrudStrategyFactory,
}

impl UserCrudController {
    pub fn new(factory: UserCrudStrategyFactory) -> Self {
        Self { factory }
    }

    pub async fn dispatch(&self, input: UserCrudInput) -> Result<UserCrudResult, KitError> {
        debug!("crud: dispatch action={}", input.action);
        let strategy = self.factory.select(input.action)?;
        strategy.execute(&input).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
