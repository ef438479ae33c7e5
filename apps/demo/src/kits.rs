use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use shared::{ApiError, KitError};
use tracing::info;
use user_crud::{StubApiClient, UserCrudController, UserCrudInput};
use user_search::{StubSearchApiClient, UserSearchController, UserSearchForm};
use users_view::{StubUsersApiClient, UsersViewController, UsersViewInput};

use crate::config::Settings;

/// The three wired controllers, built once at startup.
pub struct Kits {
    pub crud: UserCrudController,
    pub search: UserSearchController,
    pub view: UsersViewController,
}

impl Kits {
    pub fn build(settings: &Settings) -> Result<Self, KitError> {
        let kits = match &settings.stub_failure {
            Some(message) => {
                info!("kits: stub collaborators will fail with message={message}");
                Self {
                    crud: user_crud::bootstrap_with(Arc::new(StubApiClient::failing(
                        message.clone(),
                    )))?,
                    search: user_search::bootstrap_with(Arc::new(StubSearchApiClient::failing(
                        message.clone(),
                    )))?,
                    view: users_view::bootstrap_with(Arc::new(StubUsersApiClient::failing(
                        message.clone(),
                    )))?,
                }
            }
            None => Self {
                crud: user_crud::bootstrap()?,
                search: user_search::bootstrap()?,
                view: users_view::bootstrap()?,
            },
        };
        Ok(kits)
    }

    pub async fn crud(&self, input: UserCrudInput) -> anyhow::Result<Outcome> {
        outcome(self.crud.dispatch(input).await)
    }

    pub async fn search(&self, form: UserSearchForm) -> anyhow::Result<Outcome> {
        outcome(self.search.dispatch(form).await)
    }

    pub async fn view(&self, input: UsersViewInput) -> anyhow::Result<Outcome> {
        outcome(self.view.dispatch(input).await)
    }
}

/// A dispatch result flattened to JSON for printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ok(Value),
    Err(ApiError),
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Ok(value) => value.clone(),
            Self::Err(err) => serde_json::json!({ "error": err }),
        }
    }
}

impl From<KitError> for Outcome {
    fn from(err: KitError) -> Self {
        Self::Err(err.into())
    }
}

fn outcome<T: Serialize>(result: Result<T, KitError>) -> anyhow::Result<Outcome> {
    Ok(match result {
        Ok(value) => Outcome::Ok(serde_json::to_value(value)?),
        Err(err) => Outcome::from(err),
    })
}
