//! Create/update/delete strategies: validate the payload, post, pick the next route.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use shared::{
    payload::{as_object, optional_string, required_string},
    KitError, ValidationError,
};
use tracing::{debug, warn};

use crate::{ApiClient, UserCrudAction, UserCrudInput, UserCrudResult, UserCrudStrategy};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CreateUserPayload {
    name: String,
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct UpdateUserPayload {
    id: String,
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DeleteUserPayload {
    id: String,
}

fn parse_create_payload(payload: &Value) -> Result<CreateUserPayload, ValidationError> {
    let object = as_object(payload)?;
    Ok(CreateUserPayload {
        name: required_string(object, "name")?,
        email: required_string(object, "email")?,
    })
}

fn parse_update_payload(payload: &Value) -> Result<UpdateUserPayload, ValidationError> {
    let object = as_object(payload)?;
    Ok(UpdateUserPayload {
        id: required_string(object, "id")?,
        name: optional_string(object, "name")?,
        email: optional_string(object, "email")?,
    })
}

fn parse_delete_payload(payload: &Value) -> Result<DeleteUserPayload, ValidationError> {
    let object = as_object(payload)?;
    Ok(DeleteUserPayload {
        id: required_string(object, "id")?,
    })
}

fn ensure_action(
    strategy: &'static str,
    expected: UserCrudAction,
    input: &UserCrudInput,
) -> Result<(), KitError> {
    if input.action == expected {
        return Ok(());
    }
    Err(KitError::Misrouted {
        strategy,
        kind: "action",
        expected: expected.to_string(),
        actual: input.action.to_string(),
    })
}

async fn post(
    api: &dyn ApiClient,
    path: &str,
    body: Value,
    fallback: &str,
) -> Result<(), KitError> {
    let response = match api.post(path, body).await {
        Ok(response) => response,
        Err(err) => {
            warn!("crud: post failed path={path}: {err:#}");
            return Err(KitError::collaborator(Some(err.to_string()), fallback));
        }
    };
    if !response.ok {
        warn!(
            "crud: post rejected path={path} message={}",
            response.message.as_deref().unwrap_or("<none>")
        );
        return Err(KitError::collaborator(response.message, fallback));
    }
    Ok(())
}

pub struct CreateUserStrategy {
    api: Arc<dyn ApiClient>,
}

impl CreateUserStrategy {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UserCrudStrategy for CreateUserStrategy {
    fn action(&self) -> UserCrudAction {
        UserCrudAction::CreateUser
    }

    async fn execute(&self, input: &UserCrudInput) -> Result<UserCrudResult, KitError> {
        ensure_action("CreateUserStrategy", self.action(), input)?;
        let CreateUserPayload { name, email } = parse_create_payload(&input.payload)?;

        post(
            self.api.as_ref(),
            "/users",
            json!({ "name": name, "email": email }),
            "create failed",
        )
        .await?;
        debug!("crud: created user name={name}");

        Ok(UserCrudResult::new("/users"))
    }
}

pub struct UpdateUserStrategy {
    api: Arc<dyn ApiClient>,
}

impl UpdateUserStrategy {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UserCrudStrategy for UpdateUserStrategy {
    fn action(&self) -> UserCrudAction {
        UserCrudAction::UpdateUser
    }

    async fn execute(&self, input: &UserCrudInput) -> Result<UserCrudResult, KitError> {
        ensure_action("UpdateUserStrategy", self.action(), input)?;
        let UpdateUserPayload { id, name, email } = parse_update_payload(&input.payload)?;

        // Only the fields the caller supplied are sent.
        let mut body = Map::new();
        if let Some(name) = name {
            body.insert("name".into(), Value::String(name));
        }
        if let Some(email) = email {
            body.insert("email".into(), Value::String(email));
        }

        let path = format!("/users/{id}");
        post(self.api.as_ref(), &path, Value::Object(body), "update failed").await?;

        Ok(UserCrudResult::new(path))
    }
}

pub struct DeleteUserStrategy {
    api: Arc<dyn ApiClient>,
}

impl DeleteUserStrategy {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UserCrudStrategy for DeleteUserStrategy {
    fn action(&self) -> UserCrudAction {
        UserCrudAction::DeleteUser
    }

    async fn execute(&self, input: &UserCrudInput) -> Result<UserCrudResult, KitError> {
        ensure_action("DeleteUserStrategy", self.action(), input)?;
        let DeleteUserPayload { id } = parse_delete_payload(&input.payload)?;

        post(
            self.api.as_ref(),
            &format!("/users/{id}/delete"),
            json!({}),
            "delete failed",
        )
        .await?;

        Ok(UserCrudResult::new("/users"))
    }
}

#[cfg(test)]
#[path = "tests/strategies_tests.rs"]
mod tests;
