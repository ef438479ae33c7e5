use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use shared::{
    domain::DEFAULT_PAGE,
    payload::{as_object, optional_bool, optional_page},
    KitError, ValidationError,
};
use tracing::warn;

use crate::{
    UserRow, UsersApiClient, UsersViewInput, UsersViewMode, UsersViewResult, UsersViewStrategy,
};

const FETCH_FAILED: &str = "fetch failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ViewParams {
    page: u32,
    include_roles: bool,
}

fn parse_params(params: Option<&Value>) -> Result<ViewParams, ValidationError> {
    let Some(params) = params.filter(|p| !p.is_null()) else {
        return Ok(ViewParams {
            page: DEFAULT_PAGE,
            include_roles: false,
        });
    };
    let object = as_object(params)?;
    Ok(ViewParams {
        page: optional_page(object, "page")?.unwrap_or(DEFAULT_PAGE),
        include_roles: optional_bool(object, "includeRoles")?.unwrap_or(false),
    })
}

fn ensure_view(
    strategy: &'static str,
    expected: UsersViewMode,
    input: &UsersViewInput,
) -> Result<(), KitError> {
    if input.view == expected {
        return Ok(());
    }
    Err(KitError::Misrouted {
        strategy,
        kind: "view",
        expected: expected.to_string(),
        actual: input.view.to_string(),
    })
}

fn collaborator_failure(view: UsersViewMode, err: anyhow::Error) -> KitError {
    warn!("view: fetch failed view={view}: {err:#}");
    KitError::collaborator(Some(err.to_string()), FETCH_FAILED)
}

pub struct UsersSummaryViewStrategy {
    api: Arc<dyn UsersApiClient>,
}

impl UsersSummaryViewStrategy {
    pub fn new(api: Arc<dyn UsersApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UsersViewStrategy for UsersSummaryViewStrategy {
    fn view(&self) -> UsersViewMode {
        UsersViewMode::Summary
    }

    async fn execute(&self, input: &UsersViewInput) -> Result<UsersViewResult, KitError> {
        ensure_view("UsersSummaryViewStrategy", self.view(), input)?;
        let params = parse_params(input.params.as_ref())?;

        let res = self
            .api
            .fetch_summary(params.page)
            .await
            .map_err(|err| collaborator_failure(self.view(), err))?;

        Ok(UsersViewResult::Table {
            rows: res
                .items
                .into_iter()
                .map(|u| UserRow {
                    id: u.id,
                    name: u.name,
                    email: u.email,
                    roles: None,
                })
                .collect(),
            total: Some(res.total),
        })
    }
}

pub struct UsersDetailViewStrategy {
    api: Arc<dyn UsersApiClient>,
}

impl UsersDetailViewStrategy {
    pub fn new(api: Arc<dyn UsersApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UsersViewStrategy for UsersDetailViewStrategy {
    fn view(&self) -> UsersViewMode {
        UsersViewMode::Detail
    }

    async fn execute(&self, input: &UsersViewInput) -> Result<UsersViewResult, KitError> {
        ensure_view("UsersDetailViewStrategy", self.view(), input)?;
        let ViewParams {
            page,
            include_roles,
        } = parse_params(input.params.as_ref())?;

        let res = self
            .api
            .fetch_detail(page, include_roles)
            .await
            .map_err(|err| collaborator_failure(self.view(), err))?;

        // Flatten profile.email; roles only when asked for.
        Ok(UsersViewResult::Table {
            rows: res
                .users
                .into_iter()
                .map(|u| UserRow {
                    id: u.id,
                    name: u.name,
                    email: Some(u.profile.email),
                    roles: include_roles.then_some(u.roles),
                })
                .collect(),
            total: Some(res.total),
        })
    }
}

pub struct UsersCsvViewStrategy {
    api: Arc<dyn UsersApiClient>,
}

impl UsersCsvViewStrategy {
    pub fn new(api: Arc<dyn UsersApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UsersViewStrategy for UsersCsvViewStrategy {
    fn view(&self) -> UsersViewMode {
        UsersViewMode::Csv
    }

    async fn execute(&self, input: &UsersViewInput) -> Result<UsersViewResult, KitError> {
        ensure_view("UsersCsvViewStrategy", self.view(), input)?;
        let params = parse_params(input.params.as_ref())?;

        let res = self
            .api
            .fetch_csv(params.page)
            .await
            .map_err(|err| collaborator_failure(self.view(), err))?;

        Ok(UsersViewResult::Csv {
            csv_text: res.csv_text,
        })
    }
}

#[cfg(test)]
#[path = "tests/strategies_tests.rs"]
mod tests;
