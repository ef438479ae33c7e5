//! One strategy per search pattern. Each hides its endpoint's response shape
//! behind the common `items`/`total` result.

use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    domain::{UserPage, UserSummary, DEFAULT_PAGE},
    payload::{check_page, required_str},
    KitError,
};
use tracing::warn;

use crate::{SearchApiClient, SearchPattern, UserSearchForm, UserSearchResult, UserSearchStrategy};

const SEARCH_FAILED: &str = "search failed";

fn page_of(form: &UserSearchForm) -> Result<u32, KitError> {
    Ok(check_page(form.page, "page")?.unwrap_or(DEFAULT_PAGE))
}

/// Rejects a form whose detected pattern belongs to another strategy.
fn ensure_pattern(
    strategy: &'static str,
    expected: SearchPattern,
    form: &UserSearchForm,
) -> Result<(), KitError> {
    let actual = SearchPattern::detect(form);
    if actual == expected {
        return Ok(());
    }
    Err(KitError::Misrouted {
        strategy,
        kind: "pattern",
        expected: expected.to_string(),
        actual: actual.to_string(),
    })
}

fn collaborator_failure(pattern: SearchPattern, err: anyhow::Error) -> KitError {
    warn!("search: {pattern} lookup failed: {err:#}");
    KitError::collaborator(Some(err.to_string()), SEARCH_FAILED)
}

fn from_page(page: UserPage) -> UserSearchResult {
    UserSearchResult {
        items: page.items,
        total: Some(page.total),
    }
}

pub struct SearchByIdStrategy {
    api: Arc<dyn SearchApiClient>,
}

impl SearchByIdStrategy {
    pub fn new(api: Arc<dyn SearchApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UserSearchStrategy for SearchByIdStrategy {
    fn pattern(&self) -> SearchPattern {
        SearchPattern::ById
    }

    async fn execute(&self, form: &UserSearchForm) -> Result<UserSearchResult, KitError> {
        ensure_pattern("SearchByIdStrategy", self.pattern(), form)?;
        let id = required_str(form.id.as_deref(), "id")?;

        let user = self
            .api
            .fetch_user_by_id(id)
            .await
            .map_err(|err| collaborator_failure(self.pattern(), err))?;

        // Detail response becomes a single-row list.
        Ok(UserSearchResult {
            items: vec![UserSummary::new(user.id, user.name, Some(user.email))],
            total: Some(1),
        })
    }
}

pub struct SearchByEmailStrategy {
    api: Arc<dyn SearchApiClient>,
}

impl SearchByEmailStrategy {
    pub fn new(api: Arc<dyn SearchApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UserSearchStrategy for SearchByEmailStrategy {
    fn pattern(&self) -> SearchPattern {
        SearchPattern::ByEmail
    }

    async fn execute(&self, form: &UserSearchForm) -> Result<UserSearchResult, KitError> {
        ensure_pattern("SearchByEmailStrategy", self.pattern(), form)?;
        let email = required_str(form.email.as_deref(), "email")?;
        let page = page_of(form)?;

        self.api
            .search_users_by_email(email, page)
            .await
            .map(from_page)
            .map_err(|err| collaborator_failure(self.pattern(), err))
    }
}

pub struct SearchByKeywordStrategy {
    api: Arc<dyn SearchApiClient>,
}

impl SearchByKeywordStrategy {
    pub fn new(api: Arc<dyn SearchApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UserSearchStrategy for SearchByKeywordStrategy {
    fn pattern(&self) -> SearchPattern {
        SearchPattern::ByKeyword
    }

    async fn execute(&self, form: &UserSearchForm) -> Result<UserSearchResult, KitError> {
        ensure_pattern("SearchByKeywordStrategy", self.pattern(), form)?;
        let keyword = required_str(form.keyword.as_deref(), "keyword")?;
        let page = page_of(form)?;

        self.api
            .search_users_by_keyword(keyword, page)
            .await
            .map(from_page)
            .map_err(|err| collaborator_failure(self.pattern(), err))
    }
}

pub struct SearchAllStrategy {
    api: Arc<dyn SearchApiClient>,
}

impl SearchAllStrategy {
    pub fn new(api: Arc<dyn SearchApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UserSearchStrategy for SearchAllStrategy {
    fn pattern(&self) -> SearchPattern {
        SearchPattern::All
    }

    async fn execute(&self, form: &UserSearchForm) -> Result<UserSearchResult, KitError> {
        ensure_pattern("SearchAllStrategy", self.pattern(), form)?;
        let page = page_of(form)?;

        self.api
            .fetch_users(page)
            .await
            .map(from_page)
            .map_err(|err| collaborator_failure(self.pattern(), err))
    }
}

#[cfg(test)]
#[path = "tests/strategies_tests.rs"]
mod tests;
