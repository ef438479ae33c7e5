//! User search. The factory infers a search pattern from whichever form
//! fields are filled in and hands the form to that pattern's strategy.

use std::{collections::HashMap, fmt, str::FromStr, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{domain::is_present, domain::UserSummary, Discriminator, KitError, StrategyTable};
use tracing::debug;

pub mod api_client;
pub mod bootstrap;
pub mod strategies;

pub use api_client::{SearchApiClient, StubSearchApiClient, UserDetail};
pub use bootstrap::{bootstrap, bootstrap_with};
pub use strategies::{
    SearchAllStrategy, SearchByEmailStrategy, SearchByIdStrategy, SearchByKeywordStrategy,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSearchForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl UserSearchForm {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn by_keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSearchResult {
    pub items: Vec<UserSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Internal search key; callers only ever hand in a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchPattern {
    ById,
    ByEmail,
    ByKeyword,
    All,
}

impl SearchPattern {
    /// First filled-in field wins: id, then email, then keyword.
    pub fn detect(form: &UserSearchForm) -> Self {
        if is_present(form.id.as_deref()) {
            Self::ById
        } else if is_present(form.email.as_deref()) {
            Self::ByEmail
        } else if is_present(form.keyword.as_deref()) {
            Self::ByKeyword
        } else {
            Self::All
        }
    }
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ById => "ById",
            Self::ByEmail => "ByEmail",
            Self::ByKeyword => "ByKeyword",
            Self::All => "All",
        })
    }
}

impl Discriminator for SearchPattern {
    const KIND: &'static str = "pattern";
    const ALL: &'static [Self] = &[Self::ById, Self::ByEmail, Self::ByKeyword, Self::All];
}

impl FromStr for SearchPattern {
    type Err = KitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[async_trait]
pub trait UserSearchStrategy: Send + Sync {
    fn pattern(&self) -> SearchPattern;
    async fn execute(&self, form: &UserSearchForm) -> Result<UserSearchResult, KitError>;
}

pub struct UserSearchStrategyFactory {
    table: StrategyTable<SearchPattern, dyn UserSearchStrategy>,
}

impl UserSearchStrategyFactory {
    pub fn new(map: HashMap<SearchPattern, Arc<dyn UserSearchStrategy>>) -> Self {
        Self {
            table: StrategyTable::new(map),
        }
    }

    /// Detects the pattern for `form` and returns its strategy.
    pub fn select(&self, form: &UserSearchForm) -> Result<Arc<dyn UserSearchStrategy>, KitError> {
        let pattern = SearchPattern::detect(form);
        debug!("search: detected pattern={pattern}");
        self.select_pattern(pattern)
    }

    pub fn select_pattern(
        &self,
        pattern: SearchPattern,
    ) -> Result<Arc<dyn UserSearchStrategy>, KitError> {
        self.table.select(pattern)
    }

    pub fn verify(&self) -> Result<(), KitError> {
        self.table.verify()
    }

    pub fn registered(&self) -> Vec<SearchPattern> {
        self.table.registered()
    }
}

pub struct UserSearchController {
    factory: UserSearchStrategyFactory,
}

impl UserSearchController {
    pub fn new(factory: UserSearchStrategyFactory) -> Self {
        Self { factory }
    }

    pub async fn dispatch(&self, form: UserSearchForm) -> Result<UserSearchResult, KitError> {
        let strategy = self.factory.select(&form)?;
        strategy.execute(&form).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
