use std::{collections::HashMap, sync::Arc};

use shared::KitError;
use tracing::debug;

use crate::{
    SearchAllStrategy, SearchApiClient, SearchByEmailStrategy, SearchByIdStrategy,
    SearchByKeywordStrategy, SearchPattern, StubSearchApiClient, UserSearchController,
    UserSearchStrategy, UserSearchStrategyFactory,
};

pub fn bootstrap() -> Result<UserSearchController, KitError> {
    bootstrap_with(Arc::new(StubSearchApiClient::new()))
}

pub fn bootstrap_with(api: Arc<dyn SearchApiClient>) -> Result<UserSearchController, KitError> {
    let strategies: HashMap<SearchPattern, Arc<dyn UserSearchStrategy>> = HashMap::from([
        (
            SearchPattern::ById,
            Arc::new(SearchByIdStrategy::new(api.clone())) as Arc<dyn UserSearchStrategy>,
        ),
        (
            SearchPattern::ByEmail,
            Arc::new(SearchByEmailStrategy::new(api.clone())) as Arc<dyn UserSearchStrategy>,
        ),
        (
            SearchPattern::ByKeyword,
            Arc::new(SearchByKeywordStrategy::new(api.clone())) as Arc<dyn UserSearchStrategy>,
        ),
        (
            SearchPattern::All,
            Arc::new(SearchAllStrategy::new(api)) as Arc<dyn UserSearchStrategy>,
        ),
    ]);

    let factory = UserSearchStrategyFactory::new(strategies);
    factory.verify()?;
    debug!("search: registered patterns={:?}", factory.registered());
    Ok(UserSearchController::new(factory))
}
