use std::{collections::HashMap, sync::Arc};

use shared::KitError;
use tracing::debug;

use crate::{
    StubUsersApiClient, UsersApiClient, UsersCsvViewStrategy, UsersDetailViewStrategy,
    UsersSummaryViewStrategy, UsersViewController, UsersViewMode, UsersViewStrategy,
    UsersViewStrategyFactory,
};

pub fn bootstrap() -> Result<UsersViewController, KitError> {
    bootstrap_with(Arc::new(StubUsersApiClient::new()))
}

pub fn bootstrap_with(api: Arc<dyn UsersApiClient>) -> Result<UsersViewController, KitError> {
    let strategies: HashMap<UsersViewMode, Arc<dyn UsersViewStrategy>> = HashMap::from([
        (
            UsersViewMode::Summary,
            Arc::new(UsersSummaryViewStrategy::new(api.clone())) as Arc<dyn UsersViewStrategy>,
        ),
        (
            UsersViewMode::Detail,
            Arc::new(UsersDetailViewStrategy::new(api.clone())) as Arc<dyn UsersViewStrategy>,
        ),
        (
            UsersViewMode::Csv,
            Arc::new(UsersCsvViewStrategy::new(api)) as Arc<dyn UsersViewStrategy>,
        ),
    ]);

    let factory = UsersViewStrategyFactory::new(strategies);
    factory.verify()?;
    debug!("view: registered views={:?}", factory.registered());
    Ok(UsersViewController::new(factory))
}
