use std::{collections::HashMap, sync::Arc};

use shared::KitError;
use tracing::debug;

use crate::{
    ApiClient, CreateUserStrategy, DeleteUserStrategy, StubApiClient, UpdateUserStrategy,
    UserCrudAction, UserCrudController, UserCrudStrategy, UserCrudStrategyFactory,
};

/// Wires the CRUD kit against the stub collaborator.
pub fn bootstrap() -> Result<UserCrudController, KitError> {
    bootstrap_with(Arc::new(StubApiClient::new()))
}

/// Wires collaborator → strategies → factory → controller. Fails if any
/// action is left without a strategy.
pub fn bootstrap_with(api: Arc<dyn ApiClient>) -> Result<UserCrudController, KitError> {
    let strategies: HashMap<UserCrudAction, Arc<dyn UserCrudStrategy>> = HashMap::from([
        (
            UserCrudAction::CreateUser,
            Arc::new(CreateUserStrategy::new(api.clone())) as Arc<dyn UserCrudStrategy>,
        ),
        (
            UserCrudAction::UpdateUser,
            Arc::new(UpdateUserStrategy::new(api.clone())) as Arc<dyn UserCrudStrategy>,
        ),
        (
            UserCrudAction::DeleteUser,
            Arc::new(DeleteUserStrategy::new(api)) as Arc<dyn UserCrudStrategy>,
        ),
    ]);

    let factory = UserCrudStrategyFactory::new(strategies);
    factory.verify()?;
    debug!("crud: registered actions={:?}", factory.registered());
    Ok(UserCrudController::new(factory))
}
