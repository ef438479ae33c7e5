use super::*;
use serde_json::json;
use std::sync::Mutex;

struct FixedStrategy {
    action: UserCrudAction,
    seen: Mutex<Vec<UserCrudAction>>,
}

impl FixedStrategy {
    fn new(action: UserCrudAction) -> Self {
        Self {
            action,
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserCrudStrategy for FixedStrategy {
    fn action(&self) -> UserCrudAction {
        self.action
    }

    async fn execute(&self, input: &UserCrudInput) -> Result<UserCrudResult, KitError> {
        self.seen.lock().expect("lock").push(input.action);
        if input.payload.get("fail").is_some() {
            return Err(KitError::collaborator(Some("boom".into()), "create failed"));
        }
        Ok(UserCrudResult::new(format!("/fixed/{}", self.action)))
    }
}

fn factory_with(actions: &[UserCrudAction]) -> UserCrudStrategyFactory {
    UserCrudStrategyFactory::new(
        actions
            .iter()
            .map(|a| (*a, Arc::new(FixedStrategy::new(*a)) as Arc<dyn UserCrudStrategy>))
            .collect(),
    )
}

#[test]
fn factory_routes_every_action_to_its_own_strategy() {
    let api = Arc::new(StubApiClient::new());
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

    for action in UserCrudAction::ALL {
        assert_eq!(factory.select(*action).expect("strategy").action(), *action);
    }
    assert_eq!(factory.registered(), UserCrudAction::ALL.to_vec());
}

#[test]
fn unregistered_action_is_named_in_the_error() {
    let factory = factory_with(&[UserCrudAction::CreateUser]);
    let err = factory
        .select(UserCrudAction::DeleteUser)
        .err()
        .expect("missing strategy");
    assert_eq!(err.to_string(), "unsupported action: DeleteUser");
    assert_eq!(
        factory.verify(),
        Err(KitError::unsupported("action", "UpdateUser"))
    );
}

#[test]
fn unknown_action_names_fail_to_parse() {
    assert_eq!(
        "UpdateUser".parse::<UserCrudAction>(),
        Ok(UserCrudAction::UpdateUser)
    );
    let err = "ArchiveUser".parse::<UserCrudAction>().expect_err("unknown");
    assert_eq!(err.to_string(), "unsupported action: ArchiveUser");
}

#[test]
fn input_deserializes_with_missing_payload_as_null() {
    let input: UserCrudInput =
        serde_json::from_value(json!({ "action": "DeleteUser" })).expect("input");
    assert_eq!(input.action, UserCrudAction::DeleteUser);
    assert!(input.payload.is_null());

    let err = serde_json::from_value::<UserCrudInput>(json!({ "action": "Archive" }));
    assert!(err.is_err());
}

#[test]
fn result_serializes_with_camel_case_route() {
    let value = serde_json::to_value(UserCrudResult::new("/users")).expect("json");
    assert_eq!(value, json!({ "nextRoute": "/users" }));
}

#[tokio::test]
async fn controller_passes_strategy_result_through() {
    let controller = UserCrudController::new(factory_with(UserCrudAction::ALL));
    let result = controller
        .dispatch(UserCrudInput::new(UserCrudAction::UpdateUser, json!({})))
        .await
        .expect("dispatch");
    assert_eq!(result.next_route, "/fixed/UpdateUser");
}

#[tokio::test]
async fn controller_passes_strategy_error_through_unchanged() {
    let controller = UserCrudController::new(factory_with(UserCrudAction::ALL));
    let err = controller
        .dispatch(UserCrudInput::new(
            UserCrudAction::CreateUser,
            json!({ "fail": true }),
        ))
        .await
        .expect_err("should fail");
    assert_eq!(err, KitError::collaborator(Some("boom".into()), "create failed"));
}

#[tokio::test]
async fn controller_surfaces_missing_registration() {
    let controller = UserCrudController::new(factory_with(&[UserCrudAction::CreateUser]));
    let err = controller
        .dispatch(UserCrudInput::new(UserCrudAction::DeleteUser, json!({ "id": "1" })))
        .await
        .expect_err("should fail");
    assert_eq!(err, KitError::unsupported("action", "DeleteUser"));
}
