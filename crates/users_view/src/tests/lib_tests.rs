use super::*;
use crate::StubUsersApiClient;
use serde_json::json;

#[test]
fn factory_routes_every_view_to_its_own_strategy() {
    let controller = bootstrap().expect("bootstrap");
    let factory = &controller.factory;

    for view in UsersViewMode::ALL {
        assert_eq!(factory.select(*view).expect("strategy").view(), *view);
    }
    assert_eq!(factory.registered(), UsersViewMode::ALL.to_vec());
}

#[test]
fn missing_view_registration_is_named() {
    let api = Arc::new(StubUsersApiClient::new());
    let factory = UsersViewStrategyFactory::new(HashMap::from([(
        UsersViewMode::Summary,
        Arc::new(UsersSummaryViewStrategy::new(api)) as Arc<dyn UsersViewStrategy>,
    )]));

    let err = factory.select(UsersViewMode::Csv).err().expect("unregistered");
    assert_eq!(err.to_string(), "unsupported view: csv");
    assert_eq!(factory.verify(), Err(KitError::unsupported("view", "detail")));
}

#[test]
fn view_names_are_lowercase_on_the_wire() {
    assert_eq!("csv".parse::<UsersViewMode>(), Ok(UsersViewMode::Csv));
    assert_eq!(
        "Csv".parse::<UsersViewMode>(),
        Err(KitError::unsupported("view", "Csv"))
    );
    let input: UsersViewInput =
        serde_json::from_value(json!({ "view": "detail", "params": { "includeRoles": true } }))
            .expect("input");
    assert_eq!(input.view, UsersViewMode::Detail);
    assert_eq!(input.params, Some(json!({ "includeRoles": true })));
}

#[test]
fn results_are_tagged_by_kind() {
    let table = UsersViewResult::Table {
        rows: vec![UserRow {
            id: "u1".into(),
            name: "Taro".into(),
            email: None,
            roles: None,
        }],
        total: Some(1),
    };
    assert_eq!(
        serde_json::to_value(table).expect("json"),
        json!({ "kind": "table", "rows": [{ "id": "u1", "name": "Taro" }], "total": 1 })
    );

    let csv = UsersViewResult::Csv {
        csv_text: "id\n".into(),
    };
    assert_eq!(
        serde_json::to_value(csv).expect("json"),
        json!({ "kind": "csv", "csvText": "id\n" })
    );
}
