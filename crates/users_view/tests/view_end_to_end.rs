use std::sync::Arc;

use serde_json::json;
use shared::ErrorCode;
use users_view::{
    bootstrap, bootstrap_with, StubUsersApiClient, UsersViewInput, UsersViewMode, UsersViewResult,
};

#[tokio::test]
async fn csv_view_returns_csv_text() {
    let controller = bootstrap().expect("bootstrap");
    let result = controller
        .dispatch(UsersViewInput::new(UsersViewMode::Csv).with_params(json!({ "page": 1 })))
        .await
        .expect("csv");

    match result {
        UsersViewResult::Csv { csv_text } => assert!(csv_text.starts_with("id,name,email\n")),
        other => panic!("expected csv, got {other:?}"),
    }
}

#[tokio::test]
async fn detail_with_roles_serializes_roles() {
    let controller = bootstrap().expect("bootstrap");
    let input: UsersViewInput = serde_json::from_value(json!({
        "view": "detail",
        "params": { "includeRoles": true, "page": 1 }
    }))
    .expect("input");

    let result = controller.dispatch(input).await.expect("detail");
    assert_eq!(
        serde_json::to_value(result).expect("json"),
        json!({
            "kind": "table",
            "rows": [{
                "id": "u1",
                "name": "Taro",
                "email": "taro@example.com",
                "roles": ["admin"]
            }],
            "total": 1
        })
    );
}

#[tokio::test]
async fn summary_view_uses_table_kind() {
    let controller = bootstrap().expect("bootstrap");
    let result = controller
        .dispatch(UsersViewInput::new(UsersViewMode::Summary))
        .await
        .expect("summary");
    assert!(matches!(result, UsersViewResult::Table { total: Some(1), .. }));
}

#[tokio::test]
async fn collaborator_outage_maps_to_collaborator_code() {
    let controller = bootstrap_with(Arc::new(StubUsersApiClient::failing("maintenance")))
        .expect("bootstrap");
    let err = controller
        .dispatch(UsersViewInput::new(UsersViewMode::Detail))
        .await
        .expect_err("should fail");
    assert_eq!(err.code(), ErrorCode::Collaborator);
    assert_eq!(err.to_string(), "maintenance");
}
