use std::sync::Arc;

use futures::future::join_all;
use shared::{domain::UserSummary, KitError};
use user_search::{bootstrap, bootstrap_with, StubSearchApiClient, UserSearchForm};

#[tokio::test]
async fn search_by_id_returns_the_single_user() {
    let controller = bootstrap().expect("bootstrap");
    let result = controller
        .dispatch(UserSearchForm::by_id("u100"))
        .await
        .expect("search");

    assert_eq!(result.total, Some(1));
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].id, "u100");
}

#[tokio::test]
async fn id_takes_priority_over_email() {
    let api = Arc::new(StubSearchApiClient::new());
    let controller = bootstrap_with(api.clone()).expect("bootstrap");
    let form = UserSearchForm {
        id: Some("x".into()),
        email: Some("y".into()),
        ..UserSearchForm::default()
    };

    controller.dispatch(form).await.expect("search");
    assert_eq!(api.calls(), vec!["GET /users/x".to_string()]);
}

#[tokio::test]
async fn empty_form_lists_all_users() {
    let controller = bootstrap().expect("bootstrap");
    let result = controller
        .dispatch(UserSearchForm::default())
        .await
        .expect("search");
    assert_eq!(
        result.items,
        vec![UserSummary::new("u3", "DefaultUser", None)]
    );
}

#[tokio::test]
async fn failing_backend_is_reported() {
    let controller =
        bootstrap_with(Arc::new(StubSearchApiClient::failing("search backend down")))
            .expect("bootstrap");
    let err = controller
        .dispatch(UserSearchForm::by_email("a@b.com"))
        .await
        .expect_err("should fail");
    assert_eq!(
        err,
        KitError::Collaborator {
            message: "search backend down".into()
        }
    );
}

#[tokio::test]
async fn concurrent_searches_each_get_their_own_pattern() {
    let api = Arc::new(StubSearchApiClient::new());
    let controller = bootstrap_with(api.clone()).expect("bootstrap");

    let forms = vec![
        UserSearchForm::by_id("u1"),
        UserSearchForm::by_email("a@b.com"),
        UserSearchForm::by_keyword("tokyo"),
        UserSearchForm::default(),
    ];
    let results = join_all(forms.into_iter().map(|form| controller.dispatch(form))).await;

    let first_ids: Vec<String> = results
        .into_iter()
        .map(|r| r.expect("search").items[0].id.clone())
        .collect();
    assert_eq!(first_ids, vec!["u1", "u1", "u2", "u3"]);
    assert_eq!(api.calls().len(), 4);
}
