//! End-to-end tests of the view-model against a mock collection resource.

use roster_client::{ClientConfig, RosterClient, UserId};
use roster_view::{
    render, DraftField, EditableField, ErrorPolicy, UserListViewModel, ViewError,
};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn users_json(n: u64) -> serde_json::Value {
    serde_json::Value::Array(
        (1..=n)
            .map(|i| {
                serde_json::json!({
                    "id": i,
                    "name": format!("User {}", i),
                    "username": format!("user{}", i),
                    "email": format!("user{}@example.com", i),
                    "website": format!("user{}.example.com", i)
                })
            })
            .collect(),
    )
}

async fn setup(policy: ErrorPolicy) -> (MockServer, UserListViewModel<RosterClient>) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_json(10)))
        .mount(&mock_server)
        .await;

    let client = RosterClient::new(ClientConfig::new(mock_server.uri())).unwrap();
    let view = UserListViewModel::new(client, policy);
    view.load().await.unwrap();

    (mock_server, view)
}

#[tokio::test]
async fn test_load_renders_all_rows() {
    let (_mock_server, view) = setup(ErrorPolicy::PerOperation).await;

    assert_eq!(view.count().await, 10);

    let page = render(&view.snapshot().await);
    assert!(page.contains("user10@example.com"));
    assert_eq!(page.lines().count(), 14);
}

#[tokio::test]
async fn test_load_failure_blanks_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = RosterClient::new(ClientConfig::new(mock_server.uri())).unwrap();
    let view = UserListViewModel::new(client, ErrorPolicy::PerOperation);

    assert!(view.load().await.is_err());

    let page = render(&view.snapshot().await);
    assert!(page.starts_with("Error fetching users:"));
    assert_eq!(page.lines().count(), 1);
}

#[tokio::test]
async fn test_add_user_round_trip() {
    let (mock_server, view) = setup(ErrorPolicy::PerOperation).await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 11,
            "name": "Ada",
            "email": "ada@example.com",
            "website": "ada.dev"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    view.set_draft(DraftField::Name, "Ada").await;
    view.set_draft(DraftField::Email, "ada@example.com").await;
    view.set_draft(DraftField::Website, "ada.dev").await;

    let created = view.add_user().await.unwrap().unwrap();

    assert_eq!(created.id, UserId::Numeric(11));
    assert_eq!(view.count().await, 11);
    assert!(view.draft().await.name.is_empty());
}

#[tokio::test]
async fn test_blank_draft_sends_no_request() {
    let (mock_server, view) = setup(ErrorPolicy::PerOperation).await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    view.set_draft(DraftField::Name, "   ").await;
    view.set_draft(DraftField::Email, "ada@example.com").await;
    view.set_draft(DraftField::Website, "ada.dev").await;

    assert!(view.add_user().await.unwrap().is_none());
    assert_eq!(view.count().await, 10);
}

#[tokio::test]
async fn test_update_keeps_unmodelled_members() {
    let (mock_server, view) = setup(ErrorPolicy::PerOperation).await;

    Mock::given(method("PUT"))
        .and(path("/users/2"))
        .and(wiremock::matchers::body_partial_json(serde_json::json!({
            "email": "edited@example.com",
            "username": "user2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 2,
            "name": "User 2",
            "username": "user2",
            "email": "edited@example.com",
            "website": "user2.example.com"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    view.on_change(&UserId::Numeric(2), EditableField::Email, "edited@example.com")
        .await;
    let updated = view.update_user(&UserId::Numeric(2)).await.unwrap();

    assert_eq!(updated.email, "edited@example.com");
    assert_eq!(view.count().await, 10);
}

#[tokio::test]
async fn test_concurrent_deletes_of_same_id() {
    let (mock_server, view) = setup(ErrorPolicy::PerOperation).await;

    Mock::given(method("DELETE"))
        .and(path("/users/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let id = UserId::Numeric(3);
    let (first, second) = tokio::join!(view.delete_user(&id), view.delete_user(&id));

    assert!(first.is_ok());
    assert!(matches!(second, Err(ViewError::Busy(UserId::Numeric(3)))));
    assert_eq!(view.count().await, 9);
}

#[tokio::test]
async fn test_global_policy_blanks_table_on_mutation_failure() {
    let (mock_server, view) = setup(ErrorPolicy::Global).await;

    Mock::given(method("DELETE"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    assert!(view.delete_user(&UserId::Numeric(1)).await.is_err());

    let page = render(&view.snapshot().await);
    assert!(page.starts_with("Error fetching users:"));
    assert!(page.contains("boom"));
}

#[tokio::test]
async fn test_per_operation_policy_keeps_table_on_mutation_failure() {
    let (mock_server, view) = setup(ErrorPolicy::PerOperation).await;

    Mock::given(method("PUT"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    assert!(view.update_user(&UserId::Numeric(1)).await.is_err());

    let page = render(&view.snapshot().await);
    assert!(page.starts_with("ID"));
    assert!(page.contains("[error] Failed to update user"));
}
