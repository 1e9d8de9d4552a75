use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use habit_tracker_server::entities::{entry, habit};
use habit_tracker_server::entry::EntryState;
use habit_tracker_server::habit::HabitState;
use habit_tracker_server::progress::ProgressState;
use habit_tracker_server::web::api::create_api_router;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};
use serde_json::Value;
use std::sync::Arc;
use testcontainers_modules::{postgres, testcontainers};
use tower::ServiceExt;

mod common;

pub struct TestContext {
    #[allow(dead_code)] // container is kept to ensure it's not dropped
    pub container: testcontainers::ContainerAsync<postgres::Postgres>,
    pub db: DatabaseConnection,
}

async fn setup() -> anyhow::Result<TestContext> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let container = common::setup_container().await?;
    let db = common::setup_db(&container).await?;
    Ok(TestContext { db, container })
}

fn build_api_router(db: Arc<DatabaseConnection>) -> Router {
    create_api_router(
        Arc::new(HabitState { db: db.clone() }),
        Arc::new(EntryState { db: db.clone() }),
        Arc::new(ProgressState { db }),
    )
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn json_request(method: Method, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Test helper to create a habit and return its ID.
async fn create_test_habit(db: &DatabaseConnection) -> i32 {
    let habit = habit::ActiveModel {
        title: ActiveValue::Set("Read".to_string()),
        target: ActiveValue::Set(1),
        ..Default::default()
    };

    let result = habit.insert(db).await.unwrap();
    result.id
}

#[tokio::test]
async fn can_record_entry_via_api() {
    let state = setup().await.expect("Failed to setup test context");
    let db = Arc::new(state.db);
    let habit_id = create_test_habit(&db).await;
    let app = build_api_router(db);

    let body = format!(
        r#"{{"habitId":{},"date":"2024-01-01","completed":true}}"#,
        habit_id
    );
    let request = json_request(Method::POST, "/api/entries", body);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let recorded = response_json(response).await;
    assert_eq!(recorded["habitId"], habit_id);
    assert_eq!(recorded["date"], "2024-01-01");
    assert_eq!(recorded["completed"], true);
    assert!(recorded["id"].is_number());
}

#[tokio::test]
async fn entry_json_shape_uses_camel_case_keys() {
    let state = setup().await.expect("Failed to setup test context");
    let db = Arc::new(state.db);
    let habit_id = create_test_habit(&db).await;
    let app = build_api_router(db);

    let body = format!(
        r#"{{"habitId":{},"date":"2024-01-01","completed":true}}"#,
        habit_id
    );
    let request = json_request(Method::POST, "/api/entries", body);
    let response = app.oneshot(request).await.unwrap();
    let recorded = response_json(response).await;

    let object = recorded.as_object().unwrap();
    assert_eq!(object.len(), 4);
    assert!(object.contains_key("id"));
    assert!(object.contains_key("habitId"));
    assert!(object.contains_key("date"));
    assert!(object.contains_key("completed"));
}

#[tokio::test]
async fn recording_same_pair_twice_keeps_single_entry() {
    let state = setup().await.expect("Failed to setup test context");
    let db = Arc::new(state.db);
    let habit_id = create_test_habit(&db).await;
    let app = build_api_router(db.clone());

    let body = format!(
        r#"{{"habitId":{},"date":"2024-01-01","completed":true}}"#,
        habit_id
    );
    let request = json_request(Method::POST, "/api/entries", body);
    let first = response_json(app.clone().oneshot(request).await.unwrap()).await;

    let body = format!(
        r#"{{"habitId":{},"date":"2024-01-01","completed":false}}"#,
        habit_id
    );
    let request = json_request(Method::POST, "/api/entries", body);
    let second = response_json(app.oneshot(request).await.unwrap()).await;

    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["completed"], false);

    let all_entries = entry::Entity::find().all(db.as_ref()).await.unwrap();
    assert_eq!(all_entries.len(), 1);
    assert!(!all_entries[0].completed);
}

#[tokio::test]
async fn completed_defaults_to_false_when_omitted() {
    let state = setup().await.expect("Failed to setup test context");
    let db = Arc::new(state.db);
    let habit_id = create_test_habit(&db).await;
    let app = build_api_router(db);

    let body = format!(r#"{{"habitId":{},"date":"2024-01-02"}}"#, habit_id);
    let request = json_request(Method::POST, "/api/entries", body);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let recorded = response_json(response).await;
    assert_eq!(recorded["completed"], false);
}

#[tokio::test]
async fn accepts_entry_for_unknown_habit() {
    let state = setup().await.expect("Failed to setup test context");
    let app = build_api_router(Arc::new(state.db));

    let body = r#"{"habitId":999999,"date":"2024-01-01","completed":true}"#.to_string();
    let request = json_request(Method::POST, "/api/entries", body);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let recorded = response_json(response).await;
    assert_eq!(recorded["habitId"], 999999);
}

#[tokio::test]
async fn malformed_json_body_is_rejected() {
    let state = setup().await.expect("Failed to setup test context");
    let app = build_api_router(Arc::new(state.db));

    let request = json_request(Method::POST, "/api/entries", "not json".to_string());
    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
}
