//! Router tests driving the HTTP surface with in-memory repositories

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use clinic_core::ClinicError;
use http_api::ApiServer;
use http_body_util::BodyExt;
use mocks::*;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router(tasks: &MockTaskRepository, doctors: &MockDoctorRepository) -> Router {
    ApiServer::new(Arc::new(tasks.clone()), Arc::new(doctors.clone())).router()
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

async fn send_raw(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_root_and_ping() {
    let (tasks, doctors) = (MockTaskRepository::new(), MockDoctorRepository::new());

    let (status, body) = send(router(&tasks, &doctors), Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "msg": "Healthy" }));

    let (status, body) = send(router(&tasks, &doctors), Method::GET, "/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("pong".to_string()));
}

#[tokio::test]
async fn test_health_reports_unavailable_store() {
    let (tasks, doctors) = (MockTaskRepository::new(), MockDoctorRepository::new());

    let (status, body) = send(router(&tasks, &doctors), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy" }));

    doctors.inject_error(ClinicError::Connection("ping failed".to_string()));
    let (status, body) = send(router(&tasks, &doctors), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["msg"].as_str().unwrap().contains("ping failed"));
}

#[tokio::test]
async fn test_create_then_get_task() {
    let (tasks, doctors) = (MockTaskRepository::new(), MockDoctorRepository::new());

    let (status, body) = send(
        router(&tasks, &doctors),
        Method::POST,
        "/tasks/",
        Some(json!({ "Title": "buy milk", "Body": "2%" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);

    let (status, body) = send(
        router(&tasks, &doctors),
        Method::GET,
        &format!("/tasks/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ID": id, "Title": "buy milk", "Body": "2%" }));
}

#[tokio::test]
async fn test_list_tasks_with_and_without_trailing_slash() {
    let tasks = MockTaskRepository::with_tasks(create_test_tasks(2));
    let doctors = MockDoctorRepository::new();

    for uri in ["/tasks/", "/tasks"] {
        let (status, body) = send(router(&tasks, &doctors), Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tasks"].as_array().unwrap().len(), 2);
        assert_eq!(body["tasks"][0]["Title"], "Task 1");
    }
}

#[tokio::test]
async fn test_list_tasks_storage_failure_is_not_found() {
    let (tasks, doctors) = (MockTaskRepository::new(), MockDoctorRepository::new());
    tasks.inject_error(ClinicError::Query("cursor died".to_string()));

    let (status, body) = send(router(&tasks, &doctors), Method::GET, "/tasks/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["msg"].as_str().unwrap().contains("cursor died"));
}

#[tokio::test]
async fn test_get_task_with_invalid_id_is_bad_request() {
    let (tasks, doctors) = (MockTaskRepository::new(), MockDoctorRepository::new());

    let (status, body) = send(
        router(&tasks, &doctors),
        Method::GET,
        &format!("/tasks/{MALFORMED_ID}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].is_string());

    let (status, _) = send(
        router(&tasks, &doctors),
        Method::GET,
        &format!("/tasks/{UNKNOWN_ID}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_never_reaches_repository() {
    let (tasks, doctors) = (MockTaskRepository::new(), MockDoctorRepository::new());

    let (status, body) = send_raw(router(&tasks, &doctors), Method::POST, "/tasks/", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].is_string());

    let (status, _) = send_raw(router(&tasks, &doctors), Method::PUT, "/doctors/", "[1, 2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(tasks.call_history().is_empty());
    assert!(doctors.call_history().is_empty());
}

#[tokio::test]
async fn test_update_task_returns_post_update_document() {
    let tasks = MockTaskRepository::with_tasks(vec![create_test_task()]);
    let doctors = MockDoctorRepository::new();
    let id = create_test_task().id;

    let (status, body) = send(
        router(&tasks, &doctors),
        Method::PUT,
        "/tasks/",
        Some(json!({ "ID": id, "Title": "buy bread" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "task": { "ID": id, "Title": "buy bread", "Body": "2%" } })
    );
}

#[tokio::test]
async fn test_update_task_error_statuses() {
    let (tasks, doctors) = (MockTaskRepository::new(), MockDoctorRepository::new());

    let (status, body) = send(
        router(&tasks, &doctors),
        Method::PUT,
        "/tasks/",
        Some(json!({ "ID": UNKNOWN_ID, "Title": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["msg"].as_str().unwrap().contains(UNKNOWN_ID));
    assert!(tasks.is_empty(), "Updates never insert");

    let (status, _) = send(
        router(&tasks, &doctors),
        Method::PUT,
        "/tasks/",
        Some(json!({ "Title": "missing id" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    tasks.inject_error(ClinicError::Database("write conflict".to_string()));
    let (status, body) = send(
        router(&tasks, &doctors),
        Method::POST,
        "/tasks/",
        Some(json!({ "Title": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["msg"].as_str().unwrap().contains("write conflict"));
}

#[tokio::test]
async fn test_update_unknown_doctor_is_a_server_error() {
    let (tasks, doctors) = (MockTaskRepository::new(), MockDoctorRepository::new());

    let (status, body) = send(
        router(&tasks, &doctors),
        Method::PUT,
        "/doctors/",
        Some(json!({ "ID": UNKNOWN_ID, "Rating": 4.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["msg"].as_str().unwrap().contains(UNKNOWN_ID));
    assert!(doctors.is_empty(), "Updates never insert");
}

#[tokio::test]
async fn test_doctor_listing_pages_and_filters() {
    let tasks = MockTaskRepository::new();
    let doctors = MockDoctorRepository::new();
    for doctor in create_ranked_doctors(25, "dentist") {
        clinic_core::DoctorRepository::create(&doctors, doctor)
            .await
            .unwrap();
    }

    let (status, body) = send(
        router(&tasks, &doctors),
        Method::GET,
        "/doctors/?limit=10&page=2&servicerole=dentist",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pages"], 3);
    let listed = body["doctors"].as_array().unwrap();
    assert_eq!(listed.len(), 10);
    assert_eq!(listed[0]["Name"], "Doctor 15");
    assert_eq!(listed[9]["Name"], "Doctor 6");

    let (status, body) = send(
        router(&tasks, &doctors),
        Method::GET,
        "/doctors?gender=male&limit=100",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pages"], 1);
    assert_eq!(body["doctors"].as_array().unwrap().len(), 12);

    let (status, body) = send(router(&tasks, &doctors), Method::GET, "/doctors/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["doctors"].as_array().unwrap().len(), 10);
    assert_eq!(body["doctors"][0]["Rating"], 2.5);
}

#[tokio::test]
async fn test_doctor_listing_rejects_bad_query() {
    let (tasks, doctors) = (MockTaskRepository::new(), MockDoctorRepository::new());

    for uri in ["/doctors/?limit=0", "/doctors/?limit=101", "/doctors/?page=two"] {
        let (status, body) = send(router(&tasks, &doctors), Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["msg"].is_string());
    }
}

#[tokio::test]
async fn test_create_get_and_update_doctor() {
    let (tasks, doctors) = (MockTaskRepository::new(), MockDoctorRepository::new());
    let payload = serde_json::to_value(create_new_doctor()).unwrap();

    let (status, body) = send(router(&tasks, &doctors), Method::POST, "/doctors/", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        router(&tasks, &doctors),
        Method::GET,
        &format!("/doctors/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ID"], id.as_str());
    assert_eq!(body["ServiceRole"], "cardiology");
    assert_eq!(body["VideoIntroductionURL"], "https://video.example.com/ada");

    let (status, body) = send(
        router(&tasks, &doctors),
        Method::PUT,
        "/doctors/",
        Some(json!({ "ID": id, "Rating": 4.1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"]["Rating"], 4.1);
    assert_eq!(body["task"]["Name"], "Dr. Ada Lovelace");
}

#[tokio::test]
async fn test_cors_headers_are_permissive() {
    let (tasks, doctors) = (MockTaskRepository::new(), MockDoctorRepository::new());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/ping")
        .header(header::ORIGIN, "https://frontend.example.com")
        .body(Body::empty())
        .unwrap();

    let response = router(&tasks, &doctors).oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
