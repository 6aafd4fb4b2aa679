use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use platform_db::DatabaseSettings;
use roster_server::{
    config::AppConfig,
    http::{AppState, build_router},
};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app() -> Router {
    let db = platform_db::connect(&DatabaseSettings::new("sqlite::memory:"))
        .await
        .unwrap();
    Migrator::up(&db, None).await.unwrap();
    let config = Arc::new(AppConfig {
        cors_allowed_origins: vec![],
    });
    build_router(AppState::new(db, config))
}

async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

async fn create_employee(app: &Router, first: &str) -> String {
    let (status, body) = request(
        app,
        Method::POST,
        "/employee",
        Some(json!({
            "firstName": first,
            "lastName": "Evans",
            "position": "Developer",
            "department": "Engineering"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    as_json(&body)["employeeId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_then_fetch_employee() {
    let app = test_app().await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/employee",
        Some(json!({
            "employeeId": "client-chosen",
            "firstName": "John",
            "lastName": "Lennon",
            "position": "Development Manager",
            "department": "Engineering"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let created = as_json(&body);
    let id = created["employeeId"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    // The server assigns the identity; the one in the payload is ignored.
    assert_ne!(id, "client-chosen");
    assert_eq!(created["firstName"], "John");
    assert_eq!(created["lastName"], "Lennon");
    assert_eq!(created["position"], "Development Manager");
    assert_eq!(created["department"], "Engineering");
    assert_eq!(created["directReports"], Value::Null);

    let (status, body) = request(&app, Method::GET, &format!("/employee/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), created);
}

#[tokio::test]
async fn update_takes_identity_from_the_path() {
    let app = test_app().await;
    let id = create_employee(&app, "Ringo").await;

    let (status, body) = request(
        &app,
        Method::PUT,
        &format!("/employee/{}", id),
        Some(json!({
            "employeeId": "somebody-else",
            "firstName": "Ringo",
            "lastName": "Starr",
            "position": "Developer V",
            "department": "Engineering"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let updated = as_json(&body);
    assert_eq!(updated["employeeId"].as_str().unwrap(), id);
    assert_eq!(updated["position"], "Developer V");

    let (status, body) = request(&app, Method::GET, &format!("/employee/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), updated);
}

#[tokio::test]
async fn update_is_a_full_replace() {
    let app = test_app().await;
    let id = create_employee(&app, "Pete").await;

    // Fields left out of the payload are cleared, not merged.
    let (status, body) = request(
        &app,
        Method::PUT,
        &format!("/employee/{}", id),
        Some(json!({ "firstName": "Pete" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let updated = as_json(&body);
    assert_eq!(updated["firstName"], "Pete");
    assert_eq!(updated["lastName"], Value::Null);
    assert_eq!(updated["position"], Value::Null);
    assert_eq!(updated["department"], Value::Null);
}

#[tokio::test]
async fn empty_report_list_round_trips_as_empty_array() {
    let app = test_app().await;
    let id = create_employee(&app, "Stuart").await;

    // An explicitly empty list is served as [], never collapsed to null.
    let (status, body) = request(
        &app,
        Method::PUT,
        &format!("/employee/{}", id),
        Some(json!({
            "firstName": "Stuart",
            "directReports": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["directReports"], json!([]));

    let (status, body) = request(&app, Method::GET, &format!("/employee/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["directReports"], json!([]));
}

#[tokio::test]
async fn missing_employee_is_404_with_reason() {
    let app = test_app().await;

    let (status, body) = request(&app, Method::GET, "/employee/nobody-here", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        String::from_utf8(body).unwrap(),
        "Invalid employeeId: nobody-here"
    );
}

#[tokio::test]
async fn reporting_structure_counts_the_tree() {
    let app = test_app().await;
    let root = create_employee(&app, "Root").await;
    let left = create_employee(&app, "Left").await;
    let right = create_employee(&app, "Right").await;
    let nested = create_employee(&app, "Nested").await;

    let (status, _) = request(
        &app,
        Method::PUT,
        &format!("/employee/{}", right),
        Some(json!({
            "firstName": "Right",
            "directReports": [{"employeeId": nested}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(
        &app,
        Method::PUT,
        &format!("/employee/{}", root),
        Some(json!({
            "firstName": "Root",
            "directReports": [{"employeeId": left}, {"employeeId": right}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(
        &app,
        Method::GET,
        &format!("/employee/{}/reportingStructure", root),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let structure = as_json(&body);
    assert_eq!(structure["numberOfReports"], 3);
    assert_eq!(structure["employee"]["employeeId"].as_str().unwrap(), root);
}

#[tokio::test]
async fn reporting_structure_propagates_missing_reports() {
    let app = test_app().await;
    let root = create_employee(&app, "Root").await;

    let (status, _) = request(
        &app,
        Method::PUT,
        &format!("/employee/{}", root),
        Some(json!({
            "firstName": "Root",
            "directReports": [{"employeeId": "ghost"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(
        &app,
        Method::GET,
        &format!("/employee/{}/reportingStructure", root),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body).unwrap(), "Invalid employeeId: ghost");
}

#[tokio::test]
async fn compensation_round_trips() {
    let app = test_app().await;
    let id = create_employee(&app, "Paid").await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/compensation",
        Some(json!({
            "employee": {"employeeId": id},
            "salary": 65000.75,
            "effectiveDate": "2023-04-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["salary"].to_string(), "65000.75");

    let (status, body) = request(
        &app,
        Method::GET,
        &format!("/employee/{}/compensation", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let compensation = as_json(&body);
    assert_eq!(compensation["employee"]["employeeId"].as_str().unwrap(), id);
    assert_eq!(compensation["salary"].to_string(), "65000.75");
    assert_eq!(compensation["effectiveDate"], "2023-04-01");
}

#[tokio::test]
async fn salary_precision_survives_the_wire() {
    let app = test_app().await;
    let id = create_employee(&app, "Precise").await;

    // More digits than an f64 can carry; the literal must come back as sent.
    let payload = format!(
        r#"{{"employee":{{"employeeId":"{}"}},"salary":123456789.123456789,"effectiveDate":"2024-01-15"}}"#,
        id
    );
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/compensation")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, body) = request(
        &app,
        Method::GET,
        &format!("/employee/{}/compensation", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["salary"].to_string(), "123456789.123456789");
}

#[tokio::test]
async fn missing_compensation_is_404_with_reason() {
    let app = test_app().await;

    let (status, body) = request(&app, Method::GET, "/employee/ghost/compensation", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        String::from_utf8(body).unwrap(),
        "Compensation not found for employee: ghost"
    );
}

#[tokio::test]
async fn health_reports_db_status() {
    let app = test_app().await;

    let (status, body) = request(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);

    let health = as_json(&body);
    assert_eq!(health["ok"], true);
    assert_eq!(health["db_ok"], true);
    assert!(health["version"].as_str().is_some());
}
