use axum::{Router, body::Body, http::Request, http::StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use crate::shared::core::grade::Grade;
use crate::shared::infrastructure::backend::in_memory::InMemoryBackend;
use crate::shared::infrastructure::session_storage::in_memory::InMemorySessionStorage;
use crate::shell::config::AppConfig;
use crate::shell::http::routes;
use crate::shell::session::SESSION_HEADER;
use crate::shell::state::AppState;
use crate::tests::fixtures::students::StudentRowBuilder;

async fn make_app() -> (Arc<InMemoryBackend>, Router) {
    let backend = Arc::new(InMemoryBackend::new());
    for i in 0..45 {
        let grade = if i % 3 == 0 { Grade::Second } else { Grade::First };
        backend
            .seed_registration(
                StudentRowBuilder::new()
                    .id(format!("r-{i}"))
                    .student_phone(format!("0100{i:07}"))
                    .grade(grade)
                    .minutes_later(i)
                    .build(),
            )
            .await;
    }
    let state = AppState::new(
        AppConfig::from_lookup(|_| None).unwrap(),
        backend.clone(),
        Arc::new(InMemorySessionStorage::new()),
    );
    (backend, routes(state))
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(SESSION_HEADER, "admin-1")
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn ids(view: &Value) -> Vec<String> {
    view["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn pages_through_forty_five_students_and_settles_after_deletes() {
    let (backend, app) = make_app().await;
    let (_, first) = call(&app, "POST", "/admin/students/refresh", None).await;
    assert_eq!(first["total_pages"], 3);
    assert_eq!(ids(&first)[0], "r-44");

    let (_, last) = call(&app, "POST", "/admin/students/page", Some(json!({"page": 3}))).await;
    assert_eq!(last["page"], 3);
    let on_last_page = ids(&last);
    assert_eq!(on_last_page.len(), 5);

    for id in &on_last_page {
        let (status, _) = call(&app, "DELETE", &format!("/admin/students/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    let (_, settled) = call(&app, "GET", "/admin/students", None).await;
    assert_eq!(settled["page"], 2);
    assert_eq!(settled["total"], 40);
    assert_eq!(settled["total_pages"], 2);
    assert_eq!(backend.registrations().await.len(), 40);
}

#[tokio::test]
async fn prints_every_filtered_student_not_just_the_page() {
    let (_, app) = make_app().await;
    let (_, view) = call(
        &app,
        "POST",
        "/admin/students/filter",
        Some(json!({"field": "grade", "value": "first"})),
    )
    .await;
    assert_eq!(view["total"], 30);
    assert_eq!(view["grade_counts"]["second"], 15);

    let response = app
        .clone()
        .oneshot(
            Request::post("/admin/students/report")
                .header(SESSION_HEADER, "admin-1")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"scope":"all_filtered"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert_eq!(text.lines().count(), 33);
}
