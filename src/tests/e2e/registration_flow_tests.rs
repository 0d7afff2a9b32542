use axum::{Router, body::Body, http::Request, http::StatusCode, response::Response};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use crate::shared::infrastructure::backend::in_memory::InMemoryBackend;
use crate::shared::infrastructure::session_storage::in_memory::InMemorySessionStorage;
use crate::shell::config::AppConfig;
use crate::shell::http::routes;
use crate::shell::session::SESSION_HEADER;
use crate::shell::state::AppState;
use crate::tests::fixtures::backend::seeded_backend;

async fn make_app() -> (Arc<InMemoryBackend>, Router) {
    let backend = Arc::new(seeded_backend().await);
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
        .header(SESSION_HEADER, "tab-1")
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response: Response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn choose(app: &Router, field: &str, value: &str) -> Value {
    let (status, view) = call(
        app,
        "POST",
        "/registration/selection",
        Some(json!({ "field": field, "value": value })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    view
}

async fn fill_details(app: &Router, student_phone: &str) {
    let details = json!({
        "student_name": "Mona Adel",
        "student_phone": student_phone,
        "parent_phone": "01198765432"
    });
    let (status, _) = call(app, "PUT", "/registration/details", Some(details)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn registers_both_math_subjects_across_a_page_reload() {
    let (backend, app) = make_app().await;
    call(&app, "POST", "/registration/open", None).await;
    choose(&app, "center", "c-downtown").await;
    choose(&app, "grade", "second").await;
    choose(&app, "material", "m-pure").await;
    choose(&app, "teacher", "t-adel").await;
    choose(&app, "group_time", "s-pure-second").await;
    fill_details(&app, "01022223333").await;

    let (status, first) = call(&app, "POST", "/registration/submit", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(first["status"], "second_step_required");
    assert_eq!(first["required_material"], "Applied Math");

    let (status, reopened) = call(&app, "POST", "/registration/open", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reopened["locked"], true);
    assert_eq!(reopened["details"]["student_phone"], "01022223333");
    assert_eq!(reopened["selection"]["grade"], "second");
    let materials: Vec<&str> = reopened["options"]["materials"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["value"].as_str().unwrap())
        .collect();
    assert!(!materials.contains(&"m-pure"));

    choose(&app, "material", "m-applied").await;
    choose(&app, "teacher", "t-samira").await;
    choose(&app, "group_time", "s-applied-second").await;
    let (status, pair) = call(&app, "POST", "/registration/submit", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(pair["status"], "pair_registered");
    assert_eq!(pair["bookings"].as_array().unwrap().len(), 2);
    assert_eq!(pair["fees"]["total"], 105);
    assert_eq!(backend.registrations().await.len(), 2);

    let (_, after) = call(&app, "POST", "/registration/open", None).await;
    assert_eq!(after["locked"], false);
    assert!(after["pending"].is_null());
}

#[tokio::test]
async fn rejects_the_same_student_twice_for_one_subject() {
    let (backend, app) = make_app().await;
    for attempt in 0..2 {
        call(&app, "POST", "/registration/open", None).await;
        choose(&app, "center", "c-downtown").await;
        choose(&app, "grade", "first").await;
        choose(&app, "material", "m-algebra").await;
        choose(&app, "teacher", "t-adel").await;
        choose(&app, "group_time", "s-algebra-sat").await;
        fill_details(&app, "01055556666").await;

        let (status, report) = call(&app, "POST", "/registration/submit", None).await;
        if attempt == 0 {
            assert_eq!(status, StatusCode::CREATED);
        } else {
            assert_eq!(status, StatusCode::CONFLICT);
            assert_eq!(report["status"], "duplicate");
            assert_eq!(report["student_phone"], "01055556666");
        }
    }
    assert_eq!(backend.registrations().await.len(), 1);
}

#[tokio::test]
async fn hides_a_retired_teacher_from_the_form() {
    let (_, app) = make_app().await;
    call(&app, "POST", "/registration/open", None).await;
    choose(&app, "center", "c-downtown").await;
    choose(&app, "grade", "first").await;
    let view = choose(&app, "material", "m-algebra").await;

    let teachers: Vec<&str> = view["options"]["teachers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["value"].as_str().unwrap())
        .collect();
    assert_eq!(teachers, ["t-adel"]);
}
