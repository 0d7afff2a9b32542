use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::modules::catalog::core::entity::CatalogKind;
use crate::modules::catalog::core::errors::CatalogError;
use crate::shared::infrastructure::backend::NOT_FOUND;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct NameBody {
    pub name: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn catalog_error(err: CatalogError) -> Response {
    let status = match &err {
        CatalogError::NameTooShort | CatalogError::MissingField(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        CatalogError::AlreadyExists => StatusCode::CONFLICT,
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::FallbackProtected => StatusCode::FORBIDDEN,
        CatalogError::Backend(e) if e.code() == Some(NOT_FOUND) => StatusCode::NOT_FOUND,
        CatalogError::Load(_) | CatalogError::Backend(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(ErrorBody { error: err.to_string() })).into_response()
}

/// Reloads from the backend on every call so a second admin's edits show up.
pub async fn list(State(state): State<AppState>, Path(kind): Path<CatalogKind>) -> impl IntoResponse {
    match state.catalog.reload(kind).await {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => catalog_error(err),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Path(kind): Path<CatalogKind>,
    body: Result<Json<NameBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    match state.catalog.save(kind, None, &body.name).await {
        Ok(entity) => (StatusCode::CREATED, Json(entity)).into_response(),
        Err(err) => catalog_error(err),
    }
}

pub async fn rename(
    State(state): State<AppState>,
    Path((kind, id)): Path<(CatalogKind, String)>,
    body: Result<Json<NameBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    match state.catalog.save(kind, Some(&id), &body.name).await {
        Ok(entity) => Json(entity).into_response(),
        Err(err) => catalog_error(err),
    }
}

/// Safe delete: dependents are reassigned before the entry goes away.
pub async fn delete(
    State(state): State<AppState>,
    Path((kind, id)): Path<(CatalogKind, String)>,
) -> impl IntoResponse {
    match state.catalog.delete(kind, &id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => catalog_error(err),
    }
}

#[cfg(test)]
mod manage_entities_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::{get, put},
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::shared::infrastructure::backend::in_memory::InMemoryBackend;
    use crate::shared::infrastructure::session_storage::in_memory::InMemorySessionStorage;
    use crate::shell::config::AppConfig;
    use crate::shell::state::AppState;
    use crate::shared::core::grade::Grade;
    use crate::tests::fixtures::backend::{schedule, seeded_backend};

    use super::{create, delete, list, rename};

    async fn make_test_state() -> (Arc<InMemoryBackend>, AppState) {
        let backend = Arc::new(seeded_backend().await);
        let state = AppState::new(
            AppConfig::from_lookup(|_| None).unwrap(),
            backend.clone(),
            Arc::new(InMemorySessionStorage::new()),
        );
        state.warm_up().await;
        (backend, state)
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/admin/catalog/{kind}", get(list).post(create))
            .route("/admin/catalog/{kind}/{id}", put(rename).delete(delete))
            .with_state(state)
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn it_should_list_centers_sorted_by_name() {
        let (_, state) = make_test_state().await;

        let response = app(state)
            .oneshot(Request::get("/admin/catalog/center").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Downtown", "East Branch", "General"]);
    }

    #[tokio::test]
    async fn it_should_return_201_for_a_new_material() {
        let (_, state) = make_test_state().await;

        let response = app(state)
            .oneshot(json_request("POST", "/admin/catalog/material", r#"{"name":"Physics"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn it_should_return_409_for_a_duplicate_name() {
        let (_, state) = make_test_state().await;

        let response = app(state)
            .oneshot(json_request("POST", "/admin/catalog/teacher", r#"{"name":" mr. adel "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn it_should_return_422_for_a_short_name() {
        let (_, state) = make_test_state().await;

        let response = app(state)
            .oneshot(json_request("PUT", "/admin/catalog/teacher/t-adel", r#"{"name":"A"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn it_should_return_403_when_deleting_the_general_center() {
        let (_, state) = make_test_state().await;

        let response = app(state)
            .oneshot(
                Request::delete("/admin/catalog/center/general-center")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn it_should_reassign_schedules_when_a_center_is_deleted() {
        let (backend, state) = make_test_state().await;
        let mut east = schedule("s-east", Grade::First, Some("m-algebra"), None, "Fri", "09:00");
        east.center_id = "c-east".into();
        backend.add_schedule(east).await;

        let response = app(state)
            .oneshot(Request::delete("/admin/catalog/center/c-east").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let schedules = backend.schedules().await;
        let moved = schedules.iter().find(|s| s.id == "s-east").unwrap();
        assert_eq!(moved.center_id, "general-center");
    }

    #[tokio::test]
    async fn it_should_return_404_for_an_unknown_entry() {
        let (_, state) = make_test_state().await;

        let response = app(state)
            .oneshot(json_request("PUT", "/admin/catalog/material/m-none", r#"{"name":"Chemistry"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
