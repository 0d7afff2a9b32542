use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::modules::students::core::errors::StudentsError;
use crate::modules::students::core::filter::FilterChange;
use crate::modules::students::use_cases::list_students::handler::{DashboardView, StudentsDashboard};
use crate::shell::session::SessionId;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub text: String,
}

#[derive(Deserialize)]
pub struct PageBody {
    pub page: u32,
}

#[derive(Serialize)]
pub struct SearchResponse {
    /// False when a later keystroke superseded this search.
    pub applied: bool,
    pub view: DashboardView,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Maps a dashboard failure, keeping the error text for the admin banner.
pub fn students_error(err: StudentsError) -> Response {
    let status = match err {
        StudentsError::NotOnPage(_) => StatusCode::NOT_FOUND,
        StudentsError::NothingToPrint => StatusCode::UNPROCESSABLE_ENTITY,
        StudentsError::Query(_) | StudentsError::Backend(_) => StatusCode::BAD_GATEWAY,
        StudentsError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorBody { error: err.to_string() })).into_response()
}

async fn respond(
    dashboard: &StudentsDashboard,
    outcome: Result<(), StudentsError>,
) -> Response {
    match outcome {
        Ok(()) => Json(dashboard.view().await).into_response(),
        Err(err) => students_error(err),
    }
}

pub async fn view(State(state): State<AppState>, SessionId(session): SessionId) -> impl IntoResponse {
    let dashboard = state.dashboard(&session).await;
    Json(dashboard.view().await).into_response()
}

pub async fn refresh(State(state): State<AppState>, SessionId(session): SessionId) -> impl IntoResponse {
    let dashboard = state.dashboard(&session).await;
    let outcome = dashboard.refresh().await;
    respond(&dashboard, outcome).await
}

pub async fn apply_filter(
    State(state): State<AppState>,
    SessionId(session): SessionId,
    body: Result<Json<FilterChange>, JsonRejection>,
) -> impl IntoResponse {
    let Json(change) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let dashboard = state.dashboard(&session).await;
    let outcome = dashboard.apply(change).await;
    respond(&dashboard, outcome).await
}

pub async fn search(
    State(state): State<AppState>,
    SessionId(session): SessionId,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let dashboard = state.dashboard(&session).await;
    match dashboard.search(body.text).await {
        Ok(applied) => Json(SearchResponse {
            applied,
            view: dashboard.view().await,
        })
        .into_response(),
        Err(err) => students_error(err),
    }
}

pub async fn go_to_page(
    State(state): State<AppState>,
    SessionId(session): SessionId,
    body: Result<Json<PageBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let dashboard = state.dashboard(&session).await;
    let outcome = dashboard.go_to_page(body.page).await;
    respond(&dashboard, outcome).await
}
