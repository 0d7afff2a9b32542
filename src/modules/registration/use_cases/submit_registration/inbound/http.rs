use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::modules::registration::core::selection::SelectionChange;
use crate::modules::registration::use_cases::submit_registration::command::StudentDetails;
use crate::modules::registration::use_cases::submit_registration::handler::{
    SubmissionReport, WorkflowError,
};
use crate::shell::session::SessionId;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

fn workflow_error(err: WorkflowError) -> Response {
    let status = match err {
        WorkflowError::SubmissionInFlight => StatusCode::CONFLICT,
        WorkflowError::NotLoaded(_) => StatusCode::SERVICE_UNAVAILABLE,
        WorkflowError::Checkpoint(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorBody { error: err.to_string() })).into_response()
}

fn report_status(report: &SubmissionReport) -> StatusCode {
    match report {
        SubmissionReport::Invalid { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionReport::Registered { .. } | SubmissionReport::PairRegistered { .. } => {
            StatusCode::CREATED
        }
        SubmissionReport::SecondStepRequired { .. } => StatusCode::ACCEPTED,
        SubmissionReport::Duplicate { .. }
        | SubmissionReport::GroupFull { .. }
        | SubmissionReport::ScheduleNotFound { .. } => StatusCode::CONFLICT,
        SubmissionReport::Failed { .. } => StatusCode::BAD_GATEWAY,
    }
}

/// A page load. A failed cache load still returns the (disabled) form.
pub async fn open(State(state): State<AppState>, SessionId(session): SessionId) -> impl IntoResponse {
    let page = state.registration_page(&session).await;
    let mut page = page.lock().await;
    let status = match page.open().await {
        Ok(()) => StatusCode::OK,
        Err(WorkflowError::NotLoaded(_)) => StatusCode::SERVICE_UNAVAILABLE,
        Err(err) => return workflow_error(err),
    };
    (status, Json(page.view())).into_response()
}

pub async fn view(State(state): State<AppState>, SessionId(session): SessionId) -> impl IntoResponse {
    let page = state.registration_page(&session).await;
    let view = page.lock().await.view();
    Json(view).into_response()
}

pub async fn select(
    State(state): State<AppState>,
    SessionId(session): SessionId,
    body: Result<Json<SelectionChange>, JsonRejection>,
) -> impl IntoResponse {
    let Json(change) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let page = state.registration_page(&session).await;
    let mut page = page.lock().await;
    page.select(change);
    Json(page.view()).into_response()
}

pub async fn edit_details(
    State(state): State<AppState>,
    SessionId(session): SessionId,
    body: Result<Json<StudentDetails>, JsonRejection>,
) -> impl IntoResponse {
    let Json(details) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let page = state.registration_page(&session).await;
    let mut page = page.lock().await;
    page.edit_details(details);
    Json(page.view()).into_response()
}

/// A second submit while the first is still running is refused, not queued.
pub async fn submit(State(state): State<AppState>, SessionId(session): SessionId) -> impl IntoResponse {
    let page = state.registration_page(&session).await;
    let Ok(mut page) = page.try_lock() else {
        return workflow_error(WorkflowError::SubmissionInFlight);
    };
    match page.submit().await {
        Ok(report) => (report_status(&report), Json(report)).into_response(),
        Err(err) => workflow_error(err),
    }
}

pub async fn cancel_pending(
    State(state): State<AppState>,
    SessionId(session): SessionId,
) -> impl IntoResponse {
    let page = state.registration_page(&session).await;
    let mut page = page.lock().await;
    match page.cancel_pending().await {
        Ok(()) => Json(page.view()).into_response(),
        Err(err) => workflow_error(err),
    }
}
