use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;

use crate::modules::catalog::core::schedule_group::{
    ScheduleGroupForm, ScheduleRow, ScheduleTableFilter,
};
use crate::modules::catalog::use_cases::manage_entities::inbound::http::catalog_error;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct SchedulesResponse {
    pub rows: Vec<ScheduleRow>,
    pub groups: Vec<String>,
}

#[derive(Serialize)]
pub struct SaveGroupResponse {
    pub saved: usize,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ScheduleTableFilter>,
) -> impl IntoResponse {
    if let Err(err) = state.schedules.reload().await {
        return catalog_error(err);
    }
    Json(SchedulesResponse {
        rows: state.schedules.rows(&filter).await,
        groups: state.schedules.group_names().await,
    })
    .into_response()
}

/// Creates a group, or replaces the one named in `replacing`.
pub async fn save_group(
    State(state): State<AppState>,
    body: Result<Json<ScheduleGroupForm>, JsonRejection>,
) -> impl IntoResponse {
    let Json(form) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    match state.schedules.save_group(&form).await {
        Ok(saved) => (StatusCode::CREATED, Json(SaveGroupResponse { saved })).into_response(),
        Err(err) => catalog_error(err),
    }
}

pub async fn deactivate(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.schedules.deactivate(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => catalog_error(err),
    }
}
