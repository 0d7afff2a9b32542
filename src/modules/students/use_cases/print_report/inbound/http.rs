use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Local;
use serde::Deserialize;

use crate::modules::students::core::report::{Orientation, ReportScope};
use crate::modules::students::use_cases::list_students::inbound::http::students_error;
use crate::shell::session::SessionId;
use crate::shell::state::AppState;

#[derive(Deserialize, Default)]
pub struct PrintReportBody {
    #[serde(default)]
    pub scope: ReportScope,
    #[serde(default)]
    pub orientation: Orientation,
}

/// Renders the dashboard's rows as a downloadable attachment.
pub async fn handle(
    State(state): State<AppState>,
    SessionId(session): SessionId,
    body: Result<Json<PrintReportBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let dashboard = state.dashboard(&session).await;
    let today = Local::now().date_naive();
    match state
        .print_report
        .handle(&dashboard, body.scope, body.orientation, today)
        .await
    {
        Ok(document) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, document.content_type),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", document.file_name),
                ),
            ],
            document.bytes,
        )
            .into_response(),
        Err(err) => students_error(err),
    }
}
