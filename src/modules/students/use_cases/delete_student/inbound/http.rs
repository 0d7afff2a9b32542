use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::modules::students::use_cases::list_students::inbound::http::students_error;
use crate::shell::session::SessionId;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    SessionId(session): SessionId,
    Path(registration_id): Path<String>,
) -> impl IntoResponse {
    let dashboard = state.dashboard(&session).await;
    match state.delete_student.handle(&dashboard, &registration_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => students_error(err),
    }
}
