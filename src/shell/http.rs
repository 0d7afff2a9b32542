use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::modules::catalog::use_cases::manage_entities::inbound::http as manage_entities;
use crate::modules::catalog::use_cases::manage_schedules::inbound::http as manage_schedules;
use crate::modules::registration::use_cases::submit_registration::inbound::http as registration;
use crate::modules::students::use_cases::delete_student::inbound::http as delete_student;
use crate::modules::students::use_cases::list_students::inbound::http as list_students;
use crate::modules::students::use_cases::print_report::inbound::http as print_report;
use crate::shell::state::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/registration", get(registration::view))
        .route("/registration/open", post(registration::open))
        .route("/registration/selection", post(registration::select))
        .route("/registration/details", put(registration::edit_details))
        .route("/registration/submit", post(registration::submit))
        .route("/registration/pending", delete(registration::cancel_pending))
        .route("/admin/students", get(list_students::view))
        .route("/admin/students/refresh", post(list_students::refresh))
        .route("/admin/students/filter", post(list_students::apply_filter))
        .route("/admin/students/search", post(list_students::search))
        .route("/admin/students/page", post(list_students::go_to_page))
        .route("/admin/students/report", post(print_report::handle))
        .route("/admin/students/{id}", delete(delete_student::handle))
        .route(
            "/admin/catalog/{kind}",
            get(manage_entities::list).post(manage_entities::create),
        )
        .route(
            "/admin/catalog/{kind}/{id}",
            put(manage_entities::rename).delete(manage_entities::delete),
        )
        .route(
            "/admin/schedules",
            get(manage_schedules::list).post(manage_schedules::save_group),
        )
        .route("/admin/schedules/{id}", delete(manage_schedules::deactivate))
        .with_state(state)
}
