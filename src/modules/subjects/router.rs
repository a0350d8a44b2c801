use axum::{Router, middleware, routing::get, routing::post};

use crate::middleware::role::require_lecturer;
use crate::state::AppState;

use super::controller::{
    create_subject, delete_subject, get_all_subjects, get_subjects_by_department,
    get_subjects_by_department_year_semester, update_subject,
};

/// Reads are open to any authenticated user; mutations need lecturer or
/// admin.
pub fn init_subjects_router(state: AppState) -> Router<AppState> {
    let write_routes = Router::new()
        .route("/", post(create_subject))
        .route(
            "/{subjectCode}",
            axum::routing::put(update_subject).delete(delete_subject),
        )
        .route_layer(middleware::from_fn_with_state(state, require_lecturer));

    Router::new()
        .route("/", get(get_all_subjects))
        .route("/department/{departmentId}", get(get_subjects_by_department))
        .route(
            "/department/{departmentId}/year/{year}/semester/{semester}",
            get(get_subjects_by_department_year_semester),
        )
        .merge(write_routes)
}
