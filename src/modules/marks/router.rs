use axum::{Router, middleware, routing::delete, routing::get, routing::post};

use crate::middleware::role::require_lecturer;
use crate::state::AppState;

use super::controller::{
    delete_marks, get_all_marks, get_marks_by_student, get_marks_by_subject,
    get_marks_statistics, upsert_marks,
};

/// Recording and deleting marks needs lecturer or admin; listings and
/// statistics are open to any authenticated user.
pub fn init_marks_router(state: AppState) -> Router<AppState> {
    let write_routes = Router::new()
        .route("/", post(upsert_marks))
        .route("/{id}", delete(delete_marks))
        .route_layer(middleware::from_fn_with_state(state, require_lecturer));

    Router::new()
        .route("/", get(get_all_marks))
        .route("/statistics", get(get_marks_statistics))
        .route("/student/{studentId}", get(get_marks_by_student))
        .route("/subject/{subjectId}", get(get_marks_by_subject))
        .merge(write_routes)
}
