use axum::{Router, middleware, routing::get};

use crate::middleware::role::require_student;
use crate::state::AppState;

use super::controller::{
    get_student_lessons, get_student_materials, get_student_news, get_student_profile,
    get_student_stats, get_student_subjects,
};

/// Students and admins only; each handler additionally checks
/// self-or-admin on the path's userId.
pub fn init_students_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profile/{userId}", get(get_student_profile))
        .route("/subjects/{userId}", get(get_student_subjects))
        .route("/lessons/{userId}", get(get_student_lessons))
        .route("/materials/{userId}", get(get_student_materials))
        .route("/stats/{userId}", get(get_student_stats))
        .route("/news/{userId}", get(get_student_news))
        .route_layer(middleware::from_fn_with_state(state, require_student))
}
