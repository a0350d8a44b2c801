use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    get_lecturer_lessons, get_lecturer_materials, get_lecturer_profile, get_lecturer_stats,
    get_lecturer_students, get_lecturer_subjects,
};

pub fn init_lecturers_router() -> Router<AppState> {
    Router::new()
        .route("/profile/{lecturerId}", get(get_lecturer_profile))
        .route("/subjects/{lecturerId}", get(get_lecturer_subjects))
        .route("/students/{lecturerId}", get(get_lecturer_students))
        .route("/materials/{lecturerId}", get(get_lecturer_materials))
        .route("/lessons/{lecturerId}", get(get_lecturer_lessons))
        .route("/stats/{lecturerId}", get(get_lecturer_stats))
}
