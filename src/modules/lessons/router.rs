use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::middleware::role::require_admin;
use crate::state::AppState;

use super::controller::{
    create_lesson, create_lesson_part, delete_lesson, delete_lesson_part, get_all_lessons,
    get_lesson_parts, increment_lesson_parts, update_lesson, update_lesson_part,
};

/// Reads for any authenticated user; mutations admin-only.
pub fn init_lessons_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", post(create_lesson))
        .route(
            "/{id}",
            put(update_lesson).delete(delete_lesson),
        )
        .route("/{id}/increment-parts", put(increment_lesson_parts))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", get(get_all_lessons))
        .merge(admin_routes)
}

pub fn init_lesson_parts_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", post(create_lesson_part))
        .route(
            "/{id}",
            put(update_lesson_part).delete(delete_lesson_part),
        )
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    // Same segment as the part id routes, so the parameter name must
    // match for the merge; the GET reads it as a lesson id.
    Router::new()
        .route("/{id}", get(get_lesson_parts))
        .merge(admin_routes)
}
