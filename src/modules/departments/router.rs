use axum::{Router, middleware, routing::get, routing::post};

use crate::middleware::role::require_admin;
use crate::state::AppState;

use super::controller::{
    create_department, delete_department, get_all_departments, get_department, update_department,
};

/// Reads are open to any authenticated user; mutations are admin-only.
pub fn init_departments_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", post(create_department))
        .route(
            "/{departmentId}",
            axum::routing::put(update_department).delete(delete_department),
        )
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", get(get_all_departments))
        .route("/{departmentId}", get(get_department))
        .merge(admin_routes)
}
