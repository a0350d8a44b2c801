use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::require_admin;
use crate::state::AppState;

use super::controller::{
    delete_user, get_all_admins, get_all_lecturers, get_all_students, get_all_users,
    get_user_by_id, get_user_stats, login_user, register_user, search_users, update_user,
};

/// Register and login are public; per-user reads/updates enforce
/// self-or-admin in the handler; the remaining routes are admin-only.
pub fn init_users_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", get(get_all_users))
        .route("/admins", get(get_all_admins))
        .route("/lecturers", get(get_all_lecturers))
        .route("/students", get(get_all_students))
        .route("/search", get(search_users))
        .route("/stats", get(get_user_stats))
        .route("/{userId}", axum::routing::delete(delete_user))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", post(register_user))
        .route("/login", post(login_user))
        .route("/{userId}", get(get_user_by_id).put(update_user))
        .merge(admin_routes)
}
