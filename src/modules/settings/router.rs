use axum::{Router, middleware, routing::get, routing::post};

use crate::middleware::role::require_admin;
use crate::state::AppState;

use super::controller::{
    export_system_data, get_settings, get_system_stats, perform_maintenance, reset_system_data,
    update_settings,
};

/// Every settings route is admin-only.
pub fn init_settings_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_settings).put(update_settings))
        .route("/stats", get(get_system_stats))
        .route("/maintenance", post(perform_maintenance))
        .route("/reset", post(reset_system_data))
        .route("/export", get(export_system_data))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
