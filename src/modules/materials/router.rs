use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::middleware::role::require_lecturer;
use crate::state::AppState;

use super::controller::{
    create_material, delete_material, get_all_materials, get_materials_by_subject, update_material,
};

/// Uploads need lecturer or admin; update and delete are gated in the
/// handler to admin-or-uploader; reads are open to any authenticated
/// user.
pub fn init_materials_router(state: AppState) -> Router<AppState> {
    let upload_routes = Router::new()
        .route("/", post(create_material))
        .route_layer(middleware::from_fn_with_state(state, require_lecturer));

    Router::new()
        .route("/", get(get_all_materials))
        .route("/subject/{subjectId}", get(get_materials_by_subject))
        .route("/{id}", put(update_material).delete(delete_material))
        .merge(upload_routes)
}
