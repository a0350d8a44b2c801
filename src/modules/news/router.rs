use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::middleware::role::require_admin;
use crate::state::AppState;

use super::controller::{create_news, delete_news, get_all_news, get_news_by_title, update_news};

/// Publishing is admin-only; reading is open to any authenticated user.
pub fn init_news_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", post(create_news))
        .route("/{title}", put(update_news).delete(delete_news))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", get(get_all_news))
        .route("/{title}", get(get_news_by_title))
        .merge(admin_routes)
}
