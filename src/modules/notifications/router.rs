use axum::{Router, middleware, routing::delete, routing::get, routing::post, routing::put};

use crate::middleware::role::require_lecturer;
use crate::state::AppState;

use super::controller::{
    delete_notification, get_inbox, get_notification_stats, get_recipient_users, get_sent,
    mark_notification_read, reply_to_notification, send_notification,
};

/// Sending and the recipient picker need lecturer or admin; everything
/// else is scoped to the caller inside the service.
pub fn init_notifications_router(state: AppState) -> Router<AppState> {
    let sender_routes = Router::new()
        .route("/send", post(send_notification))
        .route("/users", get(get_recipient_users))
        .route_layer(middleware::from_fn_with_state(state, require_lecturer));

    Router::new()
        .route("/inbox", get(get_inbox))
        .route("/sent", get(get_sent))
        .route("/stats", get(get_notification_stats))
        .route("/reply/{id}", post(reply_to_notification))
        .route("/read/{id}", put(mark_notification_read))
        .route("/{id}", delete(delete_notification))
        .merge(sender_routes)
}
