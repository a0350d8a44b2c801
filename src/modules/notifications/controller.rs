use axum::{Json, extract::Path, extract::Query, extract::State, http::StatusCode};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PageParams;
use crate::validator::ValidatedJson;

use super::model::{
    InboxParams, NotificationAck, NotificationListResponse, NotificationResponse,
    NotificationStatsResponse, RecipientFilterParams, RecipientListResponse, ReplyDto,
    SendNotificationDto,
};
use super::service::NotificationService;

#[utoipa::path(
    post,
    path = "/api/notifications/send",
    request_body = SendNotificationDto,
    responses(
        (status = 201, description = "Notification sent", body = NotificationResponse),
        (status = 400, description = "Missing title, message or recipient")
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
pub async fn send_notification(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<SendNotificationDto>,
) -> Result<(StatusCode, Json<NotificationResponse>), AppError> {
    let notification = NotificationService::send(&state.db, dto, &auth_user.0).await?;
    Ok((
        StatusCode::CREATED,
        Json(NotificationResponse {
            success: true,
            message: "Notification sent successfully".to_string(),
            data: notification,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/notifications/inbox",
    params(InboxParams),
    responses((status = 200, description = "Inbox, newest first", body = NotificationListResponse)),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
pub async fn get_inbox(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<InboxParams>,
) -> Result<Json<NotificationListResponse>, AppError> {
    let (data, pagination) = NotificationService::inbox(&state.db, &auth_user.0, params).await?;
    Ok(Json(NotificationListResponse {
        success: true,
        data,
        pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/api/notifications/sent",
    params(PageParams),
    responses((status = 200, description = "Caller's sent notifications", body = NotificationListResponse)),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
pub async fn get_sent(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(page): Query<PageParams>,
) -> Result<Json<NotificationListResponse>, AppError> {
    let (data, pagination) =
        NotificationService::sent(&state.db, auth_user.user_id(), page).await?;
    Ok(Json(NotificationListResponse {
        success: true,
        data,
        pagination,
    }))
}

#[utoipa::path(
    post,
    path = "/api/notifications/reply/{id}",
    params(("id" = Uuid, Path, description = "Notification being replied to")),
    request_body = ReplyDto,
    responses(
        (status = 201, description = "Reply sent", body = NotificationResponse),
        (status = 404, description = "Original notification not found")
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
pub async fn reply_to_notification(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<ReplyDto>,
) -> Result<(StatusCode, Json<NotificationResponse>), AppError> {
    let reply = NotificationService::reply(&state.db, id, dto, &auth_user.0).await?;
    Ok((
        StatusCode::CREATED,
        Json(NotificationResponse {
            success: true,
            message: "Reply sent successfully".to_string(),
            data: reply,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/notifications/read/{id}",
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Read receipt recorded", body = NotificationAck),
        (status = 404, description = "Notification not found")
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationAck>, AppError> {
    NotificationService::mark_as_read(&state.db, id, auth_user.user_id()).await?;
    Ok(Json(NotificationAck {
        success: true,
        message: "Notification marked as read".to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification deleted", body = NotificationAck),
        (status = 403, description = "Neither sender, recipient nor admin"),
        (status = 404, description = "Notification not found")
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationAck>, AppError> {
    NotificationService::delete(&state.db, id, auth_user.user_id(), auth_user.is_admin()).await?;
    Ok(Json(NotificationAck {
        success: true,
        message: "Notification deleted successfully".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/notifications/stats",
    responses((status = 200, description = "Inbox counters for the caller", body = NotificationStatsResponse)),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
pub async fn get_notification_stats(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<NotificationStatsResponse>, AppError> {
    let data = NotificationService::stats(&state.db, &auth_user.0).await?;
    Ok(Json(NotificationStatsResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/notifications/users",
    params(RecipientFilterParams),
    responses((status = 200, description = "Users selectable as recipients", body = RecipientListResponse)),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
pub async fn get_recipient_users(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<RecipientFilterParams>,
) -> Result<Json<RecipientListResponse>, AppError> {
    let data = NotificationService::recipient_users(&state.db, filters).await?;
    Ok(Json(RecipientListResponse {
        success: true,
        data,
    }))
}
