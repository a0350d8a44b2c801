//! In-app messaging.
//!
//! `recipient` is overloaded: a business user id for direct messages,
//! the literal "all" for broadcasts, or a role/department name with
//! `recipient_type = role`. Read receipts live in `notification_reads`
//! and are surfaced per caller as `isRead`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationInfo, deserialize_optional_i64};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum NotificationKind {
    Announcement,
    Message,
    Reply,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum NotificationStatus {
    Sent,
    Delivered,
    Read,
}

/// One notification as listed to a caller. `is_read` and `is_reply` are
/// computed in the query for the requesting user.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub sender: String,
    pub sender_name: String,
    pub recipient: String,
    pub recipient_type: String,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub status: NotificationStatus,
    pub parent_id: Option<Uuid>,
    pub department: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub is_read: bool,
    pub is_reply: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationDto {
    #[validate(length(min = 1, message = "Title, message, and recipient are required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Title, message, and recipient are required"))]
    pub message: String,
    /// A user id, "all", or one of "students"/"lecturers"/"admins".
    #[validate(length(min = 1, message = "Title, message, and recipient are required"))]
    pub recipient: String,
    pub priority: Option<Priority>,
    #[serde(rename = "type")]
    pub kind: Option<NotificationKind>,
    /// Defaults to the sender's department.
    pub department: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplyDto {
    #[validate(length(min = 1, message = "Reply message is required"))]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InboxParams {
    #[serde(rename = "type")]
    pub kind: Option<NotificationKind>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipientFilterParams {
    pub role: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipientUser {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub department: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub success: bool,
    pub message: String,
    pub data: Notification,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationListResponse {
    pub success: bool,
    pub data: Vec<Notification>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationAck {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationStats {
    pub total: i64,
    pub unread: i64,
    pub sent: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationStatsResponse {
    pub success: bool,
    pub data: NotificationStats,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecipientListResponse {
    pub success: bool,
    pub data: Vec<RecipientUser>,
}
