//! News articles, addressed by title (case-insensitive).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationInfo, deserialize_optional_i64};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum NewsStatus {
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub image_path: String,
    pub author: String,
    pub status: NewsStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsDto {
    #[validate(length(min = 1, message = "Title and description are required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Title and description are required"))]
    pub description: String,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
    pub status: Option<NewsStatus>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsDto {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
    pub status: Option<NewsStatus>,
}

/// `sortBy` accepts `title`, `oldest`, or anything else for newest first.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsFilterParams {
    pub status: Option<NewsStatus>,
    pub sort_by: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NewsResponse {
    pub success: bool,
    pub message: String,
    pub data: News,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SingleNewsResponse {
    pub success: bool,
    pub data: News,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NewsListResponse {
    pub success: bool,
    pub data: Vec<News>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedNewsRef {
    pub id: Uuid,
    pub title: String,
    pub image_path: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNewsResponse {
    pub success: bool,
    pub message: String,
    pub deleted_news: DeletedNewsRef,
}
