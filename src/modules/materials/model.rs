use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRef {
    pub id: Uuid,
    pub subject_code: String,
    pub subject_name: String,
}

/// Uploader block; absent when the uploading account has been deleted.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploaderRef {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
}

/// Flat row of the materials/subjects/users join.
#[derive(Debug, Clone, FromRow)]
pub struct MaterialRow {
    pub id: Uuid,
    pub name: String,
    pub path: String,
    pub url: String,
    pub material_type: String,
    pub subject: Uuid,
    pub size: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub subj_code: String,
    pub subj_name: String,
    pub uploader_user_id: Option<String>,
    pub uploader_first_name: Option<String>,
    pub uploader_last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: Uuid,
    pub name: String,
    pub path: String,
    pub url: String,
    #[serde(rename = "type")]
    pub material_type: String,
    pub subject: SubjectRef,
    pub uploaded_by: Option<UploaderRef>,
    pub size: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<MaterialRow> for Material {
    fn from(row: MaterialRow) -> Self {
        let uploaded_by = match (
            row.uploader_user_id,
            row.uploader_first_name,
            row.uploader_last_name,
        ) {
            (Some(user_id), Some(first_name), Some(last_name)) => Some(UploaderRef {
                user_id,
                first_name,
                last_name,
            }),
            _ => None,
        };

        Self {
            id: row.id,
            name: row.name,
            path: row.path,
            url: row.url,
            material_type: row.material_type,
            subject: SubjectRef {
                id: row.subject,
                subject_code: row.subj_code,
                subject_name: row.subj_name,
            },
            uploaded_by,
            size: row.size,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterialDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Path is required"))]
    pub path: String,
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub material_type: String,
    pub subject: Uuid,
    #[validate(range(min = 1, message = "Size is required"))]
    pub size: i64,
}

/// Only the display name is editable after upload.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaterialDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct MaterialFilterParams {
    pub subject: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
