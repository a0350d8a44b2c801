use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::deserialize_optional_i64;

/// Department block expanded onto subject responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRef {
    pub id: Uuid,
    pub department_id: String,
    pub name: String,
}

/// Flat row of the subjects/departments join. Converted to [`Subject`]
/// before leaving the service layer.
#[derive(Debug, Clone, FromRow)]
pub struct SubjectRow {
    pub id: Uuid,
    pub subject_code: String,
    pub subject_name: String,
    pub department: Uuid,
    pub department_id: String,
    pub year: i32,
    pub semester: i32,
    pub credits: i32,
    pub lecturer: Option<String>,
    pub description: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub dept_code: String,
    pub dept_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: Uuid,
    pub subject_code: String,
    pub subject_name: String,
    pub department: DepartmentRef,
    pub department_id: String,
    pub year: i32,
    pub semester: i32,
    pub credits: i32,
    pub lecturer: Option<String>,
    pub description: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<SubjectRow> for Subject {
    fn from(row: SubjectRow) -> Self {
        Self {
            id: row.id,
            subject_code: row.subject_code,
            subject_name: row.subject_name,
            department: DepartmentRef {
                id: row.department,
                department_id: row.dept_code,
                name: row.dept_name,
            },
            department_id: row.department_id,
            year: row.year,
            semester: row.semester,
            credits: row.credits,
            lecturer: row.lecturer,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectDto {
    #[validate(length(min = 1, message = "Subject code is required"))]
    pub subject_code: String,
    #[validate(length(min = 1, message = "Subject name is required"))]
    pub subject_name: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department_id: String,
    #[validate(range(min = 1, max = 4, message = "Year must be between 1 and 4"))]
    pub year: i32,
    #[validate(range(min = 1, max = 2, message = "Semester must be 1 or 2"))]
    pub semester: i32,
    #[validate(range(min = 1, max = 10, message = "Credits must be between 1 and 10"))]
    pub credits: i32,
    pub lecturer: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubjectDto {
    pub subject_name: Option<String>,
    /// Re-points the subject to another department by code.
    pub department_id: Option<String>,
    #[validate(range(min = 1, max = 4, message = "Year must be between 1 and 4"))]
    pub year: Option<i32>,
    #[validate(range(min = 1, max = 2, message = "Semester must be 1 or 2"))]
    pub semester: Option<i32>,
    #[validate(range(min = 1, max = 10, message = "Credits must be between 1 and 10"))]
    pub credits: Option<i32>,
    pub lecturer: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct SubjectFilterParams {
    /// Department code.
    pub department: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub semester: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSubjectResponse {
    pub message: String,
    pub deleted_subject: Subject,
}
