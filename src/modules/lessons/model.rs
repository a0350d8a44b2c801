//! Lessons and their uploadable parts.
//!
//! A lesson declares `total_parts` up front; parts are uploaded one by
//! one and `uploaded_parts` tracks progress. The lesson flips to
//! `published` exactly when the counter reaches the declared total.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Pdf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum LessonStatus {
    Draft,
    Published,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRef {
    pub id: Uuid,
    pub department_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRef {
    pub id: Uuid,
    pub subject_code: String,
    pub subject_name: String,
}

/// Flat row of the lessons/departments/subjects join.
#[derive(Debug, Clone, FromRow)]
pub struct LessonRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub department: Uuid,
    pub subject: Uuid,
    pub total_parts: i32,
    pub uploaded_parts: i32,
    pub media_type: MediaType,
    pub status: LessonStatus,
    pub author: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub dept_code: String,
    pub dept_name: String,
    pub subj_code: String,
    pub subj_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub department: DepartmentRef,
    pub subject: SubjectRef,
    pub total_parts: i32,
    pub uploaded_parts: i32,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub status: LessonStatus,
    pub author: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<LessonRow> for Lesson {
    fn from(row: LessonRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            department: DepartmentRef {
                id: row.department,
                department_id: row.dept_code,
                name: row.dept_name,
            },
            subject: SubjectRef {
                id: row.subject,
                subject_code: row.subj_code,
                subject_name: row.subj_name,
            },
            total_parts: row.total_parts,
            uploaded_parts: row.uploaded_parts,
            media_type: row.media_type,
            status: row.status,
            author: row.author,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    /// Department code.
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    /// Subject code.
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(range(min = 1, max = 20, message = "Total parts must be between 1 and 20"))]
    pub total_parts: i32,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLessonDto {
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, max = 20, message = "Total parts must be between 1 and 20"))]
    pub total_parts: Option<i32>,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub status: Option<LessonStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct LessonFilterParams {
    /// Department code.
    pub department: Option<String>,
    /// Subject code.
    pub subject: Option<String>,
    pub status: Option<String>,
}

/// A quiz question attached to a lesson part, stored as jsonb.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[validate(length(min = 1, message = "Question text is required"))]
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    #[validate(range(min = 0, max = 3, message = "Correct answer must be between 0 and 3"))]
    pub correct_answer: i32,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonPart {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub part_number: i32,
    pub title: String,
    pub file_path: String,
    pub file_url: String,
    pub file_type: String,
    pub file_size: i64,
    #[schema(value_type = Vec<Question>)]
    pub questions: Json<Vec<Question>>,
    pub is_locked: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonPartDto {
    pub lesson_id: Uuid,
    #[validate(range(min = 1, message = "Part number must be positive"))]
    pub part_number: i32,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "File path is required"))]
    pub file_path: String,
    #[validate(length(min = 1, message = "File URL is required"))]
    pub file_url: String,
    #[serde(default = "default_file_type")]
    pub file_type: String,
    #[serde(default)]
    pub file_size: i64,
    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<Question>,
    /// Defaults to locked for every part after the first.
    pub is_locked: Option<bool>,
}

fn default_file_type() -> String {
    "video".to_string()
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLessonPartDto {
    pub title: Option<String>,
    pub file_path: Option<String>,
    pub file_url: Option<String>,
    pub file_type: Option<String>,
    pub file_size: Option<i64>,
    #[validate(nested)]
    pub questions: Option<Vec<Question>>,
    pub is_locked: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonResponse {
    pub success: bool,
    pub message: String,
    pub data: Lesson,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonListResponse {
    pub success: bool,
    pub data: Vec<Lesson>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonPartResponse {
    pub success: bool,
    pub message: String,
    pub data: LessonPart,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonPartListResponse {
    pub success: bool,
    pub data: Vec<LessonPart>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessMessage {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part_dto(correct_answer: i32) -> CreateLessonPartDto {
        serde_json::from_value(serde_json::json!({
            "lessonId": "00000000-0000-0000-0000-000000000001",
            "partNumber": 1,
            "title": "Introduction",
            "filePath": "/uploads/intro.mp4",
            "fileUrl": "https://cdn.example.com/intro.mp4",
            "questions": [{
                "question": "What is covered first?",
                "options": ["Basics", "Joins", "Indexes", "Triggers"],
                "correctAnswer": correct_answer
            }]
        }))
        .unwrap()
    }

    #[test]
    fn answer_index_within_options_is_accepted() {
        assert!(part_dto(0).validate().is_ok());
        assert!(part_dto(3).validate().is_ok());
    }

    #[test]
    fn out_of_range_answer_index_is_rejected() {
        assert!(part_dto(9).validate().is_err());
        assert!(part_dto(-1).validate().is_err());
    }

    #[test]
    fn updated_questions_are_validated_too() {
        let dto = UpdateLessonPartDto {
            title: None,
            file_path: None,
            file_url: None,
            file_type: None,
            file_size: None,
            questions: Some(vec![Question {
                question: "Which index is out of range?".to_string(),
                options: vec!["a".to_string(), "b".to_string()],
                correct_answer: 4,
                explanation: None,
            }]),
            is_locked: None,
        };
        assert!(dto.validate().is_err());
    }
}
