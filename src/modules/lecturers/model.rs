//! Lecturer dashboard payloads.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LecturerStats {
    pub total_subjects: i64,
    pub total_students: i64,
    pub total_materials: i64,
    pub total_lessons: i64,
}
