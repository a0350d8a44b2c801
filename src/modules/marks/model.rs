//! Mark records and the derived statistics blocks.
//!
//! A mark is keyed by (studentId, subject, semester, year, academicYear);
//! writes are upserts on that key. `total_marks` and `grade` are derived
//! on every save and never trusted from the client.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationInfo, deserialize_optional_i64};

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
    pub credits: i32,
}

/// Student identity attached to mark listings; absent when the account
/// has been deleted since the mark was recorded.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentInfo {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Option<String>,
}

/// Flat row of the marks join (departments, subjects, and the student's
/// user row via the business id).
#[derive(Debug, Clone, FromRow)]
pub struct MarkRow {
    pub id: Uuid,
    pub student_id: String,
    pub department: Uuid,
    pub department_id: String,
    pub subject: Uuid,
    pub assignment_marks: i32,
    pub exam_marks: i32,
    pub total_marks: i32,
    pub grade: String,
    pub semester: i32,
    pub year: i32,
    pub academic_year: String,
    pub added_by: String,
    pub remarks: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub dept_code: String,
    pub dept_name: String,
    pub subj_code: String,
    pub subj_name: String,
    pub subj_credits: i32,
    pub stu_user_id: Option<String>,
    pub stu_first_name: Option<String>,
    pub stu_last_name: Option<String>,
    pub stu_email: Option<String>,
    pub stu_department: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    pub id: Uuid,
    pub student_id: String,
    pub department: DepartmentRef,
    pub department_id: String,
    pub subject: SubjectRef,
    pub assignment_marks: i32,
    pub exam_marks: i32,
    pub total_marks: i32,
    pub grade: String,
    pub semester: i32,
    pub year: i32,
    pub academic_year: String,
    pub added_by: String,
    pub remarks: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_info: Option<StudentInfo>,
}

impl From<MarkRow> for Mark {
    fn from(row: MarkRow) -> Self {
        let student_info = match (
            row.stu_user_id,
            row.stu_first_name,
            row.stu_last_name,
            row.stu_email,
        ) {
            (Some(user_id), Some(first_name), Some(last_name), Some(email)) => Some(StudentInfo {
                user_id,
                first_name,
                last_name,
                email,
                department: row.stu_department,
            }),
            _ => None,
        };

        Self {
            id: row.id,
            student_id: row.student_id,
            department: DepartmentRef {
                id: row.department,
                department_id: row.dept_code,
                name: row.dept_name,
            },
            department_id: row.department_id,
            subject: SubjectRef {
                id: row.subject,
                subject_code: row.subj_code,
                subject_name: row.subj_name,
                credits: row.subj_credits,
            },
            assignment_marks: row.assignment_marks,
            exam_marks: row.exam_marks,
            total_marks: row.total_marks,
            grade: row.grade,
            semester: row.semester,
            year: row.year,
            academic_year: row.academic_year,
            added_by: row.added_by,
            remarks: row.remarks,
            created_at: row.created_at,
            updated_at: row.updated_at,
            student_info,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertMarkDto {
    #[validate(length(min = 1, message = "All required fields must be provided"))]
    pub student_id: String,
    #[validate(length(min = 1, message = "All required fields must be provided"))]
    pub department_id: String,
    pub subject_id: Uuid,
    #[validate(range(min = 0, max = 100, message = "Marks must be between 0 and 100"))]
    pub assignment_marks: i32,
    #[validate(range(min = 0, max = 100, message = "Marks must be between 0 and 100"))]
    pub exam_marks: i32,
    #[validate(range(min = 1, max = 2, message = "Semester must be 1 or 2"))]
    pub semester: i32,
    #[validate(range(min = 1, max = 4, message = "Year must be between 1 and 4"))]
    pub year: i32,
    /// Defaults to the current calendar year.
    pub academic_year: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkFilterParams {
    pub student_id: Option<String>,
    pub department_id: Option<String>,
    pub subject_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub semester: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub year: Option<i64>,
    pub academic_year: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkScopeParams {
    pub academic_year: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub semester: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub year: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkStatisticsParams {
    pub department_id: Option<String>,
    pub academic_year: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkResponse {
    pub success: bool,
    pub message: String,
    pub data: Mark,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkListResponse {
    pub success: bool,
    pub data: Vec<Mark>,
    pub pagination: PaginationInfo,
}

/// Averages and rates are fixed to two decimal places and rendered as
/// strings, as the dashboard consumes them.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentMarksStatistics {
    pub total_subjects: usize,
    pub average_marks: String,
    pub highest_marks: i32,
    pub lowest_marks: i32,
    pub grade_distribution: BTreeMap<String, i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentMarksData {
    pub student: StudentInfo,
    pub marks: Vec<Mark>,
    pub statistics: StudentMarksStatistics,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentMarksResponse {
    pub success: bool,
    pub data: StudentMarksData,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectMarksStatistics {
    pub total_students: usize,
    pub average_marks: String,
    pub highest_marks: i32,
    pub lowest_marks: i32,
    pub pass_rate: String,
    pub grade_distribution: BTreeMap<String, i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectMarksData {
    pub subject: SubjectRef,
    pub marks: Vec<Mark>,
    pub statistics: SubjectMarksStatistics,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectMarksResponse {
    pub success: bool,
    pub data: SubjectMarksData,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentWiseStats {
    pub total_records: usize,
    pub average_marks: String,
    pub pass_rate: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarksDashboardStatistics {
    pub total_marks_records: usize,
    pub total_students: usize,
    pub total_subjects: usize,
    pub average_marks: String,
    pub pass_rate: String,
    pub grade_distribution: BTreeMap<String, i64>,
    pub department_wise_stats: BTreeMap<String, DepartmentWiseStats>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarksDashboardResponse {
    pub success: bool,
    pub data: MarksDashboardStatistics,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedMarkRef {
    pub id: Uuid,
    pub student_id: String,
    pub subject: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMarkResponse {
    pub success: bool,
    pub message: String,
    pub deleted_mark: DeletedMarkRef,
}
