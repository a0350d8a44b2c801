//! Student dashboard payloads. The documents themselves come from the
//! owning modules; only the stats block is specific to this module.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentStats {
    pub enrolled_subjects: i64,
    pub available_lessons: i64,
    pub total_materials: i64,
    /// Mean of the student's total marks, rounded; 0 with no marks yet.
    pub average_grade: i64,
}
