use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::modules::departments::service::DepartmentService;
use crate::utils::errors::AppError;

use super::model::{CreateSubjectDto, Subject, SubjectFilterParams, SubjectRow, UpdateSubjectDto};

/// Join used by every subject read so responses always carry the
/// expanded department block.
pub(crate) const SUBJECT_SELECT: &str = "SELECT s.id, s.subject_code, s.subject_name, s.department, \
     s.department_id, s.year, s.semester, s.credits, s.lecturer, s.description, \
     s.created_at, s.updated_at, d.department_id AS dept_code, d.name AS dept_name \
     FROM subjects s JOIN departments d ON d.id = s.department";

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db, dto), fields(subject.code = %dto.subject_code))]
    pub async fn create(db: &PgPool, dto: CreateSubjectDto) -> Result<Subject, AppError> {
        let department = DepartmentService::get_by_code(db, &dto.department_id).await?;
        let code = dto.subject_code.trim().to_uppercase();

        if sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM subjects WHERE LOWER(subject_code) = LOWER($1)",
        )
        .bind(&code)
        .fetch_one(db)
        .await?
            > 0
        {
            return Err(AppError::bad_request("Subject with this code already exists"));
        }

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO subjects
                (subject_code, subject_name, department, department_id, year, semester, credits, lecturer, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING id",
        )
        .bind(&code)
        .bind(dto.subject_name.trim())
        .bind(department.id)
        .bind(&department.department_id)
        .bind(dto.year)
        .bind(dto.semester)
        .bind(dto.credits)
        .bind(&dto.lecturer)
        .bind(dto.description.unwrap_or_default())
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_db(e, "Subject with this code already exists"))?;

        info!(subject.code = %code, "Subject created");
        Self::get_by_id(db, id).await
    }

    pub async fn get_by_id(db: &PgPool, id: Uuid) -> Result<Subject, AppError> {
        sqlx::query_as::<_, SubjectRow>(&format!("{SUBJECT_SELECT} WHERE s.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .map(Subject::from)
            .ok_or_else(|| AppError::not_found("Subject not found"))
    }

    pub async fn get_by_code(db: &PgPool, subject_code: &str) -> Result<Subject, AppError> {
        sqlx::query_as::<_, SubjectRow>(&format!(
            "{SUBJECT_SELECT} WHERE LOWER(s.subject_code) = LOWER($1)"
        ))
        .bind(subject_code)
        .fetch_optional(db)
        .await?
        .map(Subject::from)
        .ok_or_else(|| AppError::not_found("Subject not found"))
    }

    #[instrument(skip(db, filters))]
    pub async fn get_all(
        db: &PgPool,
        filters: SubjectFilterParams,
    ) -> Result<Vec<Subject>, AppError> {
        let mut sql = format!("{SUBJECT_SELECT} WHERE 1=1");
        let mut text_binds = Vec::new();
        let mut int_binds = Vec::new();

        if let Some(department) = filters.department.as_deref().filter(|d| !d.is_empty()) {
            text_binds.push(department.to_uppercase());
            sql.push_str(&format!(" AND s.department_id = ${}", text_binds.len()));
        }
        if let Some(year) = filters.year {
            int_binds.push(year);
            sql.push_str(&format!(
                " AND s.year = ${}",
                text_binds.len() + int_binds.len()
            ));
        }
        if let Some(semester) = filters.semester {
            int_binds.push(semester);
            sql.push_str(&format!(
                " AND s.semester = ${}",
                text_binds.len() + int_binds.len()
            ));
        }

        sql.push_str(" ORDER BY s.year, s.semester, s.subject_code");

        let mut query = sqlx::query_as::<_, SubjectRow>(&sql);
        for bind in &text_binds {
            query = query.bind(bind);
        }
        for bind in &int_binds {
            query = query.bind(bind);
        }

        let rows = query.fetch_all(db).await?;
        Ok(rows.into_iter().map(Subject::from).collect())
    }

    pub async fn get_by_department(
        db: &PgPool,
        department_code: &str,
    ) -> Result<Vec<Subject>, AppError> {
        // 404s when the department itself is unknown.
        let department = DepartmentService::get_by_code(db, department_code).await?;

        let rows = sqlx::query_as::<_, SubjectRow>(&format!(
            "{SUBJECT_SELECT} WHERE s.department = $1 ORDER BY s.year, s.semester, s.subject_code"
        ))
        .bind(department.id)
        .fetch_all(db)
        .await?;
        Ok(rows.into_iter().map(Subject::from).collect())
    }

    pub async fn get_by_department_year_semester(
        db: &PgPool,
        department_code: &str,
        year: i32,
        semester: i32,
    ) -> Result<Vec<Subject>, AppError> {
        let department = DepartmentService::get_by_code(db, department_code).await?;

        let rows = sqlx::query_as::<_, SubjectRow>(&format!(
            "{SUBJECT_SELECT} WHERE s.department = $1 AND s.year = $2 AND s.semester = $3
             ORDER BY s.subject_code"
        ))
        .bind(department.id)
        .bind(year)
        .bind(semester)
        .fetch_all(db)
        .await?;
        Ok(rows.into_iter().map(Subject::from).collect())
    }

    #[instrument(skip(db, dto), fields(subject.code = %subject_code))]
    pub async fn update(
        db: &PgPool,
        subject_code: &str,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        let existing = Self::get_by_code(db, subject_code).await?;

        let (department_uuid, department_code) = match dto.department_id.as_deref() {
            Some(code) => {
                let department = DepartmentService::get_by_code(db, code).await?;
                (Some(department.id), Some(department.department_id))
            }
            None => (None, None),
        };

        sqlx::query(
            "UPDATE subjects SET
                subject_name = COALESCE($2, subject_name),
                department = COALESCE($3, department),
                department_id = COALESCE($4, department_id),
                year = COALESCE($5, year),
                semester = COALESCE($6, semester),
                credits = COALESCE($7, credits),
                lecturer = COALESCE($8, lecturer),
                description = COALESCE($9, description),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(existing.id)
        .bind(dto.subject_name.as_deref().map(str::trim))
        .bind(department_uuid)
        .bind(&department_code)
        .bind(dto.year)
        .bind(dto.semester)
        .bind(dto.credits)
        .bind(&dto.lecturer)
        .bind(&dto.description)
        .execute(db)
        .await?;

        info!(subject.code = %existing.subject_code, "Subject updated");
        Self::get_by_id(db, existing.id).await
    }

    /// Accepts either the database id or the subject code.
    #[instrument(skip(db), fields(subject = %id_or_code))]
    pub async fn delete(db: &PgPool, id_or_code: &str) -> Result<Subject, AppError> {
        let subject = match Uuid::parse_str(id_or_code) {
            Ok(id) => Self::get_by_id(db, id).await?,
            Err(_) => Self::get_by_code(db, id_or_code).await?,
        };

        sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(subject.id)
            .execute(db)
            .await?;

        info!(subject.code = %subject.subject_code, "Subject deleted");
        Ok(subject)
    }
}
