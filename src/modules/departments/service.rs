use sqlx::PgPool;
use tracing::{info, instrument};

use crate::utils::errors::AppError;

use super::model::{CreateDepartmentDto, Department, UpdateDepartmentDto};

const DEPARTMENT_COLUMNS: &str =
    "id, department_id, name, description, image_url, created_at, updated_at";

pub struct DepartmentService;

impl DepartmentService {
    #[instrument(skip(db, dto), fields(department.code = %dto.department_id))]
    pub async fn create(db: &PgPool, dto: CreateDepartmentDto) -> Result<Department, AppError> {
        let code = dto.department_id.trim().to_uppercase();

        if sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM departments WHERE LOWER(department_id) = LOWER($1)",
        )
        .bind(&code)
        .fetch_one(db)
        .await?
            > 0
        {
            return Err(AppError::bad_request("Department with this ID already exists"));
        }

        if sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM departments WHERE LOWER(name) = LOWER($1)",
        )
        .bind(dto.name.trim())
        .fetch_one(db)
        .await?
            > 0
        {
            return Err(AppError::bad_request(
                "Department with this name already exists",
            ));
        }

        let department = sqlx::query_as::<_, Department>(&format!(
            "INSERT INTO departments (department_id, name, description, image_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {DEPARTMENT_COLUMNS}"
        ))
        .bind(&code)
        .bind(dto.name.trim())
        .bind(dto.description.unwrap_or_default())
        .bind(dto.image_url.unwrap_or_default())
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_db(e, "Department with this ID already exists"))?;

        info!(department.code = %department.department_id, "Department created");
        Ok(department)
    }

    pub async fn get_all(db: &PgPool) -> Result<Vec<Department>, AppError> {
        let departments = sqlx::query_as::<_, Department>(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await?;
        Ok(departments)
    }

    pub async fn get_by_code(db: &PgPool, department_id: &str) -> Result<Department, AppError> {
        sqlx::query_as::<_, Department>(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE department_id = $1"
        ))
        .bind(department_id.to_uppercase())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Department not found"))
    }

    #[instrument(skip(db, dto), fields(department.code = %department_id))]
    pub async fn update(
        db: &PgPool,
        department_id: &str,
        dto: UpdateDepartmentDto,
    ) -> Result<Department, AppError> {
        let existing = Self::get_by_code(db, department_id).await?;

        if let Some(name) = dto.name.as_deref()
            && sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM departments WHERE LOWER(name) = LOWER($1) AND id <> $2",
            )
            .bind(name.trim())
            .bind(existing.id)
            .fetch_one(db)
            .await?
                > 0
        {
            return Err(AppError::bad_request(
                "Department with this name already exists",
            ));
        }

        let department = sqlx::query_as::<_, Department>(&format!(
            "UPDATE departments SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                image_url = COALESCE($4, image_url),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {DEPARTMENT_COLUMNS}"
        ))
        .bind(existing.id)
        .bind(dto.name.as_deref().map(str::trim))
        .bind(&dto.description)
        .bind(&dto.image_url)
        .fetch_one(db)
        .await?;

        info!(department.code = %department.department_id, "Department updated");
        Ok(department)
    }

    /// Deletes the department's subjects, then the department itself, in
    /// one transaction so a failure leaves both intact.
    #[instrument(skip(db), fields(department.code = %department_id))]
    pub async fn delete(db: &PgPool, department_id: &str) -> Result<Department, AppError> {
        let department = Self::get_by_code(db, department_id).await?;

        let mut tx = db.begin().await?;

        let subjects_deleted = sqlx::query("DELETE FROM subjects WHERE department = $1")
            .bind(department.id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(department.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            department.code = %department.department_id,
            subjects_deleted = subjects_deleted,
            "Department deleted with its subjects"
        );
        Ok(department)
    }
}
