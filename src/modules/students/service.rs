use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::lessons::model::{Lesson, LessonRow};
use crate::modules::lessons::service::LESSON_SELECT;
use crate::modules::materials::model::{Material, MaterialRow};
use crate::modules::materials::service::MATERIAL_SELECT;
use crate::modules::news::model::News;
use crate::modules::subjects::model::Subject;
use crate::modules::subjects::service::SubjectService;
use crate::modules::users::model::User;
use crate::utils::errors::AppError;

use super::model::StudentStats;

pub struct StudentService;

impl StudentService {
    /// Loads the student and resolves their department row. Every
    /// dashboard route starts here.
    async fn student_department(db: &PgPool, user_id: &str) -> Result<(User, Uuid), AppError> {
        let student = Self::get_profile(db, user_id).await?;

        let department_code = student
            .department
            .as_deref()
            .ok_or_else(|| AppError::not_found("Department not found"))?;
        let department_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM departments WHERE UPPER(department_id) = UPPER($1)",
        )
        .bind(department_code)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Department not found"))?;

        Ok((student, department_id))
    }

    pub async fn get_profile(db: &PgPool, user_id: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, user_id, first_name, last_name, email, role, department,
                    created_at, updated_at
             FROM users WHERE user_id = $1 AND role = 'student'",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Student not found"))
    }

    pub async fn get_subjects(db: &PgPool, user_id: &str) -> Result<Vec<Subject>, AppError> {
        let (student, _) = Self::student_department(db, user_id).await?;
        // student_department guarantees the department code is present
        let code = student.department.as_deref().unwrap_or_default();
        SubjectService::get_by_department(db, code).await
    }

    pub async fn get_lessons(db: &PgPool, user_id: &str) -> Result<Vec<Lesson>, AppError> {
        let (_, department_id) = Self::student_department(db, user_id).await?;

        let rows = sqlx::query_as::<_, LessonRow>(&format!(
            "{LESSON_SELECT} WHERE l.department = $1 AND l.status = 'published' \
             ORDER BY l.created_at DESC LIMIT 10"
        ))
        .bind(department_id)
        .fetch_all(db)
        .await?;
        Ok(rows.into_iter().map(Lesson::from).collect())
    }

    pub async fn get_materials(db: &PgPool, user_id: &str) -> Result<Vec<Material>, AppError> {
        let (_, department_id) = Self::student_department(db, user_id).await?;

        let rows = sqlx::query_as::<_, MaterialRow>(&format!(
            "{MATERIAL_SELECT} WHERE s.department = $1 \
             ORDER BY m.created_at DESC LIMIT 10"
        ))
        .bind(department_id)
        .fetch_all(db)
        .await?;
        Ok(rows.into_iter().map(Material::from).collect())
    }

    pub async fn get_stats(db: &PgPool, user_id: &str) -> Result<StudentStats, AppError> {
        let (student, department_id) = Self::student_department(db, user_id).await?;

        let counts = sqlx::query_as::<_, (i64, i64, i64)>(
            "SELECT
                 (SELECT COUNT(*) FROM subjects WHERE department = $1),
                 (SELECT COUNT(*) FROM lessons
                  WHERE department = $1 AND status = 'published'),
                 (SELECT COUNT(*) FROM materials m
                  JOIN subjects s ON s.id = m.subject WHERE s.department = $1)",
        )
        .bind(department_id)
        .fetch_one(db)
        .await?;

        let average_grade = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(ROUND(AVG(total_marks)), 0)::BIGINT
             FROM marks WHERE student_id = $1",
        )
        .bind(&student.user_id)
        .fetch_one(db)
        .await?;

        Ok(StudentStats {
            enrolled_subjects: counts.0,
            available_lessons: counts.1,
            total_materials: counts.2,
            average_grade,
        })
    }

    pub async fn get_news(db: &PgPool) -> Result<Vec<News>, AppError> {
        Ok(sqlx::query_as::<_, News>(
            "SELECT id, title, description, image_url, image_path, author, status,
                    created_at, updated_at
             FROM news WHERE status = 'published'
             ORDER BY created_at DESC LIMIT 5",
        )
        .fetch_all(db)
        .await?)
    }
}
