use sqlx::PgPool;

use crate::modules::lessons::model::{Lesson, LessonRow};
use crate::modules::lessons::service::LESSON_SELECT;
use crate::modules::materials::model::{Material, MaterialRow};
use crate::modules::materials::service::MATERIAL_SELECT;
use crate::modules::subjects::model::{Subject, SubjectRow};
use crate::modules::subjects::service::SUBJECT_SELECT;
use crate::modules::users::model::User;
use crate::utils::errors::AppError;

use super::model::LecturerStats;

pub struct LecturerService;

impl LecturerService {
    pub async fn get_profile(db: &PgPool, user_id: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, user_id, first_name, last_name, email, role, department,
                    created_at, updated_at
             FROM users WHERE user_id = $1 AND role = 'lecturer'",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Lecturer not found"))
    }

    pub async fn get_subjects(db: &PgPool, lecturer_id: &str) -> Result<Vec<Subject>, AppError> {
        let rows = sqlx::query_as::<_, SubjectRow>(&format!(
            "{SUBJECT_SELECT} WHERE s.lecturer = $1 ORDER BY s.year, s.semester"
        ))
        .bind(lecturer_id)
        .fetch_all(db)
        .await?;
        Ok(rows.into_iter().map(Subject::from).collect())
    }

    pub async fn get_students(db: &PgPool, lecturer_id: &str) -> Result<Vec<User>, AppError> {
        let lecturer = Self::get_profile(db, lecturer_id).await?;

        Ok(sqlx::query_as::<_, User>(
            "SELECT id, user_id, first_name, last_name, email, role, department,
                    created_at, updated_at
             FROM users WHERE role = 'student' AND department = $1
             ORDER BY first_name",
        )
        .bind(&lecturer.department)
        .fetch_all(db)
        .await?)
    }

    pub async fn get_materials(db: &PgPool, lecturer_id: &str) -> Result<Vec<Material>, AppError> {
        let rows = sqlx::query_as::<_, MaterialRow>(&format!(
            "{MATERIAL_SELECT} WHERE s.lecturer = $1 ORDER BY m.created_at DESC"
        ))
        .bind(lecturer_id)
        .fetch_all(db)
        .await?;
        Ok(rows.into_iter().map(Material::from).collect())
    }

    /// Lessons carry the author's display name, so the lecturer is
    /// resolved to their full name before matching.
    pub async fn get_lessons(db: &PgPool, lecturer_id: &str) -> Result<Vec<Lesson>, AppError> {
        let lecturer = Self::get_profile(db, lecturer_id).await?;
        let author = format!("{} {}", lecturer.first_name, lecturer.last_name);

        let rows = sqlx::query_as::<_, LessonRow>(&format!(
            "{LESSON_SELECT} WHERE l.author = $1 ORDER BY l.created_at DESC"
        ))
        .bind(&author)
        .fetch_all(db)
        .await?;
        Ok(rows.into_iter().map(Lesson::from).collect())
    }

    pub async fn get_stats(db: &PgPool, lecturer_id: &str) -> Result<LecturerStats, AppError> {
        let lecturer = Self::get_profile(db, lecturer_id).await?;
        let author = format!("{} {}", lecturer.first_name, lecturer.last_name);

        let counts = sqlx::query_as::<_, (i64, i64, i64, i64)>(
            "SELECT
                 (SELECT COUNT(*) FROM subjects WHERE lecturer = $1),
                 (SELECT COUNT(*) FROM users
                  WHERE role = 'student' AND department = $2),
                 (SELECT COUNT(*) FROM materials m
                  JOIN subjects s ON s.id = m.subject WHERE s.lecturer = $1),
                 (SELECT COUNT(*) FROM lessons WHERE author = $3)",
        )
        .bind(lecturer_id)
        .bind(&lecturer.department)
        .bind(&author)
        .fetch_one(db)
        .await?;

        Ok(LecturerStats {
            total_subjects: counts.0,
            total_students: counts.1,
            total_materials: counts.2,
            total_lessons: counts.3,
        })
    }
}
