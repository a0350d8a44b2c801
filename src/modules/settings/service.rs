use std::time::Duration;

use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{info, instrument, warn};

use crate::modules::departments::service::DepartmentService;
use crate::modules::lessons::model::LessonFilterParams;
use crate::modules::lessons::service::LessonService;
use crate::modules::news::model::News;
use crate::modules::subjects::model::SubjectFilterParams;
use crate::modules::subjects::service::SubjectService;
use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;

use super::model::{
    DepartmentStat, ExportData, MonthlyRegistration, RecentActivity, Settings, SystemOverview,
    SystemStats, UpdateSettingsDto,
};

const SETTINGS_COLUMNS: &str = "system_name, system_logo, system_description, email_settings, \
     security_settings, file_settings, notification_settings, academic_settings, \
     maintenance_mode, backup_settings, theme_settings, last_updated_by, created_at, updated_at";

/// Guard against accidental wipes; resets refuse any other code.
pub const RESET_CONFIRMATION_CODE: &str = "RESET_CONFIRM_2024";

pub struct SettingsService;

impl SettingsService {
    /// The singleton row is created on first read with all sections at
    /// their defaults.
    pub async fn get_or_create(db: &PgPool) -> Result<Settings, AppError> {
        sqlx::query(
            "INSERT INTO settings (id, last_updated_by) VALUES (TRUE, 'system')
             ON CONFLICT (id) DO NOTHING",
        )
        .execute(db)
        .await?;

        let settings = sqlx::query_as::<_, Settings>(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM settings WHERE id"
        ))
        .fetch_one(db)
        .await?;
        Ok(settings)
    }

    /// Sections present in the payload replace the stored section
    /// wholesale; absent sections are untouched.
    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        dto: UpdateSettingsDto,
        updated_by: &str,
    ) -> Result<Settings, AppError> {
        Self::get_or_create(db).await?;

        let settings = sqlx::query_as::<_, Settings>(&format!(
            "UPDATE settings SET
                 system_name = COALESCE($1, system_name),
                 system_logo = COALESCE($2, system_logo),
                 system_description = COALESCE($3, system_description),
                 email_settings = COALESCE($4, email_settings),
                 security_settings = COALESCE($5, security_settings),
                 file_settings = COALESCE($6, file_settings),
                 notification_settings = COALESCE($7, notification_settings),
                 academic_settings = COALESCE($8, academic_settings),
                 maintenance_mode = COALESCE($9, maintenance_mode),
                 backup_settings = COALESCE($10, backup_settings),
                 theme_settings = COALESCE($11, theme_settings),
                 last_updated_by = $12,
                 updated_at = NOW()
             WHERE id
             RETURNING {SETTINGS_COLUMNS}"
        ))
        .bind(&dto.system_name)
        .bind(&dto.system_logo)
        .bind(&dto.system_description)
        .bind(dto.email_settings.map(Json))
        .bind(dto.security_settings.map(Json))
        .bind(dto.file_settings.map(Json))
        .bind(dto.notification_settings.map(Json))
        .bind(dto.academic_settings.map(Json))
        .bind(dto.maintenance_mode.map(Json))
        .bind(dto.backup_settings.map(Json))
        .bind(dto.theme_settings.map(Json))
        .bind(updated_by)
        .fetch_one(db)
        .await?;

        info!(settings.updated_by = updated_by, "Settings updated");
        Ok(settings)
    }

    pub async fn system_stats(db: &PgPool) -> Result<SystemStats, AppError> {
        let counts = sqlx::query_as::<_, (i64, i64, i64, i64, i64, i64, i64, i64)>(
            "SELECT
                 (SELECT COUNT(*) FROM users),
                 (SELECT COUNT(*) FROM users WHERE role = 'student'),
                 (SELECT COUNT(*) FROM users WHERE role = 'lecturer'),
                 (SELECT COUNT(*) FROM users WHERE role = 'admin'),
                 (SELECT COUNT(*) FROM departments),
                 (SELECT COUNT(*) FROM subjects),
                 (SELECT COUNT(*) FROM lessons),
                 (SELECT COUNT(*) FROM news)",
        )
        .fetch_one(db)
        .await?;

        let department_stats = sqlx::query_as::<_, DepartmentStat>(
            "SELECT d.name AS department, d.department_id,
                 (SELECT COUNT(*) FROM users u
                  WHERE u.role = 'student' AND UPPER(u.department) = d.department_id) AS students,
                 (SELECT COUNT(*) FROM users u
                  WHERE u.role = 'lecturer' AND UPPER(u.department) = d.department_id) AS lecturers,
                 (SELECT COUNT(*) FROM subjects s WHERE s.department = d.id) AS subjects
             FROM departments d
             ORDER BY d.department_id",
        )
        .fetch_all(db)
        .await?;

        let monthly_registrations = sqlx::query_as::<_, MonthlyRegistration>(
            "SELECT EXTRACT(YEAR FROM created_at)::INT AS year,
                    EXTRACT(MONTH FROM created_at)::INT AS month,
                    COUNT(*) AS count
             FROM users
             WHERE created_at >= NOW() - INTERVAL '6 months'
             GROUP BY 1, 2
             ORDER BY 1, 2",
        )
        .fetch_all(db)
        .await?;

        let recent_users = sqlx::query_as::<_, User>(
            "SELECT id, user_id, first_name, last_name, email, role, department,
                    created_at, updated_at
             FROM users ORDER BY created_at DESC LIMIT 5",
        )
        .fetch_all(db)
        .await?;

        let mut recent_lessons =
            LessonService::get_all(db, LessonFilterParams::default()).await?;
        recent_lessons.truncate(5);

        Ok(SystemStats {
            overview: SystemOverview {
                total_users: counts.0,
                total_students: counts.1,
                total_lecturers: counts.2,
                total_admins: counts.3,
                total_departments: counts.4,
                total_subjects: counts.5,
                total_lessons: counts.6,
                total_news: counts.7,
            },
            department_stats,
            monthly_registrations,
            recent_activity: RecentActivity {
                recent_users,
                recent_lessons,
            },
        })
    }

    /// The operations are placeholders with realistic latency; the real
    /// work happens out of band.
    #[instrument]
    pub async fn perform_maintenance(operation: &str) -> Result<String, AppError> {
        let delay = match operation {
            "cleanup_logs" => Duration::from_millis(2000),
            "optimize_database" => Duration::from_millis(3000),
            "clear_cache" => Duration::from_millis(1000),
            "backup_database" => Duration::from_millis(5000),
            _ => return Err(AppError::bad_request("Invalid maintenance operation")),
        };
        tokio::time::sleep(delay).await;

        info!(operation, "Maintenance operation completed");
        Ok(format!(
            "{} completed successfully",
            operation.replace('_', " ")
        ))
    }

    #[instrument(skip(db))]
    pub async fn reset_data(db: &PgPool, data_type: &str) -> Result<u64, AppError> {
        let deleted = match data_type {
            "lessons" => {
                let mut tx = db.begin().await?;
                sqlx::query("DELETE FROM lesson_parts").execute(&mut *tx).await?;
                let result = sqlx::query("DELETE FROM lessons").execute(&mut *tx).await?;
                tx.commit().await?;
                result.rows_affected()
            }
            "news" => sqlx::query("DELETE FROM news").execute(db).await?.rows_affected(),
            "students" => {
                sqlx::query("DELETE FROM users WHERE role = 'student'")
                    .execute(db)
                    .await?
                    .rows_affected()
            }
            _ => return Err(AppError::bad_request("Invalid data type for reset")),
        };

        warn!(data_type, deleted, "System data reset");
        Ok(deleted)
    }

    pub async fn export_data(db: &PgPool, data_type: &str) -> Result<ExportData, AppError> {
        let mut data = ExportData::default();
        match data_type {
            "users" => data.users = Some(UserService::get_all(db).await?),
            "departments" => data.departments = Some(DepartmentService::get_all(db).await?),
            "subjects" => {
                data.subjects =
                    Some(SubjectService::get_all(db, SubjectFilterParams::default()).await?)
            }
            "lessons" => {
                data.lessons =
                    Some(LessonService::get_all(db, LessonFilterParams::default()).await?)
            }
            "all" => {
                data.users = Some(UserService::get_all(db).await?);
                data.departments = Some(DepartmentService::get_all(db).await?);
                data.subjects =
                    Some(SubjectService::get_all(db, SubjectFilterParams::default()).await?);
                data.lessons =
                    Some(LessonService::get_all(db, LessonFilterParams::default()).await?);
                data.news = Some(
                    sqlx::query_as::<_, News>(
                        "SELECT id, title, description, image_url, image_path, author, status,
                                created_at, updated_at
                         FROM news ORDER BY created_at DESC",
                    )
                    .fetch_all(db)
                    .await?,
                );
            }
            _ => return Err(AppError::bad_request("Invalid data type for export")),
        }
        Ok(data)
    }
}
