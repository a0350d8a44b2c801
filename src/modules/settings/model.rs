//! The system settings singleton and the admin dashboard payloads.
//!
//! Settings are one row pinned by a boolean primary key. Each section is
//! a typed struct stored as jsonb; a PUT replaces whole sections and
//! leaves the ones it does not mention untouched.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::modules::departments::model::Department;
use crate::modules::lessons::model::Lesson;
use crate::modules::news::model::News;
use crate::modules::subjects::model::Subject;
use crate::modules::users::model::User;

fn default_smtp_port() -> i32 {
    587
}

fn default_from_email() -> String {
    "noreply@lectern.edu".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailSettings {
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: i32,
    pub smtp_user: String,
    pub smtp_password: String,
    #[serde(default = "default_from_email")]
    pub from_email: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_user: String::new(),
            smtp_password: String::new(),
            from_email: default_from_email(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SecuritySettings {
    pub password_min_length: i32,
    /// Hours.
    pub session_timeout: i32,
    pub max_login_attempts: i32,
    pub enable_two_factor: bool,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            password_min_length: 8,
            session_timeout: 24,
            max_login_attempts: 5,
            enable_two_factor: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FileSettings {
    /// Megabytes.
    pub max_file_size: i32,
    pub allowed_file_types: Vec<String>,
    pub storage_provider: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            max_file_size: 100,
            allowed_file_types: ["pdf", "doc", "docx", "ppt", "pptx", "mp4", "avi", "mov"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            storage_provider: "local".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub enable_email_notifications: bool,
    pub enable_push_notifications: bool,
    pub notification_frequency: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enable_email_notifications: true,
            enable_push_notifications: true,
            notification_frequency: "immediate".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AcademicSettings {
    pub current_academic_year: String,
    /// Months.
    pub semester_duration: i32,
    pub grade_scale: String,
    pub passing_grade: i32,
}

impl Default for AcademicSettings {
    fn default() -> Self {
        Self {
            current_academic_year: chrono::Utc::now().format("%Y").to_string(),
            semester_duration: 6,
            grade_scale: "A-F".to_string(),
            passing_grade: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MaintenanceMode {
    pub enabled: bool,
    pub message: String,
    pub allowed_roles: Vec<String>,
}

impl Default for MaintenanceMode {
    fn default() -> Self {
        Self {
            enabled: false,
            message: "System is under maintenance. Please try again later.".to_string(),
            allowed_roles: vec!["admin".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BackupSettings {
    pub auto_backup: bool,
    pub backup_frequency: String,
    pub retention_days: i32,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            auto_backup: true,
            backup_frequency: "weekly".to_string(),
            retention_days: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSettings {
    pub primary_color: String,
    pub secondary_color: String,
    pub dark_mode: bool,
    pub custom_css: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            primary_color: "#667eea".to_string(),
            secondary_color: "#764ba2".to_string(),
            dark_mode: false,
            custom_css: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub system_name: String,
    pub system_logo: String,
    pub system_description: String,
    #[schema(value_type = EmailSettings)]
    pub email_settings: Json<EmailSettings>,
    #[schema(value_type = SecuritySettings)]
    pub security_settings: Json<SecuritySettings>,
    #[schema(value_type = FileSettings)]
    pub file_settings: Json<FileSettings>,
    #[schema(value_type = NotificationSettings)]
    pub notification_settings: Json<NotificationSettings>,
    #[schema(value_type = AcademicSettings)]
    pub academic_settings: Json<AcademicSettings>,
    #[schema(value_type = MaintenanceMode)]
    pub maintenance_mode: Json<MaintenanceMode>,
    #[schema(value_type = BackupSettings)]
    pub backup_settings: Json<BackupSettings>,
    #[schema(value_type = ThemeSettings)]
    pub theme_settings: Json<ThemeSettings>,
    pub last_updated_by: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsDto {
    pub system_name: Option<String>,
    pub system_logo: Option<String>,
    pub system_description: Option<String>,
    pub email_settings: Option<EmailSettings>,
    pub security_settings: Option<SecuritySettings>,
    pub file_settings: Option<FileSettings>,
    pub notification_settings: Option<NotificationSettings>,
    pub academic_settings: Option<AcademicSettings>,
    pub maintenance_mode: Option<MaintenanceMode>,
    pub backup_settings: Option<BackupSettings>,
    pub theme_settings: Option<ThemeSettings>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    pub success: bool,
    pub data: Settings,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateSettingsResponse {
    pub success: bool,
    pub message: String,
    pub data: Settings,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemOverview {
    pub total_users: i64,
    pub total_students: i64,
    pub total_lecturers: i64,
    pub total_admins: i64,
    pub total_departments: i64,
    pub total_subjects: i64,
    pub total_lessons: i64,
    pub total_news: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStat {
    pub department: String,
    pub department_id: String,
    pub students: i64,
    pub lecturers: i64,
    pub subjects: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct MonthlyRegistration {
    pub year: i32,
    pub month: i32,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub recent_users: Vec<User>,
    pub recent_lessons: Vec<Lesson>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub overview: SystemOverview,
    pub department_stats: Vec<DepartmentStat>,
    pub monthly_registrations: Vec<MonthlyRegistration>,
    pub recent_activity: RecentActivity,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SystemStatsResponse {
    pub success: bool,
    pub data: SystemStats,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MaintenanceDto {
    /// One of cleanup_logs, optimize_database, clear_cache, backup_database.
    pub operation: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MaintenanceResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetDto {
    pub confirmation_code: String,
    /// One of lessons, news, students.
    pub data_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
    pub deleted_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportParams {
    /// One of users, departments, subjects, lessons, all.
    pub data_type: Option<String>,
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct ExportData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departments: Option<Vec<Department>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<Subject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons: Option<Vec<Lesson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news: Option<Vec<News>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub success: bool,
    pub data: ExportData,
    pub exported_at: chrono::DateTime<chrono::Utc>,
    pub exported_by: String,
}
