use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::departments::model::{
    CreateDepartmentDto, DeleteDepartmentResponse, Department, UpdateDepartmentDto,
};
use crate::modules::lecturers::model::LecturerStats;
use crate::modules::lessons::model::{
    CreateLessonDto, CreateLessonPartDto, DepartmentRef, Lesson, LessonListResponse, LessonPart,
    LessonPartListResponse, LessonPartResponse, LessonResponse, LessonStatus, MediaType, Question,
    SubjectRef, SuccessMessage, UpdateLessonDto, UpdateLessonPartDto,
};
use crate::modules::marks::model::{
    DeleteMarkResponse, DeletedMarkRef, DepartmentWiseStats, Mark, MarkListResponse, MarkResponse,
    MarksDashboardResponse, MarksDashboardStatistics, StudentInfo, StudentMarksData,
    StudentMarksResponse, StudentMarksStatistics, SubjectMarksData, SubjectMarksResponse,
    SubjectMarksStatistics, UpsertMarkDto,
};
use crate::modules::materials::model::{
    CreateMaterialDto, Material, UpdateMaterialDto, UploaderRef,
};
use crate::modules::news::model::{
    CreateNewsDto, DeleteNewsResponse, DeletedNewsRef, News, NewsListResponse, NewsResponse,
    NewsStatus, SingleNewsResponse, UpdateNewsDto,
};
use crate::modules::notifications::model::{
    Notification, NotificationAck, NotificationKind, NotificationListResponse,
    NotificationResponse, NotificationStats, NotificationStatsResponse, NotificationStatus,
    Priority, RecipientListResponse, RecipientUser, ReplyDto, SendNotificationDto,
};
use crate::modules::settings::model::{
    AcademicSettings, BackupSettings, DepartmentStat, EmailSettings, ExportData, ExportResponse,
    FileSettings, MaintenanceDto, MaintenanceMode, MaintenanceResponse, MonthlyRegistration,
    NotificationSettings, RecentActivity, ResetDto, ResetResponse, SecuritySettings, Settings,
    SettingsResponse, SystemOverview, SystemStats, SystemStatsResponse, ThemeSettings,
    UpdateSettingsDto, UpdateSettingsResponse,
};
use crate::modules::students::model::StudentStats;
use crate::modules::subjects::model::{
    CreateSubjectDto, DeleteSubjectResponse, Subject, UpdateSubjectDto,
};
use crate::modules::users::model::{
    DeleteUserResponse, LoginDto, LoginResponse, MessageResponse, RegisterUserDto, RoleCounts,
    RoleListResponse, UpdateUserDto, UpdateUserResponse, User, UserRole, UserStats, UserSummary,
};
use crate::utils::grading::Grade;
use crate::utils::pagination::PaginationInfo;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::users::controller::register_user,
        crate::modules::users::controller::login_user,
        crate::modules::users::controller::get_all_users,
        crate::modules::users::controller::get_all_admins,
        crate::modules::users::controller::get_all_lecturers,
        crate::modules::users::controller::get_all_students,
        crate::modules::users::controller::search_users,
        crate::modules::users::controller::get_user_stats,
        crate::modules::users::controller::get_user_by_id,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::departments::controller::create_department,
        crate::modules::departments::controller::get_all_departments,
        crate::modules::departments::controller::get_department,
        crate::modules::departments::controller::update_department,
        crate::modules::departments::controller::delete_department,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::get_all_subjects,
        crate::modules::subjects::controller::get_subjects_by_department,
        crate::modules::subjects::controller::get_subjects_by_department_year_semester,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::lessons::controller::create_lesson,
        crate::modules::lessons::controller::get_all_lessons,
        crate::modules::lessons::controller::update_lesson,
        crate::modules::lessons::controller::delete_lesson,
        crate::modules::lessons::controller::increment_lesson_parts,
        crate::modules::lessons::controller::create_lesson_part,
        crate::modules::lessons::controller::get_lesson_parts,
        crate::modules::lessons::controller::update_lesson_part,
        crate::modules::lessons::controller::delete_lesson_part,
        crate::modules::materials::controller::create_material,
        crate::modules::materials::controller::get_all_materials,
        crate::modules::materials::controller::get_materials_by_subject,
        crate::modules::materials::controller::update_material,
        crate::modules::materials::controller::delete_material,
        crate::modules::marks::controller::upsert_marks,
        crate::modules::marks::controller::get_all_marks,
        crate::modules::marks::controller::get_marks_by_student,
        crate::modules::marks::controller::get_marks_by_subject,
        crate::modules::marks::controller::get_marks_statistics,
        crate::modules::marks::controller::delete_marks,
        crate::modules::news::controller::create_news,
        crate::modules::news::controller::get_all_news,
        crate::modules::news::controller::get_news_by_title,
        crate::modules::news::controller::update_news,
        crate::modules::news::controller::delete_news,
        crate::modules::notifications::controller::send_notification,
        crate::modules::notifications::controller::get_inbox,
        crate::modules::notifications::controller::get_sent,
        crate::modules::notifications::controller::reply_to_notification,
        crate::modules::notifications::controller::mark_notification_read,
        crate::modules::notifications::controller::delete_notification,
        crate::modules::notifications::controller::get_notification_stats,
        crate::modules::notifications::controller::get_recipient_users,
        crate::modules::settings::controller::get_settings,
        crate::modules::settings::controller::update_settings,
        crate::modules::settings::controller::get_system_stats,
        crate::modules::settings::controller::perform_maintenance,
        crate::modules::settings::controller::reset_system_data,
        crate::modules::settings::controller::export_system_data,
        crate::modules::students::controller::get_student_profile,
        crate::modules::students::controller::get_student_subjects,
        crate::modules::students::controller::get_student_lessons,
        crate::modules::students::controller::get_student_materials,
        crate::modules::students::controller::get_student_stats,
        crate::modules::students::controller::get_student_news,
        crate::modules::lecturers::controller::get_lecturer_profile,
        crate::modules::lecturers::controller::get_lecturer_subjects,
        crate::modules::lecturers::controller::get_lecturer_students,
        crate::modules::lecturers::controller::get_lecturer_materials,
        crate::modules::lecturers::controller::get_lecturer_lessons,
        crate::modules::lecturers::controller::get_lecturer_stats,
    ),
    components(
        schemas(
            User,
            UserRole,
            UserSummary,
            RegisterUserDto,
            LoginDto,
            UpdateUserDto,
            MessageResponse,
            LoginResponse,
            RoleListResponse,
            RoleCounts,
            UserStats,
            UpdateUserResponse,
            DeleteUserResponse,
            Department,
            CreateDepartmentDto,
            UpdateDepartmentDto,
            DeleteDepartmentResponse,
            Subject,
            CreateSubjectDto,
            UpdateSubjectDto,
            DeleteSubjectResponse,
            MediaType,
            LessonStatus,
            DepartmentRef,
            SubjectRef,
            Lesson,
            CreateLessonDto,
            UpdateLessonDto,
            Question,
            LessonPart,
            CreateLessonPartDto,
            UpdateLessonPartDto,
            LessonResponse,
            LessonListResponse,
            LessonPartResponse,
            LessonPartListResponse,
            SuccessMessage,
            Material,
            UploaderRef,
            CreateMaterialDto,
            UpdateMaterialDto,
            Grade,
            StudentInfo,
            Mark,
            UpsertMarkDto,
            MarkResponse,
            MarkListResponse,
            StudentMarksStatistics,
            StudentMarksData,
            StudentMarksResponse,
            SubjectMarksStatistics,
            SubjectMarksData,
            SubjectMarksResponse,
            DepartmentWiseStats,
            MarksDashboardStatistics,
            MarksDashboardResponse,
            DeletedMarkRef,
            DeleteMarkResponse,
            NewsStatus,
            News,
            CreateNewsDto,
            UpdateNewsDto,
            NewsResponse,
            SingleNewsResponse,
            NewsListResponse,
            DeletedNewsRef,
            DeleteNewsResponse,
            Priority,
            NotificationKind,
            NotificationStatus,
            Notification,
            SendNotificationDto,
            ReplyDto,
            RecipientUser,
            NotificationResponse,
            NotificationListResponse,
            NotificationAck,
            NotificationStats,
            NotificationStatsResponse,
            RecipientListResponse,
            EmailSettings,
            SecuritySettings,
            FileSettings,
            NotificationSettings,
            AcademicSettings,
            MaintenanceMode,
            BackupSettings,
            ThemeSettings,
            Settings,
            UpdateSettingsDto,
            SettingsResponse,
            UpdateSettingsResponse,
            SystemOverview,
            DepartmentStat,
            MonthlyRegistration,
            RecentActivity,
            SystemStats,
            SystemStatsResponse,
            MaintenanceDto,
            MaintenanceResponse,
            ResetDto,
            ResetResponse,
            ExportData,
            ExportResponse,
            StudentStats,
            LecturerStats,
            PaginationInfo,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration, login and user management"),
        (name = "Departments", description = "Department management"),
        (name = "Subjects", description = "Subject catalog"),
        (name = "Lessons", description = "Lessons and lesson parts"),
        (name = "Materials", description = "Study material uploads"),
        (name = "Marks", description = "Student marks and grading"),
        (name = "News", description = "News publishing"),
        (name = "Notifications", description = "In-app messaging"),
        (name = "Settings", description = "System settings and administration"),
        (name = "Students", description = "Student dashboard"),
        (name = "Lecturers", description = "Lecturer dashboard")
    ),
    info(
        title = "Lectern API",
        version = "0.1.0",
        description = "REST backend for a learning-management system built with Rust, Axum, and PostgreSQL with JWT-based authentication."
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
