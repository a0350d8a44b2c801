use axum::{Json, extract::Path, extract::State};

use crate::middleware::auth::AuthUser;
use crate::modules::lessons::model::Lesson;
use crate::modules::materials::model::Material;
use crate::modules::news::model::News;
use crate::modules::subjects::model::Subject;
use crate::modules::users::model::User;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::StudentStats;
use super::service::StudentService;

#[utoipa::path(
    get,
    path = "/api/students/profile/{userId}",
    params(("userId" = String, Path, description = "Business user id")),
    responses(
        (status = 200, description = "Student profile", body = User),
        (status = 403, description = "Not the student or an admin"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn get_student_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<User>, AppError> {
    auth_user.ensure_self_or_admin(&user_id)?;
    Ok(Json(StudentService::get_profile(&state.db, &user_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/students/subjects/{userId}",
    params(("userId" = String, Path, description = "Business user id")),
    responses((status = 200, description = "Subjects of the student's department", body = [Subject])),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn get_student_subjects(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Subject>>, AppError> {
    auth_user.ensure_self_or_admin(&user_id)?;
    Ok(Json(
        StudentService::get_subjects(&state.db, &user_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/students/lessons/{userId}",
    params(("userId" = String, Path, description = "Business user id")),
    responses((status = 200, description = "Newest published lessons of the department", body = [Lesson])),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn get_student_lessons(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Lesson>>, AppError> {
    auth_user.ensure_self_or_admin(&user_id)?;
    Ok(Json(
        StudentService::get_lessons(&state.db, &user_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/students/materials/{userId}",
    params(("userId" = String, Path, description = "Business user id")),
    responses((status = 200, description = "Newest materials of the department's subjects", body = [Material])),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn get_student_materials(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Material>>, AppError> {
    auth_user.ensure_self_or_admin(&user_id)?;
    Ok(Json(
        StudentService::get_materials(&state.db, &user_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/students/stats/{userId}",
    params(("userId" = String, Path, description = "Business user id")),
    responses((status = 200, description = "Dashboard counters for the student", body = StudentStats)),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn get_student_stats(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<StudentStats>, AppError> {
    auth_user.ensure_self_or_admin(&user_id)?;
    Ok(Json(StudentService::get_stats(&state.db, &user_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/students/news/{userId}",
    params(("userId" = String, Path, description = "Business user id")),
    responses((status = 200, description = "Five newest published news", body = [News])),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn get_student_news(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<News>>, AppError> {
    auth_user.ensure_self_or_admin(&user_id)?;
    Ok(Json(StudentService::get_news(&state.db).await?))
}
