use axum::{Json, extract::Path, extract::State};

use crate::middleware::auth::AuthUser;
use crate::modules::lessons::model::Lesson;
use crate::modules::materials::model::Material;
use crate::modules::subjects::model::Subject;
use crate::modules::users::model::User;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::LecturerStats;
use super::service::LecturerService;

#[utoipa::path(
    get,
    path = "/api/lecturers/profile/{lecturerId}",
    params(("lecturerId" = String, Path, description = "Business user id")),
    responses(
        (status = 200, description = "Lecturer profile", body = User),
        (status = 404, description = "Lecturer not found")
    ),
    tag = "Lecturers",
    security(("bearer_auth" = []))
)]
pub async fn get_lecturer_profile(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(lecturer_id): Path<String>,
) -> Result<Json<User>, AppError> {
    Ok(Json(
        LecturerService::get_profile(&state.db, &lecturer_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/lecturers/subjects/{lecturerId}",
    params(("lecturerId" = String, Path, description = "Business user id")),
    responses((status = 200, description = "Subjects assigned to the lecturer", body = [Subject])),
    tag = "Lecturers",
    security(("bearer_auth" = []))
)]
pub async fn get_lecturer_subjects(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(lecturer_id): Path<String>,
) -> Result<Json<Vec<Subject>>, AppError> {
    Ok(Json(
        LecturerService::get_subjects(&state.db, &lecturer_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/lecturers/students/{lecturerId}",
    params(("lecturerId" = String, Path, description = "Business user id")),
    responses(
        (status = 200, description = "Students of the lecturer's department", body = [User]),
        (status = 404, description = "Lecturer not found")
    ),
    tag = "Lecturers",
    security(("bearer_auth" = []))
)]
pub async fn get_lecturer_students(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(lecturer_id): Path<String>,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(
        LecturerService::get_students(&state.db, &lecturer_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/lecturers/materials/{lecturerId}",
    params(("lecturerId" = String, Path, description = "Business user id")),
    responses((status = 200, description = "Materials of the lecturer's subjects", body = [Material])),
    tag = "Lecturers",
    security(("bearer_auth" = []))
)]
pub async fn get_lecturer_materials(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(lecturer_id): Path<String>,
) -> Result<Json<Vec<Material>>, AppError> {
    Ok(Json(
        LecturerService::get_materials(&state.db, &lecturer_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/lecturers/lessons/{lecturerId}",
    params(("lecturerId" = String, Path, description = "Business user id")),
    responses(
        (status = 200, description = "Lessons authored by the lecturer", body = [Lesson]),
        (status = 404, description = "Lecturer not found")
    ),
    tag = "Lecturers",
    security(("bearer_auth" = []))
)]
pub async fn get_lecturer_lessons(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(lecturer_id): Path<String>,
) -> Result<Json<Vec<Lesson>>, AppError> {
    Ok(Json(
        LecturerService::get_lessons(&state.db, &lecturer_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/lecturers/stats/{lecturerId}",
    params(("lecturerId" = String, Path, description = "Business user id")),
    responses(
        (status = 200, description = "Dashboard counters for the lecturer", body = LecturerStats),
        (status = 404, description = "Lecturer not found")
    ),
    tag = "Lecturers",
    security(("bearer_auth" = []))
)]
pub async fn get_lecturer_stats(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(lecturer_id): Path<String>,
) -> Result<Json<LecturerStats>, AppError> {
    Ok(Json(
        LecturerService::get_stats(&state.db, &lecturer_id).await?,
    ))
}
