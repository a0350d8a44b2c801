use axum::{Json, extract::Path, extract::Query, extract::State, http::StatusCode};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    CreateSubjectDto, DeleteSubjectResponse, Subject, SubjectFilterParams, UpdateSubjectDto,
};
use super::service::SubjectService;

#[utoipa::path(
    post,
    path = "/api/subjects",
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject created", body = Subject),
        (status = 400, description = "Duplicate subject code or invalid ranges"),
        (status = 404, description = "Department not found")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
pub async fn create_subject(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<(StatusCode, Json<Subject>), AppError> {
    let subject = SubjectService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

#[utoipa::path(
    get,
    path = "/api/subjects",
    params(SubjectFilterParams),
    responses((status = 200, description = "Subjects with department expanded", body = [Subject])),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
pub async fn get_all_subjects(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<SubjectFilterParams>,
) -> Result<Json<Vec<Subject>>, AppError> {
    Ok(Json(SubjectService::get_all(&state.db, filters).await?))
}

#[utoipa::path(
    get,
    path = "/api/subjects/department/{departmentId}",
    params(("departmentId" = String, Path, description = "Department code")),
    responses(
        (status = 200, description = "Subjects of the department", body = [Subject]),
        (status = 404, description = "Department not found")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
pub async fn get_subjects_by_department(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(department_id): Path<String>,
) -> Result<Json<Vec<Subject>>, AppError> {
    Ok(Json(
        SubjectService::get_by_department(&state.db, &department_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/subjects/department/{departmentId}/year/{year}/semester/{semester}",
    params(
        ("departmentId" = String, Path, description = "Department code"),
        ("year" = i32, Path, description = "Year of study"),
        ("semester" = i32, Path, description = "Semester")
    ),
    responses(
        (status = 200, description = "Subjects for the slot", body = [Subject]),
        (status = 404, description = "Department not found")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
pub async fn get_subjects_by_department_year_semester(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path((department_id, year, semester)): Path<(String, i32, i32)>,
) -> Result<Json<Vec<Subject>>, AppError> {
    Ok(Json(
        SubjectService::get_by_department_year_semester(&state.db, &department_id, year, semester)
            .await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/subjects/{subjectCode}",
    params(("subjectCode" = String, Path, description = "Subject code")),
    request_body = UpdateSubjectDto,
    responses(
        (status = 200, description = "Subject updated", body = Subject),
        (status = 404, description = "Subject or target department not found")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
pub async fn update_subject(
    State(state): State<AppState>,
    Path(subject_code): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateSubjectDto>,
) -> Result<Json<Subject>, AppError> {
    Ok(Json(
        SubjectService::update(&state.db, &subject_code, dto).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/subjects/{id}",
    params(("id" = String, Path, description = "Database id or subject code")),
    responses(
        (status = 200, description = "Subject deleted", body = DeleteSubjectResponse),
        (status = 404, description = "Subject not found")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
pub async fn delete_subject(
    State(state): State<AppState>,
    Path(id_or_code): Path<String>,
) -> Result<Json<DeleteSubjectResponse>, AppError> {
    let subject = SubjectService::delete(&state.db, &id_or_code).await?;
    Ok(Json(DeleteSubjectResponse {
        message: "Subject deleted successfully".to_string(),
        deleted_subject: subject,
    }))
}
