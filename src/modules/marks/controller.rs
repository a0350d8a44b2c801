use axum::{Json, extract::Path, extract::Query, extract::State, http::StatusCode};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    DeleteMarkResponse, MarkFilterParams, MarkListResponse, MarkResponse, MarkScopeParams,
    MarkStatisticsParams, MarksDashboardResponse, StudentMarksResponse, SubjectMarksResponse,
    UpsertMarkDto,
};
use super::service::MarkService;

#[utoipa::path(
    post,
    path = "/api/marks",
    request_body = UpsertMarkDto,
    responses(
        (status = 201, description = "Marks added or updated", body = MarkResponse),
        (status = 400, description = "Out-of-range marks or wrong department"),
        (status = 404, description = "Student, department or subject not found")
    ),
    tag = "Marks",
    security(("bearer_auth" = []))
)]
pub async fn upsert_marks(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpsertMarkDto>,
) -> Result<(StatusCode, Json<MarkResponse>), AppError> {
    let (mark, updated) = MarkService::upsert(&state.db, dto, auth_user.user_id()).await?;
    let message = if updated {
        "Marks updated successfully"
    } else {
        "Marks added successfully"
    };
    Ok((
        StatusCode::CREATED,
        Json(MarkResponse {
            success: true,
            message: message.to_string(),
            data: mark,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/marks",
    params(MarkFilterParams),
    responses((status = 200, description = "Paginated marks, newest first", body = MarkListResponse)),
    tag = "Marks",
    security(("bearer_auth" = []))
)]
pub async fn get_all_marks(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<MarkFilterParams>,
) -> Result<Json<MarkListResponse>, AppError> {
    let (data, pagination) = MarkService::get_all(&state.db, filters).await?;
    Ok(Json(MarkListResponse {
        success: true,
        data,
        pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/api/marks/student/{studentId}",
    params(
        ("studentId" = String, Path, description = "Business user id of the student"),
        MarkScopeParams
    ),
    responses(
        (status = 200, description = "Marks of one student with statistics", body = StudentMarksResponse),
        (status = 404, description = "Student not found")
    ),
    tag = "Marks",
    security(("bearer_auth" = []))
)]
pub async fn get_marks_by_student(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(student_id): Path<String>,
    Query(scope): Query<MarkScopeParams>,
) -> Result<Json<StudentMarksResponse>, AppError> {
    let data = MarkService::get_by_student(&state.db, &student_id, scope).await?;
    Ok(Json(StudentMarksResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/marks/subject/{subjectId}",
    params(
        ("subjectId" = Uuid, Path, description = "Subject id"),
        MarkScopeParams
    ),
    responses(
        (status = 200, description = "Marks of one subject, highest first", body = SubjectMarksResponse),
        (status = 404, description = "Subject not found")
    ),
    tag = "Marks",
    security(("bearer_auth" = []))
)]
pub async fn get_marks_by_subject(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(subject_id): Path<Uuid>,
    Query(scope): Query<MarkScopeParams>,
) -> Result<Json<SubjectMarksResponse>, AppError> {
    let data = MarkService::get_by_subject(&state.db, subject_id, scope).await?;
    Ok(Json(SubjectMarksResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/marks/statistics",
    params(MarkStatisticsParams),
    responses((status = 200, description = "Marks rollup for the admin dashboard", body = MarksDashboardResponse)),
    tag = "Marks",
    security(("bearer_auth" = []))
)]
pub async fn get_marks_statistics(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<MarkStatisticsParams>,
) -> Result<Json<MarksDashboardResponse>, AppError> {
    let data = MarkService::get_statistics(&state.db, params).await?;
    Ok(Json(MarksDashboardResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/marks/{id}",
    params(("id" = Uuid, Path, description = "Marks record id")),
    responses(
        (status = 200, description = "Marks deleted", body = DeleteMarkResponse),
        (status = 404, description = "Marks record not found")
    ),
    tag = "Marks",
    security(("bearer_auth" = []))
)]
pub async fn delete_marks(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteMarkResponse>, AppError> {
    let deleted_mark = MarkService::delete(&state.db, id).await?;
    Ok(Json(DeleteMarkResponse {
        success: true,
        message: "Marks deleted successfully".to_string(),
        deleted_mark,
    }))
}
