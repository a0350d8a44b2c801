use axum::{Json, extract::Path, extract::Query, extract::State, http::StatusCode};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    CreateLessonDto, CreateLessonPartDto, LessonFilterParams, LessonListResponse,
    LessonPartListResponse, LessonPartResponse, LessonResponse, SuccessMessage, UpdateLessonDto,
    UpdateLessonPartDto,
};
use super::service::{LessonPartService, LessonService};

#[utoipa::path(
    post,
    path = "/api/lessons",
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson created", body = LessonResponse),
        (status = 404, description = "Department or subject not found")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
pub async fn create_lesson(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateLessonDto>,
) -> Result<(StatusCode, Json<LessonResponse>), AppError> {
    let author = auth_user.0.full_name();
    let lesson = LessonService::create(&state.db, dto, &author).await?;
    Ok((
        StatusCode::CREATED,
        Json(LessonResponse {
            success: true,
            message: "Lesson created successfully".to_string(),
            data: lesson,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/lessons",
    params(LessonFilterParams),
    responses((status = 200, description = "Lessons, newest first", body = LessonListResponse)),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
pub async fn get_all_lessons(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<LessonFilterParams>,
) -> Result<Json<LessonListResponse>, AppError> {
    let data = LessonService::get_all(&state.db, filters).await?;
    Ok(Json(LessonListResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    put,
    path = "/api/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson id")),
    request_body = UpdateLessonDto,
    responses(
        (status = 200, description = "Lesson updated", body = LessonResponse),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
pub async fn update_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateLessonDto>,
) -> Result<Json<LessonResponse>, AppError> {
    let lesson = LessonService::update(&state.db, id, dto).await?;
    Ok(Json(LessonResponse {
        success: true,
        message: "Lesson updated successfully".to_string(),
        data: lesson,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson id")),
    responses(
        (status = 200, description = "Lesson and its parts deleted", body = SuccessMessage),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
pub async fn delete_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessMessage>, AppError> {
    LessonService::delete(&state.db, id).await?;
    Ok(Json(SuccessMessage {
        success: true,
        message: "Lesson deleted successfully".to_string(),
    }))
}

#[utoipa::path(
    put,
    path = "/api/lessons/{id}/increment-parts",
    params(("id" = Uuid, Path, description = "Lesson id")),
    responses(
        (status = 200, description = "Part counter incremented; publishes when complete", body = LessonResponse),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
pub async fn increment_lesson_parts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LessonResponse>, AppError> {
    let lesson = LessonService::increment_parts(&state.db, id).await?;
    Ok(Json(LessonResponse {
        success: true,
        message: "Lesson part count updated".to_string(),
        data: lesson,
    }))
}

#[utoipa::path(
    post,
    path = "/api/lesson-parts",
    request_body = CreateLessonPartDto,
    responses(
        (status = 201, description = "Lesson part created", body = LessonPartResponse),
        (status = 400, description = "Duplicate part number for the lesson"),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Lesson Parts",
    security(("bearer_auth" = []))
)]
pub async fn create_lesson_part(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateLessonPartDto>,
) -> Result<(StatusCode, Json<LessonPartResponse>), AppError> {
    let part = LessonPartService::create(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(LessonPartResponse {
            success: true,
            message: "Lesson part created successfully".to_string(),
            data: part,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/lesson-parts/{lessonId}",
    params(("lessonId" = Uuid, Path, description = "Lesson id")),
    responses((status = 200, description = "Parts ordered by part number", body = LessonPartListResponse)),
    tag = "Lesson Parts",
    security(("bearer_auth" = []))
)]
pub async fn get_lesson_parts(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(lesson_id): Path<Uuid>,
) -> Result<Json<LessonPartListResponse>, AppError> {
    let data = LessonPartService::get_by_lesson(&state.db, lesson_id).await?;
    Ok(Json(LessonPartListResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    put,
    path = "/api/lesson-parts/{id}",
    params(("id" = Uuid, Path, description = "Lesson part id")),
    request_body = UpdateLessonPartDto,
    responses(
        (status = 200, description = "Lesson part updated", body = LessonPartResponse),
        (status = 404, description = "Lesson part not found")
    ),
    tag = "Lesson Parts",
    security(("bearer_auth" = []))
)]
pub async fn update_lesson_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateLessonPartDto>,
) -> Result<Json<LessonPartResponse>, AppError> {
    let part = LessonPartService::update(&state.db, id, dto).await?;
    Ok(Json(LessonPartResponse {
        success: true,
        message: "Lesson part updated successfully".to_string(),
        data: part,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/lesson-parts/{id}",
    params(("id" = Uuid, Path, description = "Lesson part id")),
    responses(
        (status = 200, description = "Lesson part deleted", body = SuccessMessage),
        (status = 404, description = "Lesson part not found")
    ),
    tag = "Lesson Parts",
    security(("bearer_auth" = []))
)]
pub async fn delete_lesson_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessMessage>, AppError> {
    LessonPartService::delete(&state.db, id).await?;
    Ok(Json(SuccessMessage {
        success: true,
        message: "Lesson part deleted successfully".to_string(),
    }))
}
