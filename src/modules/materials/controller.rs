use axum::{Json, extract::Path, extract::Query, extract::State, http::StatusCode};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    CreateMaterialDto, Material, MaterialFilterParams, MessageResponse, UpdateMaterialDto,
};
use super::service::MaterialService;

#[utoipa::path(
    post,
    path = "/api/materials",
    request_body = CreateMaterialDto,
    responses(
        (status = 201, description = "Material created", body = Material),
        (status = 400, description = "Missing fields or duplicate path"),
        (status = 404, description = "Subject not found")
    ),
    tag = "Materials",
    security(("bearer_auth" = []))
)]
pub async fn create_material(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateMaterialDto>,
) -> Result<(StatusCode, Json<Material>), AppError> {
    let material = MaterialService::create(&state.db, dto, auth_user.user_id()).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

#[utoipa::path(
    get,
    path = "/api/materials",
    params(MaterialFilterParams),
    responses((status = 200, description = "Materials with subject and uploader expanded", body = [Material])),
    tag = "Materials",
    security(("bearer_auth" = []))
)]
pub async fn get_all_materials(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<MaterialFilterParams>,
) -> Result<Json<Vec<Material>>, AppError> {
    Ok(Json(
        MaterialService::get_all(&state.db, filters.subject).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/materials/subject/{subjectId}",
    params(("subjectId" = Uuid, Path, description = "Subject id")),
    responses(
        (status = 200, description = "Materials of the subject", body = [Material]),
        (status = 404, description = "No materials found for this subject")
    ),
    tag = "Materials",
    security(("bearer_auth" = []))
)]
pub async fn get_materials_by_subject(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(subject_id): Path<Uuid>,
) -> Result<Json<Vec<Material>>, AppError> {
    Ok(Json(
        MaterialService::get_by_subject(&state.db, subject_id).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/materials/{id}",
    params(("id" = Uuid, Path, description = "Material id")),
    request_body = UpdateMaterialDto,
    responses(
        (status = 200, description = "Material renamed", body = Material),
        (status = 403, description = "Neither admin nor uploader"),
        (status = 404, description = "Material not found")
    ),
    tag = "Materials",
    security(("bearer_auth" = []))
)]
pub async fn update_material(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateMaterialDto>,
) -> Result<Json<Material>, AppError> {
    let material = MaterialService::update(
        &state.db,
        id,
        dto,
        auth_user.user_id(),
        auth_user.is_admin(),
    )
    .await?;
    Ok(Json(material))
}

#[utoipa::path(
    delete,
    path = "/api/materials/{id}",
    params(("id" = Uuid, Path, description = "Material id")),
    responses(
        (status = 200, description = "Material deleted", body = MessageResponse),
        (status = 403, description = "Neither admin nor uploader"),
        (status = 404, description = "Material not found")
    ),
    tag = "Materials",
    security(("bearer_auth" = []))
)]
pub async fn delete_material(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    MaterialService::delete(&state.db, id, auth_user.user_id(), auth_user.is_admin()).await?;
    Ok(Json(MessageResponse {
        message: "Material deleted successfully".to_string(),
    }))
}
