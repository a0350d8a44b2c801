use axum::{Json, extract::Query, extract::State};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    ExportParams, ExportResponse, MaintenanceDto, MaintenanceResponse, ResetDto, ResetResponse,
    SettingsResponse, SystemStatsResponse, UpdateSettingsDto, UpdateSettingsResponse,
};
use super::service::{RESET_CONFIRMATION_CODE, SettingsService};

#[utoipa::path(
    get,
    path = "/api/settings",
    responses((status = 200, description = "System settings, created on first read", body = SettingsResponse)),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
pub async fn get_settings(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<SettingsResponse>, AppError> {
    let data = SettingsService::get_or_create(&state.db).await?;
    Ok(Json(SettingsResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = UpdateSettingsDto,
    responses((status = 200, description = "Settings updated", body = UpdateSettingsResponse)),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
pub async fn update_settings(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateSettingsDto>,
) -> Result<Json<UpdateSettingsResponse>, AppError> {
    let data = SettingsService::update(&state.db, dto, auth_user.user_id()).await?;
    Ok(Json(UpdateSettingsResponse {
        success: true,
        message: "Settings updated successfully".to_string(),
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/settings/stats",
    responses((status = 200, description = "System dashboard statistics", body = SystemStatsResponse)),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
pub async fn get_system_stats(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<SystemStatsResponse>, AppError> {
    let data = SettingsService::system_stats(&state.db).await?;
    Ok(Json(SystemStatsResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    post,
    path = "/api/settings/maintenance",
    request_body = MaintenanceDto,
    responses(
        (status = 200, description = "Operation completed", body = MaintenanceResponse),
        (status = 400, description = "Invalid maintenance operation")
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
pub async fn perform_maintenance(
    State(_state): State<AppState>,
    _auth_user: AuthUser,
    Json(dto): Json<MaintenanceDto>,
) -> Result<Json<MaintenanceResponse>, AppError> {
    let message = SettingsService::perform_maintenance(&dto.operation).await?;
    Ok(Json(MaintenanceResponse {
        success: true,
        message,
    }))
}

#[utoipa::path(
    post,
    path = "/api/settings/reset",
    request_body = ResetDto,
    responses(
        (status = 200, description = "Data reset", body = ResetResponse),
        (status = 400, description = "Wrong confirmation code or data type")
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
pub async fn reset_system_data(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(dto): Json<ResetDto>,
) -> Result<Json<ResetResponse>, AppError> {
    if dto.confirmation_code != RESET_CONFIRMATION_CODE {
        return Err(AppError::bad_request("Invalid confirmation code"));
    }
    let deleted_count = SettingsService::reset_data(&state.db, &dto.data_type).await?;
    Ok(Json(ResetResponse {
        success: true,
        message: format!("{} data reset completed", dto.data_type),
        deleted_count,
    }))
}

#[utoipa::path(
    get,
    path = "/api/settings/export",
    params(ExportParams),
    responses(
        (status = 200, description = "Requested data sets", body = ExportResponse),
        (status = 400, description = "Invalid data type for export")
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
pub async fn export_system_data(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<ExportParams>,
) -> Result<Json<ExportResponse>, AppError> {
    let data_type = params.data_type.unwrap_or_default();
    let data = SettingsService::export_data(&state.db, &data_type).await?;
    Ok(Json(ExportResponse {
        success: true,
        data,
        exported_at: chrono::Utc::now(),
        exported_by: auth_user.user_id().to_string(),
    }))
}
