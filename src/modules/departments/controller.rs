use axum::{Json, extract::Path, extract::State, http::StatusCode};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    CreateDepartmentDto, DeleteDepartmentResponse, Department, UpdateDepartmentDto,
};
use super::service::DepartmentService;

#[utoipa::path(
    post,
    path = "/api/departments",
    request_body = CreateDepartmentDto,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 400, description = "Duplicate code or name (case-insensitive)")
    ),
    tag = "Departments",
    security(("bearer_auth" = []))
)]
pub async fn create_department(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateDepartmentDto>,
) -> Result<(StatusCode, Json<Department>), AppError> {
    let department = DepartmentService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

#[utoipa::path(
    get,
    path = "/api/departments",
    responses((status = 200, description = "All departments, newest first", body = [Department])),
    tag = "Departments",
    security(("bearer_auth" = []))
)]
pub async fn get_all_departments(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Department>>, AppError> {
    Ok(Json(DepartmentService::get_all(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/departments/{departmentId}",
    params(("departmentId" = String, Path, description = "Department code")),
    responses(
        (status = 200, description = "Department document", body = Department),
        (status = 404, description = "Department not found")
    ),
    tag = "Departments",
    security(("bearer_auth" = []))
)]
pub async fn get_department(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(department_id): Path<String>,
) -> Result<Json<Department>, AppError> {
    Ok(Json(
        DepartmentService::get_by_code(&state.db, &department_id).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/departments/{departmentId}",
    params(("departmentId" = String, Path, description = "Department code")),
    request_body = UpdateDepartmentDto,
    responses(
        (status = 200, description = "Department updated", body = Department),
        (status = 400, description = "Name already used by another department"),
        (status = 404, description = "Department not found")
    ),
    tag = "Departments",
    security(("bearer_auth" = []))
)]
pub async fn update_department(
    State(state): State<AppState>,
    Path(department_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateDepartmentDto>,
) -> Result<Json<Department>, AppError> {
    Ok(Json(
        DepartmentService::update(&state.db, &department_id, dto).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/departments/{departmentId}",
    params(("departmentId" = String, Path, description = "Department code")),
    responses(
        (status = 200, description = "Department and its subjects deleted", body = DeleteDepartmentResponse),
        (status = 404, description = "Department not found")
    ),
    tag = "Departments",
    security(("bearer_auth" = []))
)]
pub async fn delete_department(
    State(state): State<AppState>,
    Path(department_id): Path<String>,
) -> Result<Json<DeleteDepartmentResponse>, AppError> {
    let department = DepartmentService::delete(&state.db, &department_id).await?;
    Ok(Json(DeleteDepartmentResponse {
        message: "Department deleted successfully".to_string(),
        deleted_department: department,
    }))
}
