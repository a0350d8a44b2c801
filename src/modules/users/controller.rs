use axum::{Json, extract::Path, extract::Query, extract::State};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::validator::ValidatedJson;

use super::model::{
    DeleteUserResponse, LoginDto, LoginResponse, MessageResponse, RegisterUserDto,
    RoleListResponse, SearchUsersParams, UpdateUserDto, UpdateUserResponse, User, UserRole,
    UserStats, UserSummary,
};
use super::service::UserService;

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterUserDto,
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Duplicate userId/email or missing department")
    ),
    tag = "Users"
)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterUserDto>,
) -> Result<(axum::http::StatusCode, Json<MessageResponse>), AppError> {
    UserService::register(&state.db, dto).await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Unknown email or invalid password")
    ),
    tag = "Users"
)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginDto>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = UserService::login(&state.db, &dto.email, &dto.password).await?;
    let token = create_access_token(&user, &state.jwt_config)?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: UserSummary::from(&user),
    }))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses((status = 200, description = "All users", body = [User])),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn get_all_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(UserService::get_all(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/users/admins",
    responses((status = 200, description = "Admin users", body = RoleListResponse)),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn get_all_admins(
    State(state): State<AppState>,
) -> Result<Json<RoleListResponse>, AppError> {
    let data = UserService::get_by_role(&state.db, UserRole::Admin).await?;
    Ok(Json(RoleListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/users/lecturers",
    responses((status = 200, description = "Lecturer users", body = RoleListResponse)),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn get_all_lecturers(
    State(state): State<AppState>,
) -> Result<Json<RoleListResponse>, AppError> {
    let data = UserService::get_by_role(&state.db, UserRole::Lecturer).await?;
    Ok(Json(RoleListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/users/students",
    responses((status = 200, description = "Student users", body = RoleListResponse)),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn get_all_students(
    State(state): State<AppState>,
) -> Result<Json<RoleListResponse>, AppError> {
    let data = UserService::get_by_role(&state.db, UserRole::Student).await?;
    Ok(Json(RoleListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/users/search",
    params(SearchUsersParams),
    responses((status = 200, description = "Matching users", body = [User])),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchUsersParams>,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(UserService::search(&state.db, params).await?))
}

#[utoipa::path(
    get,
    path = "/api/users/stats",
    responses((status = 200, description = "User statistics", body = UserStats)),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn get_user_stats(State(state): State<AppState>) -> Result<Json<UserStats>, AppError> {
    Ok(Json(UserService::get_stats(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/users/{userId}",
    params(("userId" = String, Path, description = "Business user id")),
    responses(
        (status = 200, description = "User document", body = User),
        (status = 403, description = "Not self and not admin"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<User>, AppError> {
    auth_user.ensure_self_or_admin(&user_id)?;
    Ok(Json(UserService::get_by_user_id(&state.db, &user_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/users/{userId}",
    params(("userId" = String, Path, description = "Business user id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UpdateUserResponse),
        (status = 403, description = "Not self and not admin, or role change by non-admin"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(user_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<UpdateUserResponse>, AppError> {
    auth_user.ensure_self_or_admin(&user_id)?;

    let user = UserService::update(&state.db, &user_id, dto, auth_user.is_admin()).await?;
    Ok(Json(UpdateUserResponse {
        message: "User updated successfully".to_string(),
        user: UserSummary::from(&user),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/users/{userId}",
    params(("userId" = String, Path, description = "Business user id")),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponse),
        (status = 400, description = "Self-deletion attempt"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<DeleteUserResponse>, AppError> {
    let user = UserService::delete(&state.db, &user_id, auth_user.user_id()).await?;
    Ok(Json(DeleteUserResponse {
        success: true,
        message: "User deleted successfully".to_string(),
        deleted_user: UserSummary::from(&user),
    }))
}
