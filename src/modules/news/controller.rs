use axum::{Json, extract::Path, extract::Query, extract::State, http::StatusCode};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    CreateNewsDto, DeleteNewsResponse, NewsFilterParams, NewsListResponse, NewsResponse,
    SingleNewsResponse, UpdateNewsDto,
};
use super::service::NewsService;

#[utoipa::path(
    post,
    path = "/api/news",
    request_body = CreateNewsDto,
    responses(
        (status = 201, description = "News created", body = NewsResponse),
        (status = 400, description = "Missing fields or duplicate title")
    ),
    tag = "News",
    security(("bearer_auth" = []))
)]
pub async fn create_news(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateNewsDto>,
) -> Result<(StatusCode, Json<NewsResponse>), AppError> {
    let news = NewsService::create(&state.db, dto, &auth_user.0.full_name()).await?;
    Ok((
        StatusCode::CREATED,
        Json(NewsResponse {
            success: true,
            message: "News created successfully".to_string(),
            data: news,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/news",
    params(NewsFilterParams),
    responses((status = 200, description = "Paginated news", body = NewsListResponse)),
    tag = "News",
    security(("bearer_auth" = []))
)]
pub async fn get_all_news(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<NewsFilterParams>,
) -> Result<Json<NewsListResponse>, AppError> {
    let (data, pagination) = NewsService::get_all(&state.db, filters).await?;
    Ok(Json(NewsListResponse {
        success: true,
        data,
        pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/api/news/{title}",
    params(("title" = String, Path, description = "News title, matched case-insensitively")),
    responses(
        (status = 200, description = "The article", body = SingleNewsResponse),
        (status = 404, description = "News not found")
    ),
    tag = "News",
    security(("bearer_auth" = []))
)]
pub async fn get_news_by_title(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(title): Path<String>,
) -> Result<Json<SingleNewsResponse>, AppError> {
    let news = NewsService::get_by_title(&state.db, &title).await?;
    Ok(Json(SingleNewsResponse {
        success: true,
        data: news,
    }))
}

#[utoipa::path(
    put,
    path = "/api/news/{title}",
    params(("title" = String, Path, description = "News title, matched case-insensitively")),
    request_body = UpdateNewsDto,
    responses(
        (status = 200, description = "News updated", body = NewsResponse),
        (status = 400, description = "New title already taken"),
        (status = 404, description = "News not found")
    ),
    tag = "News",
    security(("bearer_auth" = []))
)]
pub async fn update_news(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(title): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateNewsDto>,
) -> Result<Json<NewsResponse>, AppError> {
    let news = NewsService::update(&state.db, &title, dto).await?;
    Ok(Json(NewsResponse {
        success: true,
        message: "News updated successfully".to_string(),
        data: news,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/news/{title}",
    params(("title" = String, Path, description = "News title, matched case-insensitively")),
    responses(
        (status = 200, description = "News deleted", body = DeleteNewsResponse),
        (status = 404, description = "News not found")
    ),
    tag = "News",
    security(("bearer_auth" = []))
)]
pub async fn delete_news(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(title): Path<String>,
) -> Result<Json<DeleteNewsResponse>, AppError> {
    let deleted_news = NewsService::delete(&state.db, &title).await?;
    Ok(Json(DeleteNewsResponse {
        success: true,
        message: "News deleted successfully".to_string(),
        deleted_news,
    }))
}
