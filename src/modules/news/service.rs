use sqlx::PgPool;
use tracing::{info, instrument};

use crate::utils::errors::AppError;
use crate::utils::pagination::{PageParams, PaginationInfo};

use super::model::{
    CreateNewsDto, DeletedNewsRef, News, NewsFilterParams, NewsStatus, UpdateNewsDto,
};

const NEWS_COLUMNS: &str =
    "id, title, description, image_url, image_path, author, status, created_at, updated_at";

pub struct NewsService;

impl NewsService {
    #[instrument(skip(db, dto), fields(news.title = %dto.title))]
    pub async fn create(db: &PgPool, dto: CreateNewsDto, author: &str) -> Result<News, AppError> {
        let duplicate = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM news WHERE LOWER(title) = LOWER($1)",
        )
        .bind(dto.title.trim())
        .fetch_one(db)
        .await?;
        if duplicate > 0 {
            return Err(AppError::bad_request("News with this title already exists"));
        }

        let news = sqlx::query_as::<_, News>(&format!(
            "INSERT INTO news (title, description, image_url, image_path, author, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {NEWS_COLUMNS}"
        ))
        .bind(dto.title.trim())
        .bind(&dto.description)
        .bind(dto.image_url.unwrap_or_default())
        .bind(dto.image_path.unwrap_or_default())
        .bind(author)
        .bind(dto.status.unwrap_or(NewsStatus::Published))
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_db(e, "News with this title already exists"))?;

        info!(news.id = %news.id, "News created");
        Ok(news)
    }

    pub async fn get_all(
        db: &PgPool,
        filters: NewsFilterParams,
    ) -> Result<(Vec<News>, PaginationInfo), AppError> {
        let order = match filters.sort_by.as_deref() {
            Some("title") => "title ASC",
            Some("oldest") => "created_at ASC",
            _ => "created_at DESC",
        };

        let page = PageParams {
            page: filters.page,
            limit: filters.limit,
        };
        let limit = page.limit_or(10);
        let offset = page.offset(limit);

        let (total, rows) = match filters.status {
            Some(status) => {
                let total =
                    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM news WHERE status = $1")
                        .bind(status)
                        .fetch_one(db)
                        .await?;
                let rows = sqlx::query_as::<_, News>(&format!(
                    "SELECT {NEWS_COLUMNS} FROM news WHERE status = $1
                     ORDER BY {order} LIMIT $2 OFFSET $3"
                ))
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(db)
                .await?;
                (total, rows)
            }
            None => {
                let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM news")
                    .fetch_one(db)
                    .await?;
                let rows = sqlx::query_as::<_, News>(&format!(
                    "SELECT {NEWS_COLUMNS} FROM news ORDER BY {order} LIMIT $1 OFFSET $2"
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(db)
                .await?;
                (total, rows)
            }
        };

        Ok((rows, PaginationInfo::new(page.page(), limit, total)))
    }

    pub async fn get_by_title(db: &PgPool, title: &str) -> Result<News, AppError> {
        sqlx::query_as::<_, News>(&format!(
            "SELECT {NEWS_COLUMNS} FROM news WHERE LOWER(title) = LOWER($1)"
        ))
        .bind(title)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("News not found"))
    }

    #[instrument(skip(db, dto), fields(news.title = %title))]
    pub async fn update(db: &PgPool, title: &str, dto: UpdateNewsDto) -> Result<News, AppError> {
        let current = Self::get_by_title(db, title).await?;

        if let Some(new_title) = dto.title.as_deref()
            && !new_title.eq_ignore_ascii_case(&current.title)
        {
            let duplicate = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM news WHERE LOWER(title) = LOWER($1)",
            )
            .bind(new_title)
            .fetch_one(db)
            .await?;
            if duplicate > 0 {
                return Err(AppError::bad_request("News with this title already exists"));
            }
        }

        let news = sqlx::query_as::<_, News>(&format!(
            "UPDATE news SET
                 title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 image_url = COALESCE($4, image_url),
                 image_path = COALESCE($5, image_path),
                 status = COALESCE($6, status),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {NEWS_COLUMNS}"
        ))
        .bind(current.id)
        .bind(dto.title.as_deref().map(str::trim))
        .bind(&dto.description)
        .bind(&dto.image_url)
        .bind(&dto.image_path)
        .bind(dto.status)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_db(e, "News with this title already exists"))?;

        info!(news.id = %news.id, "News updated");
        Ok(news)
    }

    #[instrument(skip(db), fields(news.title = %title))]
    pub async fn delete(db: &PgPool, title: &str) -> Result<DeletedNewsRef, AppError> {
        let deleted = sqlx::query_as::<_, (uuid::Uuid, String, String)>(
            "DELETE FROM news WHERE LOWER(title) = LOWER($1)
             RETURNING id, title, image_path",
        )
        .bind(title)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("News not found"))?;

        info!(news.id = %deleted.0, "News deleted");
        Ok(DeletedNewsRef {
            id: deleted.0,
            title: deleted.1,
            image_path: deleted.2,
        })
    }
}
