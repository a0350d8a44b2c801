use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateMaterialDto, Material, MaterialRow, UpdateMaterialDto};

pub(crate) const MATERIAL_SELECT: &str = "SELECT m.id, m.name, m.path, m.url, m.material_type, m.subject, \
     m.size, m.created_at, m.updated_at, \
     s.subject_code AS subj_code, s.subject_name AS subj_name, \
     u.user_id AS uploader_user_id, u.first_name AS uploader_first_name, \
     u.last_name AS uploader_last_name \
     FROM materials m \
     JOIN subjects s ON s.id = m.subject \
     LEFT JOIN users u ON u.id = m.uploaded_by";

pub struct MaterialService;

impl MaterialService {
    #[instrument(skip(db, dto), fields(material.name = %dto.name))]
    pub async fn create(
        db: &PgPool,
        dto: CreateMaterialDto,
        uploader_user_id: &str,
    ) -> Result<Material, AppError> {
        let subject_exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subjects WHERE id = $1")
                .bind(dto.subject)
                .fetch_one(db)
                .await?;
        if subject_exists == 0 {
            return Err(AppError::not_found("Subject not found"));
        }

        let uploader_id =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE user_id = $1")
                .bind(uploader_user_id)
                .fetch_optional(db)
                .await?;

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO materials (name, path, url, material_type, subject, uploaded_by, size)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(dto.name.trim())
        .bind(&dto.path)
        .bind(&dto.url)
        .bind(&dto.material_type)
        .bind(dto.subject)
        .bind(uploader_id)
        .bind(dto.size)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_db(e, "Material with this path already exists"))?;

        info!(material.id = %id, "Material created");
        Self::get_by_id(db, id).await
    }

    pub async fn get_by_id(db: &PgPool, id: Uuid) -> Result<Material, AppError> {
        sqlx::query_as::<_, MaterialRow>(&format!("{MATERIAL_SELECT} WHERE m.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .map(Material::from)
            .ok_or_else(|| AppError::not_found("Material not found"))
    }

    pub async fn get_all(db: &PgPool, subject: Option<Uuid>) -> Result<Vec<Material>, AppError> {
        let rows = match subject {
            Some(subject) => {
                sqlx::query_as::<_, MaterialRow>(&format!(
                    "{MATERIAL_SELECT} WHERE m.subject = $1 ORDER BY m.created_at DESC"
                ))
                .bind(subject)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, MaterialRow>(&format!(
                    "{MATERIAL_SELECT} ORDER BY m.created_at DESC"
                ))
                .fetch_all(db)
                .await?
            }
        };
        Ok(rows.into_iter().map(Material::from).collect())
    }

    /// 404s when the subject has no materials, matching the observed
    /// behavior of the by-subject listing.
    pub async fn get_by_subject(db: &PgPool, subject: Uuid) -> Result<Vec<Material>, AppError> {
        let materials = Self::get_all(db, Some(subject)).await?;
        if materials.is_empty() {
            return Err(AppError::not_found("No materials found for this subject"));
        }
        Ok(materials)
    }

    #[instrument(skip(db, dto), fields(material.id = %id))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateMaterialDto,
        caller_user_id: &str,
        caller_is_admin: bool,
    ) -> Result<Material, AppError> {
        let material = Self::get_by_id(db, id).await?;
        Self::ensure_admin_or_uploader(&material, caller_user_id, caller_is_admin)?;

        sqlx::query("UPDATE materials SET name = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(dto.name.trim())
            .execute(db)
            .await?;

        info!(material.id = %id, "Material renamed");
        Self::get_by_id(db, id).await
    }

    #[instrument(skip(db), fields(material.id = %id))]
    pub async fn delete(
        db: &PgPool,
        id: Uuid,
        caller_user_id: &str,
        caller_is_admin: bool,
    ) -> Result<(), AppError> {
        let material = Self::get_by_id(db, id).await?;
        Self::ensure_admin_or_uploader(&material, caller_user_id, caller_is_admin)?;

        sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        info!(material.id = %id, "Material deleted");
        Ok(())
    }

    fn ensure_admin_or_uploader(
        material: &Material,
        caller_user_id: &str,
        caller_is_admin: bool,
    ) -> Result<(), AppError> {
        let is_uploader = material
            .uploaded_by
            .as_ref()
            .is_some_and(|u| u.user_id == caller_user_id);

        if caller_is_admin || is_uploader {
            Ok(())
        } else {
            Err(AppError::forbidden("Access denied"))
        }
    }
}
