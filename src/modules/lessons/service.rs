use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::modules::departments::service::DepartmentService;
use crate::modules::subjects::service::SubjectService;
use crate::utils::errors::AppError;

use super::model::{
    CreateLessonDto, CreateLessonPartDto, Lesson, LessonFilterParams, LessonPart, LessonRow,
    LessonStatus, Question, UpdateLessonDto, UpdateLessonPartDto,
};

pub(crate) const LESSON_SELECT: &str = "SELECT l.id, l.title, l.description, l.department, l.subject, \
     l.total_parts, l.uploaded_parts, l.media_type, l.status, l.author, \
     l.created_at, l.updated_at, \
     d.department_id AS dept_code, d.name AS dept_name, \
     s.subject_code AS subj_code, s.subject_name AS subj_name \
     FROM lessons l \
     JOIN departments d ON d.id = l.department \
     JOIN subjects s ON s.id = l.subject";

const PART_COLUMNS: &str = "id, lesson_id, part_number, title, file_path, file_url, \
     file_type, file_size, questions, is_locked, created_at, updated_at";

pub struct LessonService;

impl LessonService {
    #[instrument(skip(db, dto), fields(lesson.title = %dto.title))]
    pub async fn create(db: &PgPool, dto: CreateLessonDto, author: &str) -> Result<Lesson, AppError> {
        let department = DepartmentService::get_by_code(db, &dto.department).await?;
        let subject = SubjectService::get_by_code(db, &dto.subject).await?;

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO lessons (title, description, department, subject, total_parts, media_type, author)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(dto.title.trim())
        .bind(&dto.description)
        .bind(department.id)
        .bind(subject.id)
        .bind(dto.total_parts)
        .bind(dto.media_type)
        .bind(author)
        .fetch_one(db)
        .await?;

        info!(lesson.id = %id, "Lesson created");
        Self::get_by_id(db, id).await
    }

    pub async fn get_by_id(db: &PgPool, id: Uuid) -> Result<Lesson, AppError> {
        sqlx::query_as::<_, LessonRow>(&format!("{LESSON_SELECT} WHERE l.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .map(Lesson::from)
            .ok_or_else(|| AppError::not_found("Lesson not found"))
    }

    #[instrument(skip(db, filters))]
    pub async fn get_all(
        db: &PgPool,
        filters: LessonFilterParams,
    ) -> Result<Vec<Lesson>, AppError> {
        let mut sql = format!("{LESSON_SELECT} WHERE 1=1");
        let mut binds = Vec::new();

        if let Some(department) = filters.department.as_deref().filter(|d| !d.is_empty()) {
            binds.push(department.to_uppercase());
            sql.push_str(&format!(" AND d.department_id = ${}", binds.len()));
        }
        if let Some(subject) = filters.subject.as_deref().filter(|s| !s.is_empty()) {
            binds.push(subject.to_uppercase());
            sql.push_str(&format!(" AND s.subject_code = ${}", binds.len()));
        }
        if let Some(status) = filters.status.as_deref().filter(|s| !s.is_empty()) {
            binds.push(status.to_string());
            sql.push_str(&format!(" AND l.status = ${}", binds.len()));
        }

        sql.push_str(" ORDER BY l.created_at DESC");

        let mut query = sqlx::query_as::<_, LessonRow>(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }

        let rows = query.fetch_all(db).await?;
        Ok(rows.into_iter().map(Lesson::from).collect())
    }

    #[instrument(skip(db, dto), fields(lesson.id = %id))]
    pub async fn update(db: &PgPool, id: Uuid, dto: UpdateLessonDto) -> Result<Lesson, AppError> {
        let existing = Self::get_by_id(db, id).await?;

        sqlx::query(
            "UPDATE lessons SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                total_parts = COALESCE($4, total_parts),
                media_type = COALESCE($5, media_type),
                status = COALESCE($6, status),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(existing.id)
        .bind(dto.title.as_deref().map(str::trim))
        .bind(&dto.description)
        .bind(dto.total_parts)
        .bind(dto.media_type)
        .bind(dto.status)
        .execute(db)
        .await?;

        info!(lesson.id = %id, "Lesson updated");
        Self::get_by_id(db, id).await
    }

    /// Parts first, then the lesson, in one transaction.
    #[instrument(skip(db), fields(lesson.id = %id))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let lesson = Self::get_by_id(db, id).await?;

        let mut tx = db.begin().await?;

        let parts_deleted = sqlx::query("DELETE FROM lesson_parts WHERE lesson_id = $1")
            .bind(lesson.id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(lesson.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(lesson.id = %id, parts_deleted = parts_deleted, "Lesson deleted with its parts");
        Ok(())
    }

    /// The row is locked for the read-modify-write so two concurrent
    /// uploads cannot observe a stale count.
    #[instrument(skip(db), fields(lesson.id = %id))]
    pub async fn increment_parts(db: &PgPool, id: Uuid) -> Result<Lesson, AppError> {
        let mut tx = db.begin().await?;

        let row = sqlx::query_as::<_, (i32, i32, LessonStatus)>(
            "SELECT uploaded_parts, total_parts, status FROM lessons WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Lesson not found"))?;

        let (uploaded_parts, status) = apply_part_upload(row.0, row.1, row.2);

        sqlx::query(
            "UPDATE lessons SET uploaded_parts = $2, status = $3, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(uploaded_parts)
        .bind(status)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let lesson = Self::get_by_id(db, id).await?;
        info!(
            lesson.id = %id,
            uploaded_parts = lesson.uploaded_parts,
            status = ?lesson.status,
            "Lesson part count incremented"
        );
        Ok(lesson)
    }
}

pub struct LessonPartService;

impl LessonPartService {
    #[instrument(skip(db, dto), fields(lesson.id = %dto.lesson_id, part = dto.part_number))]
    pub async fn create(db: &PgPool, dto: CreateLessonPartDto) -> Result<LessonPart, AppError> {
        // 404s when the parent lesson is unknown.
        LessonService::get_by_id(db, dto.lesson_id).await?;

        let is_locked = dto.is_locked.unwrap_or_else(|| default_part_lock(dto.part_number));

        let part = sqlx::query_as::<_, LessonPart>(&format!(
            "INSERT INTO lesson_parts
                (lesson_id, part_number, title, file_path, file_url, file_type, file_size, questions, is_locked)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {PART_COLUMNS}"
        ))
        .bind(dto.lesson_id)
        .bind(dto.part_number)
        .bind(dto.title.trim())
        .bind(&dto.file_path)
        .bind(&dto.file_url)
        .bind(&dto.file_type)
        .bind(dto.file_size)
        .bind(Json(dto.questions))
        .bind(is_locked)
        .fetch_one(db)
        .await
        .map_err(|e| {
            AppError::from_db(e, "A part with this number already exists for the lesson")
        })?;

        info!(part.id = %part.id, "Lesson part created");
        Ok(part)
    }

    pub async fn get_by_lesson(db: &PgPool, lesson_id: Uuid) -> Result<Vec<LessonPart>, AppError> {
        let parts = sqlx::query_as::<_, LessonPart>(&format!(
            "SELECT {PART_COLUMNS} FROM lesson_parts WHERE lesson_id = $1 ORDER BY part_number"
        ))
        .bind(lesson_id)
        .fetch_all(db)
        .await?;
        Ok(parts)
    }

    #[instrument(skip(db, dto), fields(part.id = %id))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateLessonPartDto,
    ) -> Result<LessonPart, AppError> {
        let questions: Option<Json<Vec<Question>>> = dto.questions.map(Json);

        let part = sqlx::query_as::<_, LessonPart>(&format!(
            "UPDATE lesson_parts SET
                title = COALESCE($2, title),
                file_path = COALESCE($3, file_path),
                file_url = COALESCE($4, file_url),
                file_type = COALESCE($5, file_type),
                file_size = COALESCE($6, file_size),
                questions = COALESCE($7, questions),
                is_locked = COALESCE($8, is_locked),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {PART_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.title.as_deref().map(str::trim))
        .bind(&dto.file_path)
        .bind(&dto.file_url)
        .bind(&dto.file_type)
        .bind(dto.file_size)
        .bind(questions)
        .bind(dto.is_locked)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Lesson part not found"))?;

        info!(part.id = %id, "Lesson part updated");
        Ok(part)
    }

    #[instrument(skip(db), fields(part.id = %id))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM lesson_parts WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(AppError::not_found("Lesson part not found"));
        }

        info!(part.id = %id, "Lesson part deleted");
        Ok(())
    }
}

/// Publish exactly when the uploaded count reaches the declared total;
/// a lesson never reverts once published.
fn apply_part_upload(
    uploaded_parts: i32,
    total_parts: i32,
    status: LessonStatus,
) -> (i32, LessonStatus) {
    let uploaded = uploaded_parts + 1;
    let status = if uploaded >= total_parts {
        LessonStatus::Published
    } else {
        status
    };
    (uploaded, status)
}

/// Every part after the first starts locked.
fn default_part_lock(part_number: i32) -> bool {
    part_number > 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_below_total_stays_draft() {
        assert_eq!(
            apply_part_upload(0, 3, LessonStatus::Draft),
            (1, LessonStatus::Draft)
        );
        assert_eq!(
            apply_part_upload(1, 3, LessonStatus::Draft),
            (2, LessonStatus::Draft)
        );
    }

    #[test]
    fn upload_reaching_total_publishes() {
        assert_eq!(
            apply_part_upload(2, 3, LessonStatus::Draft),
            (3, LessonStatus::Published)
        );
    }

    #[test]
    fn single_part_lesson_publishes_on_first_upload() {
        assert_eq!(
            apply_part_upload(0, 1, LessonStatus::Draft),
            (1, LessonStatus::Published)
        );
    }

    #[test]
    fn published_lesson_stays_published() {
        assert_eq!(
            apply_part_upload(3, 3, LessonStatus::Published),
            (4, LessonStatus::Published)
        );
    }

    #[test]
    fn only_the_first_part_is_unlocked_by_default() {
        assert!(!default_part_lock(1));
        assert!(default_part_lock(2));
        assert!(default_part_lock(7));
    }
}
