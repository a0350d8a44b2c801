use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::jwt::Claims;
use crate::utils::pagination::{PageParams, PaginationInfo};

use super::model::{
    InboxParams, Notification, NotificationKind, NotificationStats, Priority,
    RecipientFilterParams, RecipientUser, ReplyDto, SendNotificationDto,
};

/// `$1` is always the caller's user id so the per-caller read flag can be
/// computed in the same query.
const NOTIFICATION_SELECT: &str = "SELECT n.id, n.title, n.message, n.sender, n.sender_name, \
     n.recipient, n.recipient_type, n.priority, n.kind, n.status, n.parent_id, n.department, \
     n.created_at, n.updated_at, \
     EXISTS(SELECT 1 FROM notification_reads r \
            WHERE r.notification_id = n.id AND r.user_id = $1) AS is_read, \
     n.parent_id IS NOT NULL AS is_reply \
     FROM notifications n";

/// Everything the caller should see in the inbox: direct messages,
/// broadcasts, role fan-out (singular or plural spelling), and the
/// caller's department when addressed as a role.
/// Binds: $1 caller, $2 role, $3 role plural, $4 department.
const INBOX_WHERE: &str = "(n.recipient = $1 OR n.recipient = 'all' \
     OR n.recipient = $2 OR n.recipient = $3 \
     OR (n.recipient = $4 AND n.recipient_type = 'role'))";

pub struct NotificationService;

impl NotificationService {
    #[instrument(skip(db, dto, claims), fields(notification.recipient = %dto.recipient))]
    pub async fn send(
        db: &PgPool,
        dto: SendNotificationDto,
        claims: &Claims,
    ) -> Result<Notification, AppError> {
        let recipient_type = derive_recipient_type(&dto.recipient);

        let department = dto.department.or_else(|| claims.department.clone());

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO notifications
                 (title, message, sender, sender_name, recipient, recipient_type,
                  priority, kind, department)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING id",
        )
        .bind(&dto.title)
        .bind(&dto.message)
        .bind(&claims.sub)
        .bind(claims.full_name())
        .bind(&dto.recipient)
        .bind(recipient_type)
        .bind(dto.priority.unwrap_or(Priority::Medium))
        .bind(dto.kind.unwrap_or(NotificationKind::Message))
        .bind(&department)
        .fetch_one(db)
        .await?;

        info!(notification.id = %id, recipient_type, "Notification sent");
        Self::get_for_user(db, id, &claims.sub).await
    }

    pub async fn get_for_user(
        db: &PgPool,
        id: Uuid,
        user_id: &str,
    ) -> Result<Notification, AppError> {
        sqlx::query_as::<_, Notification>(&format!("{NOTIFICATION_SELECT} WHERE n.id = $2"))
            .bind(user_id)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    /// Inbox listing. Fetched items still in `sent` are flipped to
    /// `delivered` after the page is read.
    pub async fn inbox(
        db: &PgPool,
        claims: &Claims,
        params: InboxParams,
    ) -> Result<(Vec<Notification>, PaginationInfo), AppError> {
        let role_plural = format!("{}s", claims.role);
        let kind_clause = match params.kind {
            Some(_) => " AND n.kind = $5",
            None => "",
        };

        let page = PageParams {
            page: params.page,
            limit: params.limit,
        };
        let limit = page.limit_or(20);
        let offset = page.offset(limit);

        let count_sql =
            format!("SELECT COUNT(*) FROM notifications n WHERE {INBOX_WHERE}{kind_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(&claims.sub)
            .bind(&claims.role)
            .bind(&role_plural)
            .bind(&claims.department);
        if let Some(kind) = params.kind {
            count_query = count_query.bind(kind);
        }
        let total = count_query.fetch_one(db).await?;

        let (limit_n, offset_n) = match params.kind {
            Some(_) => (6, 7),
            None => (5, 6),
        };
        let list_sql = format!(
            "{NOTIFICATION_SELECT} WHERE {INBOX_WHERE}{kind_clause} \
             ORDER BY n.created_at DESC LIMIT ${limit_n} OFFSET ${offset_n}"
        );
        let mut list_query = sqlx::query_as::<_, Notification>(&list_sql)
            .bind(&claims.sub)
            .bind(&claims.role)
            .bind(&role_plural)
            .bind(&claims.department);
        if let Some(kind) = params.kind {
            list_query = list_query.bind(kind);
        }
        let notifications = list_query.bind(limit).bind(offset).fetch_all(db).await?;

        let fetched_sent: Vec<Uuid> = notifications
            .iter()
            .filter(|n| n.status == super::model::NotificationStatus::Sent)
            .map(|n| n.id)
            .collect();
        if !fetched_sent.is_empty() {
            sqlx::query(
                "UPDATE notifications SET status = 'delivered', updated_at = NOW()
                 WHERE id = ANY($1) AND status = 'sent'",
            )
            .bind(&fetched_sent)
            .execute(db)
            .await?;
        }

        Ok((notifications, PaginationInfo::new(page.page(), limit, total)))
    }

    pub async fn sent(
        db: &PgPool,
        user_id: &str,
        page: PageParams,
    ) -> Result<(Vec<Notification>, PaginationInfo), AppError> {
        let limit = page.limit_or(20);
        let offset = page.offset(limit);

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM notifications WHERE sender = $1")
                .bind(user_id)
                .fetch_one(db)
                .await?;

        let notifications = sqlx::query_as::<_, Notification>(&format!(
            "{NOTIFICATION_SELECT} WHERE n.sender = $1 \
             ORDER BY n.created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok((notifications, PaginationInfo::new(page.page(), limit, total)))
    }

    /// Reply goes back to the original sender as a direct message.
    #[instrument(skip(db, dto, claims), fields(notification.parent = %parent_id))]
    pub async fn reply(
        db: &PgPool,
        parent_id: Uuid,
        dto: ReplyDto,
        claims: &Claims,
    ) -> Result<Notification, AppError> {
        let parent = sqlx::query_as::<_, (String, String)>(
            "SELECT title, sender FROM notifications WHERE id = $1",
        )
        .bind(parent_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Original notification not found"))?;

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO notifications
                 (title, message, sender, sender_name, recipient, recipient_type,
                  priority, kind, parent_id, department)
             VALUES ($1, $2, $3, $4, $5, 'specific', 'medium', 'reply', $6, $7)
             RETURNING id",
        )
        .bind(format!("Re: {}", parent.0))
        .bind(&dto.message)
        .bind(&claims.sub)
        .bind(claims.full_name())
        .bind(&parent.1)
        .bind(parent_id)
        .bind(&claims.department)
        .fetch_one(db)
        .await?;

        info!(notification.id = %id, "Reply sent");
        Self::get_for_user(db, id, &claims.sub).await
    }

    /// Idempotent per-user read receipt. The top-level status only flips
    /// to `read` when the caller is the sole direct recipient.
    #[instrument(skip(db), fields(notification.id = %id))]
    pub async fn mark_as_read(db: &PgPool, id: Uuid, user_id: &str) -> Result<(), AppError> {
        let recipient =
            sqlx::query_scalar::<_, String>("SELECT recipient FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found("Notification not found"))?;

        sqlx::query(
            "INSERT INTO notification_reads (notification_id, user_id)
             VALUES ($1, $2)
             ON CONFLICT (notification_id, user_id) DO NOTHING",
        )
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;

        if recipient == user_id {
            sqlx::query(
                "UPDATE notifications SET status = 'read', updated_at = NOW() WHERE id = $1",
            )
            .bind(id)
            .execute(db)
            .await?;
        }

        Ok(())
    }

    #[instrument(skip(db), fields(notification.id = %id))]
    pub async fn delete(
        db: &PgPool,
        id: Uuid,
        user_id: &str,
        is_admin: bool,
    ) -> Result<(), AppError> {
        let row = sqlx::query_as::<_, (String, String)>(
            "SELECT sender, recipient FROM notifications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Notification not found"))?;

        if row.0 != user_id && row.1 != user_id && !is_admin {
            return Err(AppError::forbidden(
                "Unauthorized to delete this notification",
            ));
        }

        sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        info!(notification.id = %id, "Notification deleted");
        Ok(())
    }

    pub async fn stats(db: &PgPool, claims: &Claims) -> Result<NotificationStats, AppError> {
        let role_plural = format!("{}s", claims.role);

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM notifications n WHERE {INBOX_WHERE}"
        ))
        .bind(&claims.sub)
        .bind(&claims.role)
        .bind(&role_plural)
        .bind(&claims.department)
        .fetch_one(db)
        .await?;

        let unread = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM notifications n WHERE {INBOX_WHERE} \
             AND NOT EXISTS(SELECT 1 FROM notification_reads r \
                            WHERE r.notification_id = n.id AND r.user_id = $1)"
        ))
        .bind(&claims.sub)
        .bind(&claims.role)
        .bind(&role_plural)
        .bind(&claims.department)
        .fetch_one(db)
        .await?;

        let sent =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM notifications WHERE sender = $1")
                .bind(&claims.sub)
                .fetch_one(db)
                .await?;

        Ok(NotificationStats {
            total,
            unread,
            sent,
        })
    }

    /// User picker for composing a notification.
    pub async fn recipient_users(
        db: &PgPool,
        filters: RecipientFilterParams,
    ) -> Result<Vec<RecipientUser>, AppError> {
        let mut clauses: Vec<String> = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(role) = filters.role.filter(|r| !r.is_empty() && r != "all") {
            clauses.push(format!("role = ${}", binds.len() + 1));
            binds.push(role);
        }
        if let Some(department) = filters
            .department
            .filter(|d| !d.is_empty() && d != "all")
        {
            clauses.push(format!("department = ${}", binds.len() + 1));
            binds.push(department);
        }

        let mut sql = String::from(
            "SELECT user_id, first_name, last_name, email, role, department FROM users",
        );
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY first_name ASC");

        let mut query = sqlx::query_as::<_, RecipientUser>(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        Ok(query.fetch_all(db).await?)
    }
}

/// "all" broadcasts, a role plural fans out to that role, anything else
/// is a direct user id.
fn derive_recipient_type(recipient: &str) -> &'static str {
    match recipient {
        "all" => "all",
        "students" | "lecturers" | "admins" => "role",
        _ => "specific",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_recipient() {
        assert_eq!(derive_recipient_type("all"), "all");
    }

    #[test]
    fn role_plurals_fan_out() {
        assert_eq!(derive_recipient_type("students"), "role");
        assert_eq!(derive_recipient_type("lecturers"), "role");
        assert_eq!(derive_recipient_type("admins"), "role");
    }

    #[test]
    fn anything_else_is_a_direct_message() {
        assert_eq!(derive_recipient_type("STU001"), "specific");
        // singular spellings are user ids, not roles
        assert_eq!(derive_recipient_type("student"), "specific");
    }
}
