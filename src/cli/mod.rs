use sqlx::PgPool;

use crate::modules::users::model::UserRole;
use crate::utils::password::hash_password;

/// Seeds an admin account. Admins have no department, so the column is
/// left NULL.
pub async fn create_admin(
    db: &PgPool,
    user_id: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let password_hash = hash_password(password)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let result = sqlx::query(
        "INSERT INTO users (user_id, first_name, last_name, email, password_hash, role, department)
         VALUES ($1, $2, $3, $4, $5, $6, NULL)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(user_id)
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(password_hash)
    .bind(UserRole::Admin)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err("User with this email already exists".into());
    }

    Ok(())
}
