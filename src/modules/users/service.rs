use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use crate::utils::errors::AppError;
use crate::utils::password::{hash_password, verify_password};

use super::model::{
    RegisterUserDto, RoleCounts, SearchUsersParams, UpdateUserDto, User, UserRole, UserStats,
};

/// Columns of the public user projection. The password hash is selected
/// only inside [`UserService::login`].
const USER_COLUMNS: &str =
    "id, user_id, first_name, last_name, email, role, department, created_at, updated_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db, dto), fields(user.id = %dto.user_id, user.role = ?dto.role))]
    pub async fn register(db: &PgPool, dto: RegisterUserDto) -> Result<(), AppError> {
        if sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE user_id = $1")
            .bind(&dto.user_id)
            .fetch_one(db)
            .await?
            > 0
        {
            return Err(AppError::bad_request("User with this ID already exists"));
        }

        if sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(&dto.email)
            .fetch_one(db)
            .await?
            > 0
        {
            return Err(AppError::bad_request("User with this email already exists"));
        }

        if dto.role != UserRole::Admin && dto.department.is_none() {
            return Err(AppError::bad_request(
                "Department is required for students and lecturers",
            ));
        }

        let password_hash = hash_password(&dto.password)?;
        let department = if dto.role == UserRole::Admin {
            None
        } else {
            dto.department
        };

        sqlx::query(
            "INSERT INTO users (user_id, first_name, last_name, email, password_hash, role, department)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&dto.user_id)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(dto.role)
        .bind(&department)
        .execute(db)
        .await
        .map_err(|e| AppError::from_db(e, "User with this ID or email already exists"))?;

        info!(user.id = %dto.user_id, "User registered");
        Ok(())
    }

    /// Verify credentials and return the user. Unknown email and wrong
    /// password both surface as 400, matching the login contract.
    #[instrument(skip(db, password))]
    pub async fn login(db: &PgPool, email: &str, password: &str) -> Result<User, AppError> {
        let stored_hash =
            sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::bad_request("User not found"))?;

        if !verify_password(password, &stored_hash)? {
            warn!("Failed login attempt");
            return Err(AppError::bad_request("Invalid password"));
        }

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_one(db)
        .await?;

        info!(user.id = %user.user_id, "User logged in");
        Ok(user)
    }

    pub async fn get_all(db: &PgPool) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    pub async fn get_by_role(db: &PgPool, role: UserRole) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = $1 ORDER BY created_at DESC"
        ))
        .bind(role)
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    #[instrument(skip(db, params))]
    pub async fn search(db: &PgPool, params: SearchUsersParams) -> Result<Vec<User>, AppError> {
        let mut sql = format!("SELECT {USER_COLUMNS} FROM users WHERE 1=1");
        let mut binds = Vec::new();

        if let Some(query) = params.query.as_deref().filter(|q| !q.is_empty()) {
            binds.push(format!("%{}%", query));
            let n = binds.len();
            sql.push_str(&format!(
                " AND (user_id ILIKE ${n} OR first_name ILIKE ${n} OR last_name ILIKE ${n} OR email ILIKE ${n})"
            ));
        }

        if let Some(role) = params.role.as_deref().filter(|r| *r != "all") {
            binds.push(role.to_string());
            sql.push_str(&format!(" AND role = ${}", binds.len()));
        }

        if let Some(department) = params.department.as_deref().filter(|d| *d != "all") {
            binds.push(department.to_string());
            sql.push_str(&format!(" AND department = ${}", binds.len()));
        }

        sql.push_str(" ORDER BY created_at DESC");

        let mut query = sqlx::query_as::<_, User>(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }

        let users = query.fetch_all(db).await?;
        debug!(returned = users.len(), "User search completed");
        Ok(users)
    }

    pub async fn get_by_user_id(db: &PgPool, user_id: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    pub async fn get_stats(db: &PgPool) -> Result<UserStats, AppError> {
        let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await?;

        let role_counts = sqlx::query_as::<_, (String, i64)>(
            "SELECT role, COUNT(*) FROM users GROUP BY role",
        )
        .fetch_all(db)
        .await?;

        let mut roles = RoleCounts {
            admin: 0,
            student: 0,
            lecturer: 0,
        };
        for (role, count) in role_counts {
            match role.as_str() {
                "admin" => roles.admin = count,
                "student" => roles.student = count,
                "lecturer" => roles.lecturer = count,
                _ => {}
            }
        }

        let departments = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT department FROM users
             WHERE department IS NOT NULL AND department <> '' ORDER BY department",
        )
        .fetch_all(db)
        .await?;

        Ok(UserStats {
            total_users,
            roles,
            departments,
        })
    }

    /// Apply the provided fields to an existing user. The caller has
    /// already enforced self-or-admin; the admin-only role change is
    /// enforced here so it cannot be bypassed.
    #[instrument(skip(db, dto), fields(user.id = %user_id))]
    pub async fn update(
        db: &PgPool,
        user_id: &str,
        dto: UpdateUserDto,
        caller_is_admin: bool,
    ) -> Result<User, AppError> {
        let existing = Self::get_by_user_id(db, user_id).await?;

        if dto.role.is_some() && !caller_is_admin {
            return Err(AppError::forbidden("Only admins can update roles"));
        }

        let password_hash = match &dto.password {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                department = COALESCE($4, department),
                email = COALESCE($5, email),
                password_hash = COALESCE($6, password_hash),
                role = COALESCE($7, role),
                updated_at = NOW()
             WHERE user_id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&existing.user_id)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.department)
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(dto.role)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_db(e, "User with this email already exists"))?;

        info!(user.id = %user.user_id, "User updated");
        Ok(user)
    }

    /// Admin-gated at the router; self-deletion is rejected here.
    #[instrument(skip(db), fields(user.id = %user_id))]
    pub async fn delete(db: &PgPool, user_id: &str, caller_id: &str) -> Result<User, AppError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(AppError::bad_request("User ID is required"));
        }

        let user = Self::get_by_user_id(db, user_id).await?;

        if caller_id == user_id {
            return Err(AppError::bad_request("You cannot delete your own account"));
        }

        sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(db)
            .await?;

        info!(user.id = %user_id, deleted_by = %caller_id, "User deleted");
        Ok(user)
    }
}
