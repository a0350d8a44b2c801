use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{Claims, verify_token};

/// Extractor that validates the bearer token and exposes the caller's
/// claims. Handlers never re-read the user row for identity.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Business user id ("ADM001", "STU042", ...), not a database uuid.
    pub fn user_id(&self) -> &str {
        &self.0.sub
    }

    pub fn role(&self) -> &str {
        &self.0.role
    }

    pub fn is_admin(&self) -> bool {
        self.0.role == "admin"
    }

    /// Admins may act on anyone; everyone else only on themselves.
    pub fn ensure_self_or_admin(&self, target_user_id: &str) -> Result<(), AppError> {
        if self.is_admin() || self.0.sub == target_user_id {
            Ok(())
        } else {
            Err(AppError::forbidden("Access denied"))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_for(sub: &str, role: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            department: None,
            email: "test@example.com".to_string(),
            role: role.to_string(),
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn admin_passes_self_or_admin_for_anyone() {
        let admin = AuthUser(claims_for("ADM001", "admin"));
        assert!(admin.ensure_self_or_admin("STU001").is_ok());
        assert!(admin.is_admin());
    }

    #[test]
    fn student_passes_only_for_self() {
        let student = AuthUser(claims_for("STU001", "student"));
        assert!(student.ensure_self_or_admin("STU001").is_ok());

        let err = student.ensure_self_or_admin("STU002").unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
    }
}
