use chrono::Utc;
use lectern::config::jwt::JwtConfig;
use lectern::modules::users::model::{User, UserRole};
use lectern::utils::jwt::{create_access_token, verify_token};
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

fn test_user(role: UserRole, department: Option<&str>) -> User {
    User {
        id: Uuid::new_v4(),
        user_id: "STU001".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: "jane.doe@example.com".to_string(),
        role,
        department: department.map(str::to_string),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();
    let user = test_user(UserRole::Student, Some("CS"));

    let result = create_access_token(&user, &jwt_config);

    assert!(result.is_ok());
    assert!(!result.unwrap().is_empty());
}

#[test]
fn test_create_access_token_all_roles() {
    let jwt_config = get_test_jwt_config();

    for role in [UserRole::Admin, UserRole::Lecturer, UserRole::Student] {
        let user = test_user(role, Some("CS"));
        assert!(create_access_token(&user, &jwt_config).is_ok());
    }
}

#[test]
fn test_verify_token_roundtrip() {
    let jwt_config = get_test_jwt_config();
    let user = test_user(UserRole::Student, Some("CS"));

    let token = create_access_token(&user, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, "STU001");
    assert_eq!(claims.email, "jane.doe@example.com");
    assert_eq!(claims.role, "student");
    assert_eq!(claims.department.as_deref(), Some("CS"));
    assert_eq!(claims.full_name(), "Jane Doe");
}

#[test]
fn test_admin_token_has_no_department() {
    let jwt_config = get_test_jwt_config();
    let user = test_user(UserRole::Admin, None);

    let token = create_access_token(&user, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.role, "admin");
    assert!(claims.department.is_none());
}

#[test]
fn test_verify_token_invalid() {
    let jwt_config = get_test_jwt_config();

    assert!(verify_token("invalid.token.here", &jwt_config).is_err());
}

#[test]
fn test_verify_token_empty() {
    let jwt_config = get_test_jwt_config();

    assert!(verify_token("", &jwt_config).is_err());
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let user = test_user(UserRole::Lecturer, Some("EE"));

    let token = create_access_token(&user, &jwt_config).unwrap();

    let wrong_jwt_config = JwtConfig {
        secret: "different_secret_key".to_string(),
        access_token_expiry: 3600,
    };

    assert!(verify_token(&token, &wrong_jwt_config).is_err());
}

#[test]
fn test_tampered_token_rejected() {
    let jwt_config = get_test_jwt_config();
    let user = test_user(UserRole::Student, Some("CS"));

    let mut token = create_access_token(&user, &jwt_config).unwrap();
    token.pop();
    token.push('x');

    assert!(verify_token(&token, &jwt_config).is_err());
}

#[test]
fn test_expiry_is_applied() {
    let jwt_config = get_test_jwt_config();
    let user = test_user(UserRole::Student, Some("CS"));

    let token = create_access_token(&user, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.exp - claims.iat, 3600);
}
