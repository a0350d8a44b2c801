use lectern::middleware::auth::AuthUser;
use lectern::middleware::role::check_any_role;
use lectern::modules::users::model::UserRole;
use lectern::utils::jwt::Claims;

fn create_test_auth_user(role: &str) -> AuthUser {
    let claims = Claims {
        sub: "USR001".to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        department: None,
        email: "test@example.com".to_string(),
        role: role.to_string(),
        exp: 9999999999,
        iat: 1234567890,
    };
    AuthUser(claims)
}

#[test]
fn test_check_any_role_single_match() {
    let auth_user = create_test_auth_user("admin");
    let allowed = vec![UserRole::Admin];
    assert!(check_any_role(&auth_user, &allowed).is_ok());
}

#[test]
fn test_check_any_role_multiple_match() {
    let allowed = vec![UserRole::Admin, UserRole::Lecturer, UserRole::Student];

    let auth_user = create_test_auth_user("admin");
    assert!(check_any_role(&auth_user, &allowed).is_ok());

    let auth_user = create_test_auth_user("lecturer");
    assert!(check_any_role(&auth_user, &allowed).is_ok());

    let auth_user = create_test_auth_user("student");
    assert!(check_any_role(&auth_user, &allowed).is_ok());
}

#[test]
fn test_lecturer_gate_admits_admin_and_lecturer() {
    let allowed = vec![UserRole::Admin, UserRole::Lecturer];

    assert!(check_any_role(&create_test_auth_user("admin"), &allowed).is_ok());
    assert!(check_any_role(&create_test_auth_user("lecturer"), &allowed).is_ok());

    let err = check_any_role(&create_test_auth_user("student"), &allowed).unwrap_err();
    assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
}

#[test]
fn test_student_gate_admits_admin_and_student() {
    let allowed = vec![UserRole::Admin, UserRole::Student];

    assert!(check_any_role(&create_test_auth_user("admin"), &allowed).is_ok());
    assert!(check_any_role(&create_test_auth_user("student"), &allowed).is_ok());
    assert!(check_any_role(&create_test_auth_user("lecturer"), &allowed).is_err());
}

#[test]
fn test_check_any_role_empty_list() {
    let allowed = vec![];
    let auth_user = create_test_auth_user("admin");
    assert!(check_any_role(&auth_user, &allowed).is_err());
}

#[test]
fn test_unknown_role_is_rejected() {
    let auth_user = create_test_auth_user("superuser");
    assert!(check_any_role(&auth_user, &[UserRole::Admin]).is_err());
}

#[test]
fn test_user_role_equality() {
    assert_eq!(UserRole::Admin, UserRole::Admin);
    assert_ne!(UserRole::Admin, UserRole::Lecturer);
    assert_ne!(UserRole::Lecturer, UserRole::Student);
}
