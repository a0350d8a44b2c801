use lectern::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_password_success() {
    let result = hash_password("securepassword123");

    assert!(result.is_ok());
    let hashed = result.unwrap();
    assert!(!hashed.is_empty());
    assert_ne!(hashed, "securepassword123");
}

#[test]
fn test_hash_password_produces_different_hashes() {
    let first = hash_password("securepassword123").unwrap();
    let second = hash_password("securepassword123").unwrap();

    // bcrypt salts every hash
    assert_ne!(first, second);
}

#[test]
fn test_verify_password_correct() {
    let hashed = hash_password("securepassword123").unwrap();

    assert!(verify_password("securepassword123", &hashed).unwrap());
}

#[test]
fn test_verify_password_incorrect() {
    let hashed = hash_password("securepassword123").unwrap();

    assert!(!verify_password("wrongpassword", &hashed).unwrap());
}

#[test]
fn test_verify_password_empty() {
    let hashed = hash_password("securepassword123").unwrap();

    assert!(!verify_password("", &hashed).unwrap());
}

#[test]
fn test_verify_password_invalid_hash() {
    assert!(verify_password("securepassword123", "not-a-bcrypt-hash").is_err());
}
