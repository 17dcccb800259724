//! Unit tests for the User entity

use userdeck_domain::constants::ADULT_AGE;
use userdeck_domain::entities::validate_user_id;
use userdeck_domain::User;

#[test]
fn test_users_compare_by_value() {
    assert_eq!(User::new("Midna", 21), User::new("Midna", 21));
    assert_ne!(User::new("Midna", 21), User::new("Midna", 22));
    assert_ne!(User::new("Midna", 21), User::new("Zelda", 21));
}

#[test]
fn test_adult_boundary() {
    assert!(User::new("a", ADULT_AGE).is_adult());
    assert!(!User::new("b", ADULT_AGE - 1).is_adult());
}

#[test]
fn test_user_serializes_as_plain_object() {
    let json = serde_json::to_value(User::new("Link", 17)).unwrap();
    assert_eq!(json, serde_json::json!({"name": "Link", "age": 17}));
}

#[test]
fn test_validate_user_id() {
    assert!(validate_user_id("u1").is_ok());
    assert!(validate_user_id("").is_err());
}

#[test]
fn test_only_the_empty_id_is_rejected() {
    assert!(validate_user_id("   ").is_ok());
    assert!(validate_user_id("a/b c").is_ok());
    assert!(validate_user_id(&"x".repeat(300)).is_ok());
}
