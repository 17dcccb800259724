//! Unit tests for domain error types

use userdeck_domain::Error;

#[test]
fn test_not_found_error() {
    let error = Error::not_found("user u1");
    match &error {
        Error::NotFound { resource } => assert_eq!(resource, "user u1"),
        _ => panic!("Expected NotFound error"),
    }
    assert!(error.is_not_found());
    assert!(!error.is_transport());
}

#[test]
fn test_transport_error_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let error = Error::transport_with_source("store unreachable", io);

    assert!(error.is_transport());
    assert_eq!(error.to_string(), "Transport error: store unreachable");
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_invalid_argument_error() {
    let error = Error::invalid_argument("User id cannot be empty");
    match error {
        Error::InvalidArgument { message } => assert_eq!(message, "User id cannot be empty"),
        _ => panic!("Expected InvalidArgument error"),
    }
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error: Error = json_error.into();
    assert!(matches!(error, Error::Json { .. }));
}

#[test]
fn test_configuration_error_display() {
    let error = Error::configuration("collection cannot be empty");
    assert!(error.to_string().contains("collection cannot be empty"));
}
