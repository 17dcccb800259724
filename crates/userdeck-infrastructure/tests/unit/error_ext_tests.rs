//! Error context tests

use std::io;
use userdeck_domain::Error;
use userdeck_infrastructure::ErrorContext;

fn io_failure() -> Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
}

#[test]
fn test_context_wraps_as_infrastructure() {
    let err = io_failure().context("Reading file").unwrap_err();

    assert!(matches!(err, Error::Infrastructure { .. }));
    assert_eq!(err.to_string(), "Infrastructure error: Reading file: gone");
}

#[test]
fn test_config_context_wraps_as_configuration() {
    let err = io_failure().config_context("Loading").unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
    assert_eq!(err.to_string(), "Configuration error: Loading: gone");
}

#[test]
fn test_context_passes_success_through() {
    let ok: Result<u8, io::Error> = Ok(1);
    assert_eq!(ok.context("Reading file").unwrap(), 1);
}
