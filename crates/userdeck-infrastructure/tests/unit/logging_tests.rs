//! Logging helper tests

use tracing::Level;
use userdeck_domain::Error;
use tracing_subscriber::filter::LevelFilter;
use userdeck_infrastructure::logging::{LoggingConfig, init_logging, level_filter, parse_log_level};

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
}

#[test]
fn test_level_alias_filters_like_canonical_name() {
    let warning = level_filter(parse_log_level("warning").unwrap());
    let warn = level_filter(parse_log_level("warn").unwrap());

    assert_eq!(warning.max_level_hint(), Some(LevelFilter::WARN));
    assert_eq!(warning.max_level_hint(), warn.max_level_hint());
}

#[test]
fn test_level_filter_matches_parsed_level() {
    for (name, expected) in [
        ("trace", LevelFilter::TRACE),
        ("debug", LevelFilter::DEBUG),
        ("INFO", LevelFilter::INFO),
        ("error", LevelFilter::ERROR),
    ] {
        let filter = level_filter(parse_log_level(name).unwrap());
        assert_eq!(filter.max_level_hint(), Some(expected), "level {name}");
    }
}

#[test]
fn test_parse_invalid_log_level() {
    assert!(matches!(
        parse_log_level("verbose"),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_init_logging_rejects_invalid_level() {
    let config = LoggingConfig {
        level: "chatty".to_string(),
        ..LoggingConfig::default()
    };

    assert!(init_logging(&config).is_err());
}

#[test]
fn test_second_initialization_fails() {
    // Only this test installs a global subscriber in this binary
    let config = LoggingConfig::default();

    assert!(init_logging(&config).is_ok());
    assert!(matches!(
        init_logging(&config),
        Err(Error::Infrastructure { .. })
    ));
}
