#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use taskgate_server::config::{self, DEFAULT_MAX_CONCURRENT};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
admission:
  max_concurent_requests: 4 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_CONFIG");
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn bad_listen_and_timeout_rejected() {
    let bad_listen = "version: 1\nserver:\n  listen: \"not-an-addr\"\n";
    assert!(config::load_from_str(bad_listen).is_err());

    let bad_timeout = "version: 1\nserver:\n  shutdown_timeout_ms: 5\n";
    assert!(config::load_from_str(bad_timeout).is_err());
}

#[test]
fn ok_minimal_config_uses_defaults() {
    let file = config::load_from_str("version: 1\n").expect("must parse");
    let cfg = config::resolve(Some(&file), None).unwrap();
    assert_eq!(cfg.listen.port(), 8080);
    assert_eq!(cfg.shutdown_timeout, Duration::from_secs(10));
    assert_eq!(cfg.max_concurrent, DEFAULT_MAX_CONCURRENT);
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9090"
  shutdown_timeout_ms: 2500
admission:
  max_concurrent_requests: 3
"#;
    let file = config::load_from_str(ok).unwrap();
    let cfg = config::resolve(Some(&file), None).unwrap();
    assert_eq!(cfg.listen.to_string(), "127.0.0.1:9090");
    assert_eq!(cfg.shutdown_timeout, Duration::from_millis(2500));
    assert_eq!(cfg.max_concurrent, 3);
}

#[test]
fn env_capacity_overrides_file() {
    let file = config::load_from_str("version: 1\nadmission:\n  max_concurrent_requests: 3\n").unwrap();
    let cfg = config::resolve(Some(&file), Some("7")).unwrap();
    assert_eq!(cfg.max_concurrent, 7);
}

#[test]
fn capacity_defaults_when_missing_or_invalid() {
    assert_eq!(config::effective_capacity(None, None), 10);
    assert_eq!(config::effective_capacity(Some(""), None), 10);
    assert_eq!(config::effective_capacity(Some("abc"), None), 10);
    assert_eq!(config::effective_capacity(Some("0"), None), 10);
    assert_eq!(config::effective_capacity(Some("-4"), Some(3)), 10);
    assert_eq!(config::effective_capacity(None, Some(0)), 10);
    assert_eq!(config::effective_capacity(None, Some(-1)), 10);
}

#[test]
fn capacity_accepts_positive_values() {
    assert_eq!(config::effective_capacity(Some("25"), None), 25);
    assert_eq!(config::effective_capacity(Some(" 2 "), None), 2);
    assert_eq!(config::effective_capacity(None, Some(4)), 4);
}

#[test]
fn missing_file_is_an_error() {
    let err = config::load_from_file("/nonexistent/taskgate.yaml").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_CONFIG");
}
