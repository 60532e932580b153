use std::env;

use serial_test::serial;

use super::ClientConfig;
use crate::constants::{DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS};

fn clear_env() {
    unsafe {
        env::remove_var("PROMPTELO_SERVER_URL");
        env::remove_var("PROMPTELO_USER_ID");
        env::remove_var("PROMPTELO_TIMEOUT_SECS");
    }
}

#[test]
#[serial]
fn missing_file_yields_defaults() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();

    let config = ClientConfig::load_from(&dir.path().join("absent.json"));

    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.server_url, DEFAULT_SERVER_URL);
    assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(config.user_id, None);
}

#[test]
#[serial]
fn malformed_file_falls_back_to_defaults() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json {{{").unwrap();

    let config = ClientConfig::load_from(&path);

    assert_eq!(config, ClientConfig::default());
}

#[test]
#[serial]
fn file_values_are_read() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"server_url": "http://example.invalid:9999", "user_id": "anon-7", "timeout": 2.5}"#,
    )
    .unwrap();

    let config = ClientConfig::load_from(&path);

    assert_eq!(config.server_url, "http://example.invalid:9999");
    assert_eq!(config.user_id.as_deref(), Some("anon-7"));
    assert_eq!(config.timeout_secs, 2.5);
}

#[test]
#[serial]
fn env_overrides_take_precedence_over_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"server_url": "http://from-file:1", "user_id": "file-user", "timeout": 9.0}"#,
    )
    .unwrap();

    unsafe {
        env::set_var("PROMPTELO_SERVER_URL", "http://from-env:2");
        env::set_var("PROMPTELO_USER_ID", "env-user");
        env::set_var("PROMPTELO_TIMEOUT_SECS", "1.5");
    }

    let config = ClientConfig::load_from(&path);
    clear_env();

    assert_eq!(config.server_url, "http://from-env:2");
    assert_eq!(config.user_id.as_deref(), Some("env-user"));
    assert_eq!(config.timeout_secs, 1.5);
}

#[test]
#[serial]
fn invalid_timeout_override_is_ignored() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();

    unsafe {
        env::set_var("PROMPTELO_TIMEOUT_SECS", "not-a-number");
    }
    let config = ClientConfig::load_from(&dir.path().join("absent.json"));
    clear_env();

    assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
}

#[test]
#[serial]
fn negative_timeout_override_is_ignored() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();

    unsafe {
        env::set_var("PROMPTELO_TIMEOUT_SECS", "-3");
    }
    let config = ClientConfig::load_from(&dir.path().join("absent.json"));
    clear_env();

    assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
}

#[test]
#[serial]
fn save_round_trips_through_load() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = ClientConfig {
        server_url: "http://localhost:8000".to_string(),
        user_id: Some("anon-42".to_string()),
        timeout_secs: 3.0,
    };
    config.save_to(&path).unwrap();

    let loaded = ClientConfig::load_from(&path);
    assert_eq!(loaded, config);
}

#[test]
#[serial]
fn timeout_field_uses_the_original_key() {
    clear_env();
    let config = ClientConfig {
        server_url: "http://localhost:8000".to_string(),
        user_id: None,
        timeout_secs: 4.0,
    };

    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["timeout"], 4.0);
    assert!(json.get("timeout_secs").is_none());
}
