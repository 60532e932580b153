use std::env;

use serial_test::serial;

use super::{ConfigError, ServerConfig, StoreBackend};

const ALL_VARS: [&str; 12] = [
    "PROMPTELO_PORT",
    "PROMPTELO_BIND_ADDR",
    "PROMPTELO_STORE",
    "PROMPTELO_QDRANT_URL",
    "PROMPTELO_COLLECTION",
    "PROMPTELO_EMBEDDING_URL",
    "OPENAI_API_KEY",
    "PROMPTELO_EMBEDDING_MODEL",
    "PROMPTELO_EMBEDDING_DIM",
    "PROMPTELO_NEIGHBOR_K",
    "PROMPTELO_RATE_LIMIT_REQUESTS",
    "PROMPTELO_RATE_LIMIT_WINDOW",
];

fn clear_env() {
    for var in ALL_VARS {
        unsafe { env::remove_var(var) };
    }
}

#[test]
#[serial]
fn defaults_without_environment() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.port, 8000);
    assert_eq!(config.store_backend, StoreBackend::Memory);
    assert_eq!(config.embedding_dim, 1536);
    assert_eq!(config.neighbor_k, 50);
    assert_eq!(config.embedding_api_key, None);
    assert_eq!(config.rate_limit_requests, 60);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn environment_overrides_are_honored() {
    clear_env();
    unsafe {
        env::set_var("PROMPTELO_PORT", "9001");
        env::set_var("PROMPTELO_STORE", "qdrant");
        env::set_var("PROMPTELO_QDRANT_URL", "http://qdrant.internal:6334");
        env::set_var("PROMPTELO_EMBEDDING_DIM", "768");
        env::set_var("PROMPTELO_NEIGHBOR_K", "25");
        env::set_var("OPENAI_API_KEY", "sk-test");
    }

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.port, 9001);
    assert_eq!(config.store_backend, StoreBackend::Qdrant);
    assert_eq!(config.qdrant_url, "http://qdrant.internal:6334");
    assert_eq!(config.embedding_dim, 768);
    assert_eq!(config.neighbor_k, 25);
    assert_eq!(config.embedding_api_key.as_deref(), Some("sk-test"));
}

#[test]
#[serial]
fn invalid_port_is_an_error() {
    clear_env();
    unsafe { env::set_var("PROMPTELO_PORT", "not-a-port") };

    let result = ServerConfig::from_env();
    clear_env();

    assert!(matches!(result, Err(ConfigError::PortParseError { .. })));
}

#[test]
#[serial]
fn port_zero_is_rejected() {
    clear_env();
    unsafe { env::set_var("PROMPTELO_PORT", "0") };

    let result = ServerConfig::from_env();
    clear_env();

    assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
}

#[test]
#[serial]
fn unknown_store_backend_is_rejected() {
    clear_env();
    unsafe { env::set_var("PROMPTELO_STORE", "postgres") };

    let result = ServerConfig::from_env();
    clear_env();

    assert!(matches!(
        result,
        Err(ConfigError::UnknownStoreBackend { .. })
    ));
}

#[test]
#[serial]
fn blank_api_key_counts_as_absent() {
    clear_env();
    unsafe { env::set_var("OPENAI_API_KEY", "   ") };

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.embedding_api_key, None);
}

#[test]
#[serial]
fn unparseable_numeric_overrides_fall_back_to_defaults() {
    clear_env();
    unsafe {
        env::set_var("PROMPTELO_EMBEDDING_DIM", "lots");
        env::set_var("PROMPTELO_RATE_LIMIT_REQUESTS", "-4");
    }

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.embedding_dim, 1536);
    assert_eq!(config.rate_limit_requests, 60);
}

#[test]
#[serial]
fn validate_rejects_zero_valued_settings() {
    clear_env();
    let mut config = ServerConfig::from_env().unwrap();

    config.embedding_dim = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue {
            setting: "embedding_dim",
            ..
        })
    ));

    config.embedding_dim = 1536;
    config.neighbor_k = 0;
    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn socket_addr_formats_bind_and_port() {
    clear_env();
    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.socket_addr(), "127.0.0.1:8000");
}
