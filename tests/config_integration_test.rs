//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables are serialized with a
//! mutex to avoid interference between tests.

use cloudenv::config::{load_config, load_config_or_default};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("CLOUDENV_APPLICATION_LOG_LEVEL");
    std::env::remove_var("CLOUDENV_SERVER_HOST");
    std::env::remove_var("CLOUDENV_SERVER_PORT");
    std::env::remove_var("CLOUDENV_REQUEST_NAME");
    std::env::remove_var("CLOUDENV_REQUEST_PROFILES");
    std::env::remove_var("CLOUDENV_RESOLVER_FAIL_FAST");
    std::env::remove_var("TEST_CONFIG_SERVER_PASSWORD");
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "debug"
verbose = true

[server]
scheme = "https"
host = "config.example.com"
port = 8443
username = "svc"
password = "secret"
timeout_seconds = 10

[server.retry]
max_retries = 5
initial_delay_ms = 250
max_delay_ms = 4000
backoff_multiplier = 1.5

[request]
name = "billing"
profiles = ["dev", "cloud"]
label = "main"

[resolver]
opener = "${"
closer = "}"
default_separator = ":"
fail_fast = false
max_steps = 32
strict = true

[format]
key_separator = "__"
uppercase = false

[logging]
local_enabled = false
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.verbose);

    assert_eq!(config.server.scheme, "https");
    assert_eq!(config.server.host, "config.example.com");
    assert_eq!(config.server.port, 8443);
    assert_eq!(config.server.username, Some("svc".to_string()));
    assert_eq!(config.server.timeout_seconds, 10);
    assert_eq!(config.server.retry.max_retries, 5);
    assert_eq!(config.server.base_url(), "https://config.example.com:8443");

    assert_eq!(config.request.name, "billing");
    assert_eq!(config.request.profiles, vec!["dev", "cloud"]);
    assert_eq!(config.request.label, "main");

    assert!(!config.resolver.fail_fast);
    assert_eq!(config.resolver.max_steps, 32);
    assert!(config.resolver.strict);

    assert_eq!(config.format.key_separator, "__");
    assert!(!config.format.uppercase);
}

#[test]
fn test_env_var_substitution_in_config_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_CONFIG_SERVER_PASSWORD", "hunter2");

    let toml_content = r#"
[server]
username = "svc"
password = "${TEST_CONFIG_SERVER_PASSWORD}"
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path()).expect("Failed to load config");

    use secrecy::ExposeSecret;
    assert_eq!(
        config
            .server
            .password
            .as_ref()
            .map(|p| p.expose_secret().as_ref().to_string()),
        Some("hunter2".to_string())
    );

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_fails_loading() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[server]
username = "svc"
password = "${TEST_CONFIG_SERVER_PASSWORD}"
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let result = load_config(temp_file.path());
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("TEST_CONFIG_SERVER_PASSWORD"));
}

#[test]
fn test_env_overrides_beat_file_values() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("CLOUDENV_SERVER_HOST", "override.example.com");
    std::env::set_var("CLOUDENV_SERVER_PORT", "9999");
    std::env::set_var("CLOUDENV_REQUEST_PROFILES", "prod,metrics");
    std::env::set_var("CLOUDENV_RESOLVER_FAIL_FAST", "false");

    let toml_content = r#"
[server]
host = "file.example.com"
port = 8888

[request]
profiles = ["dev"]
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.server.host, "override.example.com");
    assert_eq!(config.server.port, 9999);
    assert_eq!(config.request.profiles, vec!["prod", "metrics"]);
    assert!(!config.resolver.fail_fast);

    cleanup_env_vars();
}

#[test]
fn test_defaults_when_no_file_exists() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let config = load_config_or_default("definitely-missing-cloudenv.toml").unwrap();

    assert_eq!(config.server.base_url(), "http://127.0.0.1:8888");
    assert_eq!(config.request.name, "application");
    assert_eq!(config.request.profiles, vec!["default"]);
    assert_eq!(config.request.label, "master");
    assert!(config.resolver.fail_fast);
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[resolver]
opener = "%"
closer = "%"
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let result = load_config(temp_file.path());
    assert!(result.is_err());
}
