//! Configuration schema types
//!
//! This module defines the client configuration structure that maps to the
//! `cloudenv.toml` file. Every section has defaults matching a local
//! Spring Cloud Config server, so the client runs without any file at all.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Main cloudenv configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CloudEnvConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Config server connection settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Which environment document to request
    #[serde(default)]
    pub request: RequestConfig,

    /// Placeholder resolution settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Output formatting settings
    #[serde(default)]
    pub format: FormatConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CloudEnvConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.server.validate()?;
        self.request.validate()?;
        self.resolver.validate()?;
        self.format.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Print the fetched environment document before processing
    #[serde(default)]
    pub verbose: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            verbose: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Config server connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// URL scheme, http or https
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Config server host
    #[serde(default = "default_host")]
    pub host: String,

    /// Config server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Username for basic authentication (optional)
    #[serde(default)]
    pub username: Option<String>,

    /// Password for basic authentication (optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry behavior for failed requests
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            port: default_port(),
            username: None,
            password: None,
            timeout_seconds: default_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.scheme != "http" && self.scheme != "https" {
            return Err(format!(
                "Invalid server scheme '{}'. Must be http or https",
                self.scheme
            ));
        }
        if self.host.is_empty() {
            return Err("server host must not be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("server timeout_seconds must be greater than zero".to_string());
        }
        if self.username.is_some() != self.password.is_some() {
            return Err(
                "server username and password must be provided together".to_string()
            );
        }
        Ok(())
    }

    /// Base URL of the config server
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Which environment document to request from the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Application name
    #[serde(default = "default_name")]
    pub name: String,

    /// Profiles, joined with commas on the request path
    #[serde(default = "default_profiles")]
    pub profiles: Vec<String>,

    /// Branch or tag to read configuration from
    #[serde(default = "default_label")]
    pub label: String,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            profiles: default_profiles(),
            label: default_label(),
        }
    }
}

impl RequestConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("request name must not be empty".to_string());
        }
        if self.profiles.is_empty() || self.profiles.iter().any(String::is_empty) {
            return Err("request profiles must be a non-empty list of non-empty names".to_string());
        }
        if self.label.is_empty() {
            return Err("request label must not be empty".to_string());
        }
        Ok(())
    }
}

/// Placeholder resolution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Placeholder opener token
    #[serde(default = "default_opener")]
    pub opener: String,

    /// Placeholder closer token
    #[serde(default = "default_closer")]
    pub closer: String,

    /// Separator between a reference key and its default literal
    #[serde(default = "default_separator")]
    pub default_separator: String,

    /// Abort on the first unresolved reference instead of collecting failures
    #[serde(default = "default_true")]
    pub fail_fast: bool,

    /// Substitutions allowed per value before a cycle is assumed
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Report values that can't be coerced instead of dropping them
    #[serde(default)]
    pub strict: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            opener: default_opener(),
            closer: default_closer(),
            default_separator: default_separator(),
            fail_fast: true,
            max_steps: default_max_steps(),
            strict: false,
        }
    }
}

impl ResolverConfig {
    fn validate(&self) -> Result<(), String> {
        if self.opener.is_empty() || self.closer.is_empty() {
            return Err("resolver opener and closer tokens must not be empty".to_string());
        }
        if self.opener == self.closer {
            return Err("resolver opener and closer tokens must differ".to_string());
        }
        if self.default_separator.is_empty() {
            return Err("resolver default_separator must not be empty".to_string());
        }
        if self.max_steps == 0 {
            return Err("resolver max_steps must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Output formatting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Replacement for the dot path separator in keys
    #[serde(default = "default_key_separator")]
    pub key_separator: String,

    /// Uppercase keys
    #[serde(default = "default_true")]
    pub uppercase: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            key_separator: default_key_separator(),
            uppercase: true,
        }
    }
}

impl FormatConfig {
    fn validate(&self) -> Result<(), String> {
        if self.key_separator.is_empty() {
            return Err("format key_separator must not be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to a rotating local file in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: daily or hourly
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging local_path must not be empty when local logging is enabled".to_string());
        }
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8888
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_name() -> String {
    "application".to_string()
}

fn default_profiles() -> Vec<String> {
    vec!["default".to_string()]
}

fn default_label() -> String {
    "master".to_string()
}

fn default_opener() -> String {
    "${".to_string()
}

fn default_closer() -> String {
    "}".to_string()
}

fn default_separator() -> String {
    ":".to_string()
}

fn default_max_steps() -> usize {
    64
}

fn default_key_separator() -> String {
    "_".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CloudEnvConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.base_url(), "http://127.0.0.1:8888");
        assert_eq!(config.request.name, "application");
        assert_eq!(config.request.profiles, vec!["default"]);
        assert_eq!(config.request.label, "master");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: CloudEnvConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.resolver.opener, "${");
        assert_eq!(config.resolver.max_steps, 64);
        assert!(config.resolver.fail_fast);
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let config: CloudEnvConfig = toml::from_str(
            r#"
            [application]
            log_level = "loud"
            "#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.contains("log_level"));
    }

    #[test]
    fn test_invalid_scheme_rejected() {
        let config: CloudEnvConfig = toml::from_str(
            r#"
            [server]
            scheme = "ftp"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_username_without_password_rejected() {
        let config: CloudEnvConfig = toml::from_str(
            r#"
            [server]
            username = "svc"
            "#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.contains("together"));
    }

    #[test]
    fn test_empty_profiles_rejected() {
        let config: CloudEnvConfig = toml::from_str(
            r#"
            [request]
            profiles = []
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_identical_tokens_rejected() {
        let config: CloudEnvConfig = toml::from_str(
            r#"
            [resolver]
            opener = "%"
            closer = "%"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_steps_rejected() {
        let config: CloudEnvConfig = toml::from_str(
            r#"
            [resolver]
            max_steps = 0
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_https_server_section() {
        let config: CloudEnvConfig = toml::from_str(
            r#"
            [server]
            scheme = "https"
            host = "config.example.com"
            port = 8443
            "#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.base_url(), "https://config.example.com:8443");
    }

    #[test]
    fn test_rotation_validation() {
        let config: CloudEnvConfig = toml::from_str(
            r#"
            [logging]
            local_rotation = "weekly"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
