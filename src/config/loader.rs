//! Configuration loader with TOML parsing and environment variable overrides
//!
//! Loading goes through four steps: read the file, substitute `${VAR}`
//! environment references in its text, parse the TOML, then apply
//! `CLOUDENV_*` environment overrides and validate. The client also runs
//! without any file, so [`load_config_or_default`] falls back to defaults
//! when the path does not exist.

use super::schema::CloudEnvConfig;
use crate::config::secret_string;
use crate::domain::errors::CloudEnvError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use cloudenv::config::load_config;
///
/// let config = load_config("cloudenv.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CloudEnvConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CloudEnvError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CloudEnvError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: CloudEnvConfig = toml::from_str(&contents)
        .map_err(|e| CloudEnvError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        CloudEnvError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Loads configuration from a TOML file, or defaults when it is absent
///
/// Commands use this so the client works with nothing but CLI flags, the
/// way `validate-config` still insists on an existing file via
/// [`load_config`]. Environment overrides and validation apply either way.
///
/// # Errors
///
/// Returns an error if an existing file fails to load or the resulting
/// configuration is invalid.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<CloudEnvConfig> {
    let path = path.as_ref();

    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = CloudEnvConfig::default();
    apply_env_overrides(&mut config);
    config.validate().map_err(|e| {
        CloudEnvError::Configuration(format!("Configuration validation failed: {e}"))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. Referencing an unset variable is an
/// error naming every missing variable.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CloudEnvError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CloudEnvError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the CLOUDENV_* prefix
///
/// Environment variables follow the pattern: CLOUDENV_<SECTION>_<KEY>
/// For example: CLOUDENV_SERVER_HOST, CLOUDENV_REQUEST_NAME
fn apply_env_overrides(config: &mut CloudEnvConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("CLOUDENV_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("CLOUDENV_APPLICATION_VERBOSE") {
        config.application.verbose = val.parse().unwrap_or(false);
    }

    // Server overrides
    if let Ok(val) = std::env::var("CLOUDENV_SERVER_SCHEME") {
        config.server.scheme = val;
    }
    if let Ok(val) = std::env::var("CLOUDENV_SERVER_HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("CLOUDENV_SERVER_PORT") {
        if let Ok(port) = val.parse() {
            config.server.port = port;
        }
    }
    if let Ok(val) = std::env::var("CLOUDENV_SERVER_USERNAME") {
        config.server.username = Some(val);
    }
    if let Ok(val) = std::env::var("CLOUDENV_SERVER_PASSWORD") {
        config.server.password = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("CLOUDENV_SERVER_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.server.timeout_seconds = timeout;
        }
    }

    // Request overrides
    if let Ok(val) = std::env::var("CLOUDENV_REQUEST_NAME") {
        config.request.name = val;
    }
    if let Ok(val) = std::env::var("CLOUDENV_REQUEST_PROFILES") {
        let profiles: Vec<String> = val
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
        if !profiles.is_empty() {
            config.request.profiles = profiles;
        }
    }
    if let Ok(val) = std::env::var("CLOUDENV_REQUEST_LABEL") {
        config.request.label = val;
    }

    // Resolver overrides
    if let Ok(val) = std::env::var("CLOUDENV_RESOLVER_FAIL_FAST") {
        config.resolver.fail_fast = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("CLOUDENV_RESOLVER_STRICT") {
        config.resolver.strict = val.parse().unwrap_or(false);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CLOUDENV_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CLOUDENV_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
