//! Configuration management for cloudenv.
//!
//! This module provides TOML-based client configuration loading, parsing,
//! and validation.
//!
//! # Overview
//!
//! The client reads an optional `cloudenv.toml` with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CLOUDENV_*` environment variable overrides
//! - Default values for every setting, so no file is required
//! - Comprehensive validation
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! host = "config.example.com"
//! port = 8888
//! username = "svc"
//! password = "${CLOUDENV_SERVER_PASSWORD}"
//!
//! [request]
//! name = "billing"
//! profiles = ["dev"]
//! label = "main"
//!
//! [resolver]
//! fail_fast = true
//!
//! [format]
//! key_separator = "_"
//! uppercase = true
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use cloudenv::config::load_config_or_default;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default("cloudenv.toml")?;
//! println!("Config server: {}", config.server.base_url());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, CloudEnvConfig, FormatConfig, LoggingConfig, RequestConfig, ResolverConfig,
    RetryConfig, ServerConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
