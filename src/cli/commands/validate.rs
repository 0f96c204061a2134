//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the cloudenv configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Config Server: {}", config.server.base_url());
        println!(
            "  Authentication: {}",
            if config.server.username.is_some() {
                "basic"
            } else {
                "none"
            }
        );
        println!("  Application Name: {}", config.request.name);
        println!("  Profiles: {}", config.request.profiles.join(","));
        println!("  Label: {}", config.request.label);
        println!(
            "  Placeholder Tokens: {}key{}default{}",
            config.resolver.opener, config.resolver.default_separator, config.resolver.closer
        );
        println!(
            "  Resolution Mode: {}",
            if config.resolver.fail_fast {
                "fail-fast"
            } else {
                "best-effort"
            }
        );
        println!("  Key Separator: {}", config.format.key_separator);
        println!("  Uppercase Keys: {}", config.format.uppercase);
        println!();
        Ok(0)
    }
}
