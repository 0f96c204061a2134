//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "cloudenv.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your config server settings", self.output);
                println!("  2. Set CLOUDENV_SERVER_PASSWORD if your server needs basic auth");
                println!("  3. Validate the file: cloudenv validate-config");
                println!("  4. Fetch properties: cloudenv env");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# cloudenv Configuration File
# Spring Cloud Config client

[application]
log_level = "info"
# Print the fetched environment document before processing
verbose = false

[server]
scheme = "http"
host = "127.0.0.1"
port = 8888
# Basic authentication, if the server requires it
# username = "svc"
# password = "${CLOUDENV_SERVER_PASSWORD}"
timeout_seconds = 30

[server.retry]
max_retries = 3
initial_delay_ms = 500
max_delay_ms = 10000
backoff_multiplier = 2.0

[request]
name = "application"
profiles = ["default"]
label = "master"

[resolver]
opener = "${"
closer = "}"
default_separator = ":"
# Abort on the first unresolved reference; set to false to keep going
# and report every failure instead
fail_fast = true
max_steps = 64
# Report values that can't be coerced to strings instead of dropping them
strict = false

[format]
key_separator = "_"
uppercase = true

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }
}
