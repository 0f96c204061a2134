//! Env command implementation
//!
//! This module implements the `env` command: fetch the environment document,
//! run the resolution pipeline, and either print the resolved properties or
//! spawn a child command with the properties injected as environment
//! variables.

use super::ServerOverrides;
use crate::adapters::server::{ConfigServer, HttpConfigServer};
use crate::config::{load_config_or_default, CloudEnvConfig};
use crate::core::{
    EnvFormatter, Flattener, IdentityFormatter, PipelineOutcome, PropertyFormatter,
    PropertyPipeline, Resolver,
};
use crate::domain::CloudEnvError;
use clap::Args;

/// Arguments for the env command
#[derive(Args, Debug)]
pub struct EnvArgs {
    /// Connection and request overrides
    #[command(flatten)]
    pub overrides: ServerOverrides,

    /// Print the fetched environment document before processing
    #[arg(short, long)]
    pub verbose: bool,

    /// Keep dot-separated keys instead of environment-variable style
    #[arg(long)]
    pub raw: bool,

    /// Record unresolved properties instead of aborting on the first
    #[arg(long)]
    pub best_effort: bool,

    /// Fail on values that can't be coerced to strings
    #[arg(long)]
    pub strict: bool,

    /// Command to run with the resolved properties in its environment
    #[arg(last = true)]
    pub command: Vec<String>,
}

impl EnvArgs {
    /// Execute the env command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(2);
            }
        };
        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let client = match HttpConfigServer::new(config.server.clone(), config.request.clone()) {
            Ok(client) => client,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(2);
            }
        };

        let environment = match client.fetch_environment().await {
            Ok(environment) => environment,
            Err(e) => {
                tracing::error!(error = %e, "Fetching environment failed");
                eprintln!("Error: {e}");
                return Ok(3);
            }
        };

        if self.verbose || config.application.verbose {
            match serde_json::to_string_pretty(&environment) {
                Ok(document) => println!("{document}"),
                Err(e) => tracing::warn!(error = %e, "Could not render environment document"),
            }
        }

        let pipeline = build_pipeline(&config, self.raw);
        let outcome = match pipeline.process(&environment) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Resolution failed");
                eprintln!("Error: {e}");
                return Ok(4);
            }
        };

        for failure in &outcome.failures {
            eprintln!("Warning: {}", failure.error);
        }

        if self.command.is_empty() {
            for (key, value) in &outcome.properties {
                println!("{key}={value}");
            }
            Ok(0)
        } else {
            self.run_child(&outcome).await
        }
    }

    fn apply_overrides(&self, config: &mut CloudEnvConfig) {
        self.overrides.apply(config);
        if self.best_effort {
            config.resolver.fail_fast = false;
        }
        if self.strict {
            config.resolver.strict = true;
        }
    }

    /// Spawns the child command with the resolved properties layered over
    /// the parent environment
    async fn run_child(&self, outcome: &PipelineOutcome) -> anyhow::Result<i32> {
        let program = &self.command[0];
        let args = &self.command[1..];

        tracing::info!(
            command = %program,
            properties = outcome.properties.len(),
            "Running command with resolved environment"
        );

        let status = tokio::process::Command::new(program)
            .args(args)
            .envs(outcome.properties.iter())
            .status()
            .await
            .map_err(|e| {
                CloudEnvError::Io(format!("Failed to run command \"{program}\": {e}"))
            })?;

        // A signal-terminated child has no exit code
        Ok(status.code().unwrap_or(5))
    }
}

/// Builds the resolution pipeline from the client configuration
fn build_pipeline(config: &CloudEnvConfig, raw: bool) -> PropertyPipeline {
    let flattener = if config.resolver.strict {
        Flattener::strict()
    } else {
        Flattener::new()
    };

    let resolver = Resolver::new(
        config.resolver.opener.clone(),
        config.resolver.closer.clone(),
        config.resolver.default_separator.clone(),
    )
    .with_fail_fast(config.resolver.fail_fast)
    .with_max_steps(config.resolver.max_steps);

    let formatter: Box<dyn PropertyFormatter> = if raw {
        Box::new(IdentityFormatter)
    } else {
        Box::new(EnvFormatter {
            separator: config.format.key_separator.clone(),
            uppercase: config.format.uppercase,
        })
    };

    PropertyPipeline::new(flattener, resolver, formatter)
}
