//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for cloudenv using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// cloudenv - Spring Cloud Config client
#[derive(Parser, Debug)]
#[command(name = "cloudenv")]
#[command(version, about, long_about = None)]
#[command(author = "Cloudenv Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "cloudenv.toml", env = "CLOUDENV_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CLOUDENV_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and resolve properties, then print them or run a command
    Env(commands::env::EnvArgs),

    /// Fetch plain-text files from the config server
    File(commands::file::FileArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
