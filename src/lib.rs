// cloudenv - Spring Cloud Config client
// Copyright (c) 2026 Cloudenv Contributors
// Licensed under the MIT License

//! # cloudenv - Spring Cloud Config client
//!
//! cloudenv fetches a layered configuration document from a Spring Cloud
//! Config server and reduces it to a single flat set of resolved properties,
//! ready to print, export as environment variables, or inject into a child
//! command.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** environment documents and plain-text files over HTTP
//! - **Flattening** nested property sources into dot-joined keys
//! - **Merging** the ordered sources with most-specific-wins precedence
//! - **Resolving** `${key}` and `${key:default}` placeholders transitively
//! - **Formatting** the resolved map for environment-variable consumption
//!
//! ## Architecture
//!
//! cloudenv follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - The pure resolution engine (flatten, merge, resolve, format)
//! - [`adapters`] - The config server HTTP integration
//! - [`domain`] - Core domain types and models
//! - [`config`] - Client configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cloudenv::adapters::server::{ConfigServer, HttpConfigServer};
//! use cloudenv::config::load_config_or_default;
//! use cloudenv::core::{EnvFormatter, Flattener, PropertyPipeline, Resolver};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load client configuration
//!     let config = load_config_or_default("cloudenv.toml")?;
//!
//!     // Fetch the environment document
//!     let client = HttpConfigServer::new(config.server, config.request)?;
//!     let environment = client.fetch_environment().await?;
//!
//!     // Resolve it to flat properties
//!     let pipeline = PropertyPipeline::new(
//!         Flattener::new(),
//!         Resolver::default(),
//!         Box::new(EnvFormatter::default()),
//!     );
//!     let outcome = pipeline.process(&environment)?;
//!
//!     for (key, value) in &outcome.properties {
//!         println!("{key}={value}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! cloudenv uses the [`domain::CloudEnvError`] type for all errors:
//!
//! ```rust
//! use cloudenv::domain::{CloudEnvError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(CloudEnvError::Configuration("missing host".to_string()))
//! }
//! ```
//!
//! ## Logging
//!
//! cloudenv uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Fetching configuration");
//! warn!(key = "server.port", "Property failed to resolve");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
