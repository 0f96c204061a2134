//! External system integrations for cloudenv.
//!
//! This module provides the adapter that talks to the Spring Cloud Config
//! server:
//!
//! - [`server`] - HTTP fetch of environment documents and plain-text files
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies
//! and enable testing with mock implementations. The engine itself consumes
//! only in-memory structures; every network concern lives behind the
//! [`server::ConfigServer`] trait.
//!
//! ```rust,no_run
//! use cloudenv::adapters::server::{ConfigServer, HttpConfigServer};
//! use cloudenv::config::{RequestConfig, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpConfigServer::new(ServerConfig::default(), RequestConfig::default())?;
//! let environment = client.fetch_environment().await?;
//! println!("Fetched {} property sources", environment.property_sources.len());
//! # Ok(())
//! # }
//! ```

pub mod server;
