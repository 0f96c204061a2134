//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output on stderr, keeping stdout free for property output
//! - Optional JSON-formatted local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use cloudenv::logging::init_logging;
//! use cloudenv::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Client started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};
