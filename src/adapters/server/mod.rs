//! Spring Cloud Config server adapter
//!
//! This module provides the HTTP client for fetching environment documents
//! and plain-text files from a config server, behind a trait so commands
//! and tests can substitute their own implementation.

pub mod client;

pub use client::{ConfigServer, HttpConfigServer};
