//! Domain models and types for cloudenv.
//!
//! This module contains the core domain models, types, and business rules.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **The environment document model** ([`Environment`], [`PropertySource`],
//!   [`ValueBag`], [`PropertyValue`])
//! - **Error types** ([`CloudEnvError`], [`ServerError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, CloudEnvError>`]:
//!
//! ```
//! use cloudenv::domain::{CloudEnvError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(CloudEnvError::Configuration("missing host".to_string()))
//! }
//! ```

pub mod environment;
pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use environment::{Environment, PropertySource, PropertyValue, ValueBag};
pub use errors::{CloudEnvError, ServerError};
pub use result::Result;
