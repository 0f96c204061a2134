//! Core resolution engine for cloudenv.
//!
//! This module contains the pure transformation pipeline that turns a
//! fetched environment document into a flat map of resolved properties.
//!
//! # Modules
//!
//! - [`flatten`] - Nested value bags to dot-joined path keys
//! - [`merge`] - Precedence merge of the ordered sources
//! - [`resolve`] - Placeholder substitution with defaults and cycle detection
//! - [`format`] - Key and value output transforms
//! - [`pipeline`] - Stage orchestration over one environment
//!
//! # Resolution Workflow
//!
//! 1. **Flatten**: Each property source's nested bag becomes one flat map
//! 2. **Merge**: The ordered flat maps collapse into one, most specific wins
//! 3. **Resolve**: `${key}` and `${key:default}` expressions are expanded
//! 4. **Format**: A key/value transform shapes the final output
//!
//! Every stage is a deterministic pure function over in-memory structures;
//! none perform I/O and none mutate their inputs.
//!
//! # Example
//!
//! ```
//! use cloudenv::core::{Flattener, IdentityFormatter, PropertyPipeline, Resolver};
//! use cloudenv::domain::Environment;
//!
//! let env: Environment = serde_json::from_str(
//!     r#"{
//!         "name": "app",
//!         "profiles": ["dev"],
//!         "propertySources": [
//!             {"name": "file://app.yml", "source": {"x.y": "${z}"}},
//!             {"name": "file://defaults.yml", "source": {"z": "5"}}
//!         ]
//!     }"#,
//! ).unwrap();
//!
//! let pipeline = PropertyPipeline::new(
//!     Flattener::new(),
//!     Resolver::default(),
//!     Box::new(IdentityFormatter),
//! );
//!
//! let outcome = pipeline.process(&env).unwrap();
//! assert_eq!(outcome.properties["x.y"], "5");
//! ```

pub mod flatten;
pub mod format;
pub mod merge;
pub mod pipeline;
pub mod resolve;

// Re-export the engine surface for convenience
pub use flatten::{FlatMap, Flattener};
pub use format::{format_properties, EnvFormatter, Formatted, IdentityFormatter, PropertyFormatter};
pub use merge::merge_sources;
pub use pipeline::{PipelineOutcome, PropertyPipeline};
pub use resolve::{PropertyFailure, Resolution, Resolver};
