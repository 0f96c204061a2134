//! Property pipeline - orchestrates the resolution stages
//!
//! This module wires the four engine stages over a fetched environment:
//! flatten each property source, merge by precedence, resolve placeholders,
//! and format for output. Each stage is a pure transformation; the pipeline
//! only sequences them and aggregates best-effort failures.

use crate::core::flatten::{FlatMap, Flattener};
use crate::core::format::{format_properties, PropertyFormatter};
use crate::core::merge::merge_sources;
use crate::core::resolve::{PropertyFailure, Resolver};
use crate::domain::{Environment, Result};

/// The final output of a pipeline run
#[derive(Debug)]
pub struct PipelineOutcome {
    /// The resolved, formatted property map
    pub properties: FlatMap,
    /// Failures recorded in best-effort mode (empty in fail-fast mode)
    pub failures: Vec<PropertyFailure>,
}

impl PipelineOutcome {
    /// Whether every property survived resolution and formatting
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs an environment document through flatten, merge, resolve, and format
///
/// The pipeline owns the stage configuration; collaborators construct it
/// once and feed it environments. Stages never mutate their inputs, so one
/// pipeline may process multiple environments.
///
/// # Example
///
/// ```
/// use cloudenv::core::{EnvFormatter, Flattener, PropertyPipeline, Resolver};
/// use cloudenv::domain::Environment;
///
/// let env: Environment = serde_json::from_str(
///     r#"{
///         "name": "app",
///         "profiles": ["dev"],
///         "propertySources": [
///             {"name": "file://app.yml", "source": {"greeting": "hi ${who}"}},
///             {"name": "file://defaults.yml", "source": {"who": "world"}}
///         ]
///     }"#,
/// ).unwrap();
///
/// let pipeline = PropertyPipeline::new(
///     Flattener::new(),
///     Resolver::default(),
///     Box::new(EnvFormatter::default()),
/// );
///
/// let outcome = pipeline.process(&env).unwrap();
/// assert_eq!(outcome.properties["GREETING"], "hi world");
/// ```
pub struct PropertyPipeline {
    flattener: Flattener,
    resolver: Resolver,
    formatter: Box<dyn PropertyFormatter>,
    fail_fast: bool,
}

impl PropertyPipeline {
    /// Creates a pipeline from its stage strategies
    ///
    /// The resolver's fail-fast selection also governs the formatting
    /// stage, so a caller choosing best-effort resolution gets best-effort
    /// formatting too.
    pub fn new(
        flattener: Flattener,
        resolver: Resolver,
        formatter: Box<dyn PropertyFormatter>,
    ) -> Self {
        let fail_fast = resolver.is_fail_fast();
        Self {
            flattener,
            resolver,
            formatter,
            fail_fast,
        }
    }

    /// Processes one environment into its final property map
    ///
    /// # Errors
    ///
    /// Returns the first stage error in fail-fast mode: an unsupported
    /// scalar from strict flattening, an unresolved reference or cycle from
    /// resolution, or a transform failure from formatting. In best-effort
    /// mode, per-property failures are collected on the outcome instead.
    pub fn process(&self, environment: &Environment) -> Result<PipelineOutcome> {
        let mut flattened = Vec::with_capacity(environment.property_sources.len());
        for source in &environment.property_sources {
            let flat = self.flattener.flatten(&source.source).map_err(|e| {
                tracing::error!(source = %source.name, error = %e, "Flattening failed");
                e
            })?;
            tracing::debug!(
                source = %source.name,
                properties = flat.len(),
                "Flattened property source"
            );
            flattened.push(flat);
        }

        let merged = merge_sources(&flattened);
        tracing::debug!(
            sources = flattened.len(),
            properties = merged.len(),
            "Merged property sources"
        );

        let resolution = self.resolver.resolve(&merged)?;
        let formatted =
            format_properties(&resolution.properties, self.formatter.as_ref(), self.fail_fast)?;

        let mut failures = resolution.failures;
        failures.extend(formatted.failures);

        tracing::info!(
            environment = %environment.name,
            properties = formatted.properties.len(),
            failures = failures.len(),
            "Resolved environment"
        );

        Ok(PipelineOutcome {
            properties: formatted.properties,
            failures,
        })
    }
}
