//! Output formatting of resolved properties
//!
//! The final stage applies a caller-supplied key transform and value
//! transform to every entry of the resolved map. The engine ships two
//! implementations: an identity passthrough and the environment-variable
//! convention (dot-to-separator keys, uppercase, newline-stripped values).

use crate::core::flatten::FlatMap;
use crate::core::resolve::PropertyFailure;
use crate::domain::{CloudEnvError, Result};

/// Key and value transforms applied to the resolved map
///
/// Both transforms are pure. The provided implementations never fail, but a
/// caller-supplied one may; its failures surface as
/// [`CloudEnvError::Formatting`] for the entry being formatted.
pub trait PropertyFormatter {
    /// Transforms one property key
    fn format_key(&self, key: &str) -> Result<String>;

    /// Transforms one property value
    fn format_value(&self, value: &str) -> Result<String>;
}

/// Passthrough formatter used when the caller supplies none
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFormatter;

impl PropertyFormatter for IdentityFormatter {
    fn format_key(&self, key: &str) -> Result<String> {
        Ok(key.to_string())
    }

    fn format_value(&self, value: &str) -> Result<String> {
        Ok(value.to_string())
    }
}

/// Environment-variable output convention
///
/// Keys have every dot replaced by the separator and are optionally
/// uppercased; values have CR/LF sequences stripped so multi-line
/// properties survive as single environment-variable values.
///
/// # Example
///
/// ```
/// use cloudenv::core::{EnvFormatter, PropertyFormatter};
///
/// let formatter = EnvFormatter::default();
/// assert_eq!(formatter.format_key("bill-to.given").unwrap(), "BILL-TO_GIVEN");
/// assert_eq!(formatter.format_value("line1\nline2").unwrap(), "line1line2");
/// ```
#[derive(Debug, Clone)]
pub struct EnvFormatter {
    /// Replacement for the dot path separator
    pub separator: String,
    /// Whether keys are uppercased
    pub uppercase: bool,
}

impl Default for EnvFormatter {
    fn default() -> Self {
        Self {
            separator: "_".to_string(),
            uppercase: true,
        }
    }
}

impl PropertyFormatter for EnvFormatter {
    fn format_key(&self, key: &str) -> Result<String> {
        let key = key.replace('.', &self.separator);
        Ok(if self.uppercase {
            key.to_uppercase()
        } else {
            key
        })
    }

    fn format_value(&self, value: &str) -> Result<String> {
        Ok(value.replace("\r\n", "").replace('\n', ""))
    }
}

/// The outcome of a formatting pass
#[derive(Debug)]
pub struct Formatted {
    /// The map with both transforms applied
    pub properties: FlatMap,
    /// Per-key failures collected in best-effort mode
    pub failures: Vec<PropertyFailure>,
}

/// Applies a formatter to every entry of the resolved map
///
/// # Errors
///
/// In fail-fast mode the first transform failure aborts formatting of the
/// remaining map. In best-effort mode failures are recorded and the
/// offending entries are left out of the output.
pub fn format_properties(
    map: &FlatMap,
    formatter: &dyn PropertyFormatter,
    fail_fast: bool,
) -> Result<Formatted> {
    let mut properties = FlatMap::new();
    let mut failures = Vec::new();

    for (key, value) in map {
        match format_entry(key, value, formatter) {
            Ok((formatted_key, formatted_value)) => {
                properties.insert(formatted_key, formatted_value);
            }
            Err(error) => {
                if fail_fast {
                    return Err(error);
                }
                tracing::warn!(key = %key, error = %error, "Skipping property that failed to format");
                failures.push(PropertyFailure {
                    key: key.clone(),
                    error,
                });
            }
        }
    }

    Ok(Formatted {
        properties,
        failures,
    })
}

fn format_entry(
    key: &str,
    value: &str,
    formatter: &dyn PropertyFormatter,
) -> Result<(String, String)> {
    let formatted_key = formatter.format_key(key).map_err(|e| formatting_error(key, e))?;
    let formatted_value = formatter
        .format_value(value)
        .map_err(|e| formatting_error(key, e))?;
    Ok((formatted_key, formatted_value))
}

fn formatting_error(key: &str, error: CloudEnvError) -> CloudEnvError {
    match error {
        // Already carries the key and message
        err @ CloudEnvError::Formatting { .. } => err,
        other => CloudEnvError::Formatting {
            key: key.to_string(),
            message: other.to_string(),
        },
    }
}
