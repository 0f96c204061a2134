//! Structural flattening of property sources
//!
//! This module converts one raw, possibly-nested [`ValueBag`] into a flat
//! mapping from dot-joined path to the scalar's canonical string form.
//!
//! Canonical scalar rendering (fixed, see the tests):
//! - strings render as themselves
//! - booleans render as `true` / `false`
//! - integers render as plain decimal
//! - floats render in the shortest form that round-trips, so an integral
//!   float `100.0` renders as `"100"` and `123.123` as `"123.123"`

use crate::domain::{CloudEnvError, PropertyValue, Result, ValueBag};
use std::collections::BTreeMap;

/// Flat mapping from dot-joined path to string-coerced scalar value
///
/// Produced per property source, then merged across sources. Keys are
/// unique within one map and no nested structure remains.
pub type FlatMap = BTreeMap<String, String>;

/// Converts nested value bags into [`FlatMap`]s
///
/// In the default lenient mode flattening never fails: values that can't be
/// coerced to a string (e.g. JSON arrays) are dropped with a warning. In
/// strict mode the same values fail with
/// [`CloudEnvError::UnsupportedScalar`] instead.
///
/// # Example
///
/// ```
/// use cloudenv::core::Flattener;
/// use cloudenv::domain::ValueBag;
///
/// let bag: ValueBag = serde_json::from_str(
///     r#"{"server": {"port": 8080}, "debug": false}"#,
/// ).unwrap();
///
/// let flat = Flattener::new().flatten(&bag).unwrap();
/// assert_eq!(flat["server.port"], "8080");
/// assert_eq!(flat["debug"], "false");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Flattener {
    strict: bool,
}

impl Flattener {
    /// Creates a lenient flattener that drops unsupported values
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Creates a strict flattener that reports unsupported values
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Flattens a value bag into dot-joined path keys
    ///
    /// # Errors
    ///
    /// Returns [`CloudEnvError::UnsupportedScalar`] in strict mode when the
    /// bag contains a value that can't be coerced to a string. Never fails
    /// in lenient mode.
    pub fn flatten(&self, bag: &ValueBag) -> Result<FlatMap> {
        let mut out = FlatMap::new();
        self.flatten_into(None, bag, &mut out)?;
        Ok(out)
    }

    fn flatten_into(&self, prefix: Option<&str>, bag: &ValueBag, out: &mut FlatMap) -> Result<()> {
        for (key, value) in bag {
            let path = match prefix {
                Some(prefix) => format!("{prefix}.{key}"),
                None => key.clone(),
            };
            match value {
                PropertyValue::Nested(inner) => self.flatten_into(Some(&path), inner, out)?,
                PropertyValue::String(s) => {
                    out.insert(path, s.clone());
                }
                PropertyValue::Bool(b) => {
                    out.insert(path, b.to_string());
                }
                PropertyValue::Int(i) => {
                    out.insert(path, i.to_string());
                }
                PropertyValue::Float(f) => {
                    out.insert(path, render_float(*f));
                }
                PropertyValue::Unsupported(_) => {
                    if self.strict {
                        return Err(CloudEnvError::UnsupportedScalar { key: path });
                    }
                    tracing::warn!(
                        key = %path,
                        "Dropping property that can't be coerced to a string"
                    );
                }
            }
        }
        Ok(())
    }
}

/// Renders a float in its canonical property form
///
/// Rust's `f64` Display already produces the shortest string that parses
/// back to the same value, which makes integral floats render without a
/// decimal point.
fn render_float(value: f64) -> String {
    value.to_string()
}
