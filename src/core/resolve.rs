//! Placeholder resolution over the merged property map
//!
//! Every value in the merged map may embed `${key}` or `${key:default}`
//! expressions referencing other keys of the same map. Resolution splices
//! the referenced value (or the default literal) in place of the whole
//! expression and re-scans the value from the start, so references expand
//! transitively. A per-value step bound turns reference cycles into
//! [`CloudEnvError::CycleDetected`] instead of non-termination.
//!
//! The opener, closer, and default-separator tokens are configuration, not
//! constants, so alternate delimiter conventions work without code changes.

use crate::core::flatten::FlatMap;
use crate::domain::{CloudEnvError, Result};

/// Default placeholder opener token
pub const DEFAULT_OPENER: &str = "${";

/// Default placeholder closer token
pub const DEFAULT_CLOSER: &str = "}";

/// Default separator between a reference key and its default literal
pub const DEFAULT_SEPARATOR: &str = ":";

/// Default bound on substitutions per value before a cycle is assumed
pub const DEFAULT_MAX_STEPS: usize = 64;

/// A per-property failure recorded during best-effort processing
#[derive(Debug)]
pub struct PropertyFailure {
    /// The property whose processing failed
    pub key: String,
    /// Why it failed
    pub error: CloudEnvError,
}

/// The outcome of a resolution pass
///
/// In fail-fast mode a resolver error aborts the pass and no `Resolution`
/// is produced. In best-effort mode every failure is recorded here and the
/// failing key keeps its raw, unresolved value.
#[derive(Debug)]
pub struct Resolution {
    /// The map with all resolvable placeholders substituted
    pub properties: FlatMap,
    /// Per-key failures collected in best-effort mode
    pub failures: Vec<PropertyFailure>,
}

impl Resolution {
    /// Whether every value resolved without failures
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Substitutes placeholder expressions against the merged map
///
/// # Example
///
/// ```
/// use cloudenv::core::Resolver;
/// use std::collections::BTreeMap;
///
/// let map = BTreeMap::from([
///     ("greeting".to_string(), "hello ${name:world}".to_string()),
///     ("banner".to_string(), "** ${greeting} **".to_string()),
///     ("greeting2".to_string(), "hi ${who}".to_string()),
///     ("who".to_string(), "you".to_string()),
/// ]);
///
/// let resolution = Resolver::default().resolve(&map).unwrap();
/// assert_eq!(resolution.properties["greeting"], "hello world");
/// assert_eq!(resolution.properties["banner"], "** hello world **");
/// assert_eq!(resolution.properties["greeting2"], "hi you");
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    opener: String,
    closer: String,
    default_sep: String,
    fail_fast: bool,
    max_steps: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_OPENER, DEFAULT_CLOSER, DEFAULT_SEPARATOR)
    }
}

impl Resolver {
    /// Creates a resolver with the given delimiter tokens
    ///
    /// Defaults to fail-fast mode with [`DEFAULT_MAX_STEPS`] expansion steps
    /// per value.
    pub fn new(
        opener: impl Into<String>,
        closer: impl Into<String>,
        default_sep: impl Into<String>,
    ) -> Self {
        Self {
            opener: opener.into(),
            closer: closer.into(),
            default_sep: default_sep.into(),
            fail_fast: true,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Selects fail-fast (abort on first failure) or best-effort mode
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Overrides the per-value expansion step bound
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Whether the resolver aborts on the first failure
    pub fn is_fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// Resolves every value of the map against the map itself
    ///
    /// # Errors
    ///
    /// In fail-fast mode, returns the first
    /// [`CloudEnvError::UnresolvedReference`] or
    /// [`CloudEnvError::CycleDetected`] encountered. In best-effort mode the
    /// call succeeds and failures are recorded on the [`Resolution`].
    pub fn resolve(&self, map: &FlatMap) -> Result<Resolution> {
        let mut properties = FlatMap::new();
        let mut failures = Vec::new();

        for (key, raw) in map {
            match self.resolve_value(key, raw, map) {
                Ok(value) => {
                    properties.insert(key.clone(), value);
                }
                Err(error) => {
                    if self.fail_fast {
                        return Err(error);
                    }
                    tracing::warn!(
                        key = %key,
                        error = %error,
                        "Keeping raw value for property that failed to resolve"
                    );
                    properties.insert(key.clone(), raw.clone());
                    failures.push(PropertyFailure {
                        key: key.clone(),
                        error,
                    });
                }
            }
        }

        Ok(Resolution {
            properties,
            failures,
        })
    }

    /// Expands all placeholder expressions in one value
    ///
    /// Each substitution re-scans the value from the start, so substituted
    /// text is itself expanded. The step bound converts cycles into errors.
    fn resolve_value(&self, key: &str, raw: &str, map: &FlatMap) -> Result<String> {
        let mut value = raw.to_string();
        let mut steps = 0usize;

        loop {
            let Some(start) = value.find(&self.opener) else {
                return Ok(value);
            };
            let expr_start = start + self.opener.len();
            // An opener without a later closer is plain text, not a
            // placeholder; scanning stops there.
            let Some(closer_offset) = value[expr_start..].find(&self.closer) else {
                return Ok(value);
            };
            let expr_end = expr_start + closer_offset;

            let (ref_key, default) =
                split_expression(&value[expr_start..expr_end], &self.default_sep);

            let replacement = match map.get(ref_key) {
                Some(referenced) => referenced.clone(),
                None => match default {
                    Some(literal) => literal.to_string(),
                    None => {
                        return Err(CloudEnvError::UnresolvedReference {
                            key: ref_key.to_string(),
                            value: raw.to_string(),
                        })
                    }
                },
            };

            steps += 1;
            if steps > self.max_steps {
                return Err(CloudEnvError::CycleDetected {
                    key: key.to_string(),
                    value: raw.to_string(),
                });
            }

            value.replace_range(start..expr_end + self.closer.len(), &replacement);
        }
    }
}

/// Splits a reference expression into key and optional default literal
///
/// The separator only counts beyond the first character of the expression,
/// so a leading separator stays part of the key.
fn split_expression<'a>(expr: &'a str, sep: &str) -> (&'a str, Option<&'a str>) {
    match expr.find(sep) {
        Some(pos) if pos >= 1 => (&expr[..pos], Some(&expr[pos + sep.len()..])),
        _ => (expr, None),
    }
}
