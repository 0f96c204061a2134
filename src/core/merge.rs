//! Precedence merge of flattened property sources
//!
//! The environment lists sources most-specific first (a profile-specific
//! file precedes the shared defaults file). Merging iterates the list in
//! reverse so that later assignments overwrite earlier ones and the value
//! from the lowest-index source containing a key wins.

use crate::core::flatten::FlatMap;

/// Merges ordered flattened sources into one map
///
/// Index 0 of `sources` is the most specific source and has the highest
/// precedence. Empty sources are no-ops. Never fails.
///
/// # Example
///
/// ```
/// use cloudenv::core::merge_sources;
/// use std::collections::BTreeMap;
///
/// let specific = BTreeMap::from([("port".to_string(), "9090".to_string())]);
/// let defaults = BTreeMap::from([
///     ("port".to_string(), "8080".to_string()),
///     ("host".to_string(), "localhost".to_string()),
/// ]);
///
/// let merged = merge_sources(&[specific, defaults]);
/// assert_eq!(merged["port"], "9090");
/// assert_eq!(merged["host"], "localhost");
/// ```
pub fn merge_sources(sources: &[FlatMap]) -> FlatMap {
    let mut merged = FlatMap::new();
    for source in sources.iter().rev() {
        for (key, value) in source {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
