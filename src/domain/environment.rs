//! Environment document model
//!
//! This module defines the passive data structures for a fetched Spring Cloud
//! Config environment: the document metadata, its ordered property sources,
//! and the heterogeneous value bags they carry.
//!
//! The model is immutable once parsed. JSON `null` values are dropped during
//! deserialization and never reach the flattener. Field casing differs across
//! historical server versions (`propertySources` vs `PropertySources`), so
//! deserialization accepts both.

use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A fetched environment document
///
/// Represents the full response of the config server for one
/// `{name}/{profiles}/{label}` request: document metadata plus an ordered
/// list of property sources. Source order is meaningful - index 0 is the
/// most specific source and has the highest precedence when merging.
///
/// # Example
///
/// ```
/// use cloudenv::domain::Environment;
///
/// let env: Environment = serde_json::from_str(
///     r#"{
///         "name": "app",
///         "profiles": ["dev"],
///         "label": "main",
///         "propertySources": [
///             {"name": "file://app-dev.yml", "source": {"server.port": 8080}}
///         ]
///     }"#,
/// ).unwrap();
///
/// assert_eq!(env.name, "app");
/// assert_eq!(env.property_sources.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    /// Application name the document was requested for
    #[serde(alias = "Name")]
    pub name: String,

    /// Active profiles, in the order the server reports them
    #[serde(default, alias = "Profiles")]
    pub profiles: Vec<String>,

    /// Branch or tag the configuration was read from
    #[serde(default, alias = "Label")]
    pub label: Option<String>,

    /// Opaque version metadata (e.g. a commit hash), passed through untouched
    #[serde(default, alias = "Version")]
    pub version: Option<String>,

    /// Opaque state metadata, passed through untouched
    #[serde(default, alias = "State")]
    pub state: Option<String>,

    /// Ordered property sources; index 0 has the highest precedence
    #[serde(
        default,
        rename = "propertySources",
        alias = "PropertySources"
    )]
    pub property_sources: Vec<PropertySource>,
}

/// One named contributor to the final configuration
///
/// The name identifies provenance (typically a file URI on the config
/// server's backend); the source is a possibly-nested bag of values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySource {
    /// Provenance identifier, e.g. `file://application-dev.yml`
    #[serde(alias = "Name")]
    pub name: String,

    /// The raw value bag of this source
    #[serde(default, alias = "Source")]
    pub source: ValueBag,
}

/// A bag of named values, possibly nested
///
/// Keys map to [`PropertyValue`]s. JSON `null` entries are discarded during
/// deserialization, matching the server convention that a null property is
/// an absent property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueBag(BTreeMap<String, PropertyValue>);

impl ValueBag {
    /// Creates an empty bag
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Number of entries at this nesting level
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bag has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Looks up a value at this nesting level
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    /// Inserts a value, replacing any existing entry for the key
    pub fn insert(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.0.insert(key.into(), value);
    }

    /// Iterates the entries at this nesting level
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropertyValue)> {
        self.0.iter()
    }

    /// Builds a bag from a raw JSON object, dropping null entries
    fn from_json_map(map: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut bag = BTreeMap::new();
        for (key, value) in map {
            if let Some(value) = PropertyValue::from_json(value) {
                bag.insert(key, value);
            }
        }
        Self(bag)
    }
}

impl<'a> IntoIterator for &'a ValueBag {
    type Item = (&'a String, &'a PropertyValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, PropertyValue)> for ValueBag {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for ValueBag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Object(map) => Ok(Self::from_json_map(map)),
            other => Err(D::Error::custom(format!(
                "property source must be a JSON object, got {other}"
            ))),
        }
    }
}

impl Serialize for ValueBag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v.to_json())))
    }
}

/// A single value inside a [`ValueBag`]
///
/// A closed union of the scalar kinds the config server emits plus nested
/// bags. Integers are kept distinct from floats so that the flattener can
/// render each canonically. Shapes the engine cannot coerce (JSON arrays)
/// are carried as [`PropertyValue::Unsupported`] so strict flattening can
/// report them instead of silently losing them.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// A string scalar
    String(String),
    /// A boolean scalar
    Bool(bool),
    /// An integer scalar
    Int(i64),
    /// A floating-point scalar
    Float(f64),
    /// A nested bag of values
    Nested(ValueBag),
    /// A value the engine cannot coerce to a property string
    Unsupported(serde_json::Value),
}

impl PropertyValue {
    /// Converts a raw JSON value into a property value
    ///
    /// Returns `None` for JSON `null`, which the model discards.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(Self::String(s)),
            serde_json::Value::Bool(b) => Some(Self::Bool(b)),
            serde_json::Value::Number(n) => Some(
                n.as_i64()
                    .map(Self::Int)
                    .or_else(|| n.as_f64().map(Self::Float))
                    .unwrap_or_else(|| Self::Unsupported(serde_json::Value::Number(n))),
            ),
            serde_json::Value::Object(map) => Some(Self::Nested(ValueBag::from_json_map(map))),
            array @ serde_json::Value::Array(_) => Some(Self::Unsupported(array)),
        }
    }

    /// Converts back to a raw JSON value, used when echoing the document
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::Number((*i).into()),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::Nested(bag) => {
                serde_json::Value::Object(bag.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
            }
            Self::Unsupported(value) => value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_environment_lowercase() {
        let env: Environment = serde_json::from_value(json!({
            "name": "app",
            "profiles": ["dev", "cloud"],
            "label": "main",
            "version": "f65dfb395b177a3eac3bc29d3c3829e47543dcb2",
            "state": null,
            "propertySources": [
                {"name": "file://app.yml", "source": {"a": "1"}}
            ]
        }))
        .unwrap();

        assert_eq!(env.name, "app");
        assert_eq!(env.profiles, vec!["dev", "cloud"]);
        assert_eq!(env.label.as_deref(), Some("main"));
        assert!(env.state.is_none());
        assert_eq!(env.property_sources.len(), 1);
        assert_eq!(env.property_sources[0].name, "file://app.yml");
    }

    #[test]
    fn test_deserialize_environment_capitalized() {
        // Older servers capitalize every field
        let env: Environment = serde_json::from_value(json!({
            "Name": "test",
            "Profiles": ["dev"],
            "Label": "master",
            "Version": "abc",
            "State": null,
            "PropertySources": [
                {"Name": "file://test.yml", "Source": {"x": true}}
            ]
        }))
        .unwrap();

        assert_eq!(env.name, "test");
        assert_eq!(env.property_sources.len(), 1);
        assert_eq!(
            env.property_sources[0].source.get("x"),
            Some(&PropertyValue::Bool(true))
        );
    }

    #[test]
    fn test_value_bag_drops_nulls() {
        let bag: ValueBag = serde_json::from_value(json!({
            "bool": true,
            "float": 123.123,
            "int": 123,
            "string": "test",
            "nothing": null
        }))
        .unwrap();

        assert_eq!(bag.len(), 4);
        assert_eq!(bag.get("string"), Some(&PropertyValue::String("test".to_string())));
        assert_eq!(bag.get("bool"), Some(&PropertyValue::Bool(true)));
        assert_eq!(bag.get("int"), Some(&PropertyValue::Int(123)));
        assert_eq!(bag.get("float"), Some(&PropertyValue::Float(123.123)));
        assert!(bag.get("nothing").is_none());
    }

    #[test]
    fn test_value_bag_nested() {
        let bag: ValueBag = serde_json::from_value(json!({
            "server": {"port": 8080, "host": "localhost"}
        }))
        .unwrap();

        match bag.get("server") {
            Some(PropertyValue::Nested(inner)) => {
                assert_eq!(inner.get("port"), Some(&PropertyValue::Int(8080)));
                assert_eq!(
                    inner.get("host"),
                    Some(&PropertyValue::String("localhost".to_string()))
                );
            }
            other => panic!("expected nested bag, got {other:?}"),
        }
    }

    #[test]
    fn test_value_bag_keeps_arrays_as_unsupported() {
        let bag: ValueBag = serde_json::from_value(json!({"list": [1, 2, 3]})).unwrap();

        assert!(matches!(bag.get("list"), Some(PropertyValue::Unsupported(_))));
    }

    #[test]
    fn test_value_bag_rejects_non_object() {
        let result: Result<ValueBag, _> = serde_json::from_value(json!([1, 2, 3]));
        assert!(result.is_err());
    }

    #[test]
    fn test_value_bag_round_trips_through_json() {
        let original = json!({
            "string": "test",
            "bool": false,
            "int": 7,
            "nested": {"inner": "x"}
        });

        let bag: ValueBag = serde_json::from_value(original.clone()).unwrap();
        let echoed = serde_json::to_value(&bag).unwrap();
        assert_eq!(echoed, original);
    }
}
