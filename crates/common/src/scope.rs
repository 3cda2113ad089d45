//! Ambient per-invocation context supplied by the host.
//!
//! Both types are read-only from the point of view of the enrichment stages
//! and are handed in as `Option<&_>`: either may be absent for any given
//! record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The logged scope of the currently running invocation.
///
/// Values keep the type the logging integration wrote them with (string,
/// integer, ...). [`AmbientScope::get_str`] renders any scalar as a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmbientScope(HashMap<String, Value>);

impl AmbientScope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up `key` and render scalar values as a string.
    ///
    /// Returns `None` for missing keys, `null`, arrays and objects.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Look up `key` as an integer. Numeric strings are accepted.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for AmbientScope {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Tags of the currently active distributed-trace span, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityTags(Vec<(String, String)>);

impl ActivityTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag. Duplicate keys are kept; later ones are applied last.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ActivityTags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_render_as_strings() {
        let scope: AmbientScope = [
            ("s", json!("text")),
            ("n", json!(7)),
            ("b", json!(true)),
            ("null", Value::Null),
            ("obj", json!({"a": 1})),
        ]
        .into_iter()
        .collect();

        assert_eq!(scope.get_str("s").as_deref(), Some("text"));
        assert_eq!(scope.get_str("n").as_deref(), Some("7"));
        assert_eq!(scope.get_str("b").as_deref(), Some("true"));
        assert_eq!(scope.get_str("null"), None);
        assert_eq!(scope.get_str("obj"), None);
        assert_eq!(scope.get_str("missing"), None);
    }

    #[test]
    fn integers_from_numbers_and_strings() {
        let mut scope = AmbientScope::new();
        scope.insert("a", 12);
        scope.insert("b", " 34 ");
        scope.insert("c", "x");
        assert_eq!(scope.get_i64("a"), Some(12));
        assert_eq!(scope.get_i64("b"), Some(34));
        assert_eq!(scope.get_i64("c"), None);
    }

    #[test]
    fn activity_tags_keep_order() {
        let tags: ActivityTags = [("b", "2"), ("a", "1"), ("b", "3")].into_iter().collect();
        let seen: Vec<_> = tags.iter().collect();
        assert_eq!(seen, vec![("b", "2"), ("a", "1"), ("b", "3")]);
    }

    #[test]
    fn activity_tags_wire_shape_is_pairs() {
        let tags: ActivityTags = serde_json::from_str(r#"[["Name","Fn"],["x","y"]]"#).unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.iter().next(), Some(("Name", "Fn")));
    }
}
