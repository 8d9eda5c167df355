//! Typed access to raw configuration strings.
//!
//! A [`Value`] wraps one string and decodes it on demand. Each decoder has a
//! convenience form that returns the type's zero value on failure and a
//! `try_*` form that reports the failure.

use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::path::Path;

/// Errors from the `try_*` decoders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("Invalid integer: {0:?}")]
    InvalidInt(String),

    #[error("Invalid float: {0:?}")]
    InvalidFloat(String),

    #[error("Invalid boolean: {0:?}")]
    InvalidBool(String),
}

/// An immutable configuration string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value(String);

impl Value {
    pub fn new(raw: impl Into<String>) -> Self {
        Value(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decimal integer, `0` on failure.
    pub fn int(&self) -> i64 {
        self.try_int().unwrap_or(0)
    }

    pub fn try_int(&self) -> Result<i64, ValueError> {
        self.0
            .parse()
            .map_err(|_| ValueError::InvalidInt(self.0.clone()))
    }

    /// Single-precision float, `0.0` on failure.
    pub fn float(&self) -> f32 {
        self.try_float().unwrap_or(0.0)
    }

    pub fn try_float(&self) -> Result<f32, ValueError> {
        self.0
            .parse()
            .map_err(|_| ValueError::InvalidFloat(self.0.clone()))
    }

    /// Boolean, `false` on failure.
    ///
    /// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
    pub fn bool(&self) -> bool {
        self.try_bool().unwrap_or(false)
    }

    pub fn try_bool(&self) -> Result<bool, ValueError> {
        match self.0.as_str() {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(ValueError::InvalidBool(self.0.clone())),
        }
    }

    /// The string as a [`Path`], unvalidated.
    pub fn path(&self) -> Path {
        Path::new(self.0.clone())
    }

    /// Split on a literal separator.
    ///
    /// An empty remainder after the last separator is dropped, so `""` gives
    /// no elements and `"a,"` gives one. An empty separator yields the whole
    /// string as the single element.
    ///
    /// ```
    /// use fpath::Value;
    /// assert_eq!(Value::new("1 2").array(" "), vec![Value::new("1"), Value::new("2")]);
    /// assert!(Value::new("").array(" ").is_empty());
    /// ```
    pub fn array(&self, sep: &str) -> Vec<Value> {
        if self.0.is_empty() {
            return Vec::new();
        }
        if sep.is_empty() {
            return vec![self.clone()];
        }
        let mut parts: Vec<Value> = self.0.split(sep).map(Value::new).collect();
        if parts.last().is_some_and(Value::is_empty) {
            parts.pop();
        }
        parts
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Value {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value(s)
    }
}

/// Key-unique map of values produced by the KV loader.
///
/// Lookups distinguish a missing key (`None`) from a present empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMap(HashMap<String, Value>);

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Convenience lookup returning the raw string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Key/value pairs sorted by key.
    pub fn sorted(&self) -> Vec<(&str, &Value)> {
        let mut pairs: Vec<_> = self.0.iter().map(|(k, v)| (k.as_str(), v)).collect();
        pairs.sort_by_key(|(k, _)| *k);
        pairs
    }

    pub fn into_inner(self) -> HashMap<String, Value> {
        self.0
    }

    /// Insert during loading; later writes win.
    pub(crate) fn insert(&mut self, key: String, value: Value) {
        self.0.insert(key, value);
    }
}

impl<'a> IntoIterator for &'a ValueMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ValueMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array() {
        assert_eq!(Value::new("1").array(" "), vec![Value::new("1")]);
        assert_eq!(
            Value::new("1 2").array(" "),
            vec![Value::new("1"), Value::new("2")]
        );
        assert!(Value::new("").array(" ").is_empty());
        assert_eq!(Value::new("a,").array(","), vec![Value::new("a")]);
        assert_eq!(
            Value::new("a,,b").array(","),
            vec![Value::new("a"), Value::new(""), Value::new("b")]
        );
        assert_eq!(
            Value::new("x::y").array("::"),
            vec![Value::new("x"), Value::new("y")]
        );
        assert_eq!(Value::new("a.b").array("."), vec![Value::new("a"), Value::new("b")]);
        assert_eq!(Value::new("abc").array(""), vec![Value::new("abc")]);
    }

    #[test]
    fn test_int() {
        assert_eq!(Value::new("42").int(), 42);
        assert_eq!(Value::new("-7").int(), -7);
        assert_eq!(Value::new("4x").int(), 0);
        assert_eq!(Value::new("").int(), 0);
        assert_eq!(Value::new("0").try_int(), Ok(0));
        assert_eq!(
            Value::new("4x").try_int(),
            Err(ValueError::InvalidInt("4x".to_string()))
        );
    }

    #[test]
    fn test_float() {
        assert_eq!(Value::new("1.5").float(), 1.5);
        assert_eq!(Value::new("1e3").float(), 1000.0);
        assert_eq!(Value::new("abc").float(), 0.0);
        assert!(Value::new("abc").try_float().is_err());
    }

    #[test]
    fn test_bool() {
        for t in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(Value::new(t).bool(), "{t} should be true");
        }
        for f in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(Value::new(f).try_bool(), Ok(false));
        }
        assert!(!Value::new("yes").bool());
        assert!(Value::new("yes").try_bool().is_err());
    }

    #[test]
    fn test_path() {
        assert_eq!(Value::new("/etc/hosts").path().base(), "hosts");
    }

    #[test]
    fn test_map_missing_vs_empty() {
        let map: ValueMap = [("empty", "")].into_iter().collect();
        assert_eq!(map.get("empty"), Some(&Value::new("")));
        assert_eq!(map.get("absent"), None);
        assert!(map.contains_key("empty"));
    }

    #[test]
    fn test_map_sorted() {
        let map: ValueMap = [("b", "2"), ("a", "1")].into_iter().collect();
        let keys: Vec<&str> = map.sorted().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
