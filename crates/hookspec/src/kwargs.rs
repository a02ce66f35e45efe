//! Keyword arguments passed to hooks: an ordered name → value bag.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use hookspec_core::error::{ErrorKind, HookspecError};
use hookspec_core::result::HookspecResult;

/// Keyword arguments keyed by parameter name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kwargs {
    values: IndexMap<String, Value>,
}

impl Kwargs {
    /// Creates an empty argument bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Inserts a value.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a string value.
    pub fn with_string(self, name: &str, value: &str) -> Self {
        self.with(name, value)
    }

    /// Inserts an integer value.
    pub fn with_int(self, name: &str, value: i64) -> Self {
        self.with(name, value)
    }

    /// Inserts a boolean value.
    pub fn with_bool(self, name: &str, value: bool) -> Self {
        self.with(name, value)
    }

    /// Gets a raw value by name.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Deserializes a value into `T`.
    ///
    /// A missing name or a value of the wrong shape is a call error.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> HookspecResult<T> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| HookspecError::call(format!("missing argument '{name}'")))?;

        T::deserialize(value).map_err(|e| {
            HookspecError::with_source(
                ErrorKind::Call,
                format!("argument '{name}' has an unexpected type: {e}"),
                e,
            )
        })
    }

    /// Gets a string value.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_str())
    }

    /// Gets an i64 value.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(|v| v.as_i64())
    }

    /// Gets a bool value.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(|v| v.as_bool())
    }

    /// Returns whether a value is present for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterates over name/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keeps only the arguments whose names appear in `names`.
    pub fn project<S: AsRef<str>>(&self, names: &[S]) -> Kwargs {
        self.values
            .iter()
            .filter(|(key, _)| names.iter().any(|n| n.as_ref() == key.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl FromIterator<(String, Value)> for Kwargs {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<IndexMap<String, Value>> for Kwargs {
    fn from(values: IndexMap<String, Value>) -> Self {
        Self { values }
    }
}
