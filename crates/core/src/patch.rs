//! Explicit property overrides.

use crate::error::{ValueError, ValueResult};
use crate::value::Value;

/// An ordered key→value mapping of explicit overrides.
///
/// Keys are unique; inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default)]
pub struct Patch {
    entries: Vec<(String, Value)>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key-wise union; `other` wins on conflicts.
    pub fn merged(&self, other: &Patch) -> Patch {
        let mut out = self.clone();
        for (k, v) in other.iter() {
            out.insert(k, v.clone());
        }
        out
    }

    /// Build a patch from a JSON object.
    pub fn from_json(json: serde_json::Value) -> ValueResult<Self> {
        match json {
            serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(ValueError::invalid_patch(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Patch {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut patch = Patch::new();
        for (k, v) in iter {
            patch.insert(k, v);
        }
        patch
    }
}

impl<K: Into<String>, V: Into<Value>> From<Vec<(K, V)>> for Patch {
    fn from(entries: Vec<(K, V)>) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Patch {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl From<()> for Patch {
    fn from(_: ()) -> Self {
        Patch::new()
    }
}

impl TryFrom<serde_json::Value> for Patch {
    type Error = ValueError;

    fn try_from(json: serde_json::Value) -> ValueResult<Self> {
        Patch::from_json(json)
    }
}

/// Build a [`Patch`] from `key => value` pairs of mixed value types.
///
/// ```ignore
/// let p = patch! { "someNum" => 13, "someBool" => false };
/// ```
#[macro_export]
macro_rules! patch {
    () => {
        $crate::Patch::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Patch::new()$(.with($key, $value))+
    };
}
