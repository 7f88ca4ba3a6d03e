//! Dynamically typed property values.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::instance::Instance;
use crate::value_object::HostValue;

/// A primitive as produced by coercion; compared with strict equality.
///
/// Numbers follow IEEE semantics: `NaN` never equals itself, `0.0 == -0.0`.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Bool(bool),
    Number(f64),
    String(Arc<str>),
}

/// A resolved property value.
#[derive(Debug, Clone)]
pub enum Value {
    /// No value at all. Omitted from JSON projections.
    Absent,
    /// Explicit null. Projected as `null`.
    Null,
    Bool(bool),
    Number(f64),
    String(Arc<str>),
    /// Date-like value, compared through its epoch milliseconds.
    Date(DateTime<Utc>),
    /// A nested value-class instance.
    Object(Instance),
    /// A plain JSON container (array or object). Shared, not deep-frozen.
    Json(Arc<serde_json::Value>),
    /// A user-defined value with optional capabilities.
    Custom(Arc<dyn HostValue>),
}

impl Value {
    /// Wrap a user type.
    pub fn custom(value: impl HostValue) -> Self {
        Self::Custom(Arc::new(value))
    }

    /// Convert a JSON document; scalars become native variants.
    pub fn from_json(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => n.as_f64().map(Self::Number).unwrap_or(Self::Null),
            Json::String(s) => Self::String(s.into()),
            container => Self::Json(Arc::new(container)),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Self::Object(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(j) => Some(j),
            _ => None,
        }
    }

    /// The primitive this value already is, if any.
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Self::Bool(b) => Some(Primitive::Bool(*b)),
            Self::Number(n) => Some(Primitive::Number(*n)),
            Self::String(s) => Some(Primitive::String(s.clone())),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::Object(_) => "object",
            Self::Json(_) => "json",
            Self::Custom(_) => "custom",
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i32, i64, u32, u64, usize);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value.into())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<Instance> for Value {
    fn from(value: Instance) -> Self {
        Self::Object(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Self::from_json(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}
