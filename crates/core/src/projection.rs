//! JSON projection of instances.

use chrono::SecondsFormat;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value as Json};

use crate::instance::Instance;
use crate::value::{Primitive, Value};

// 2^63 and 2^64, both exact in f64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

/// Integral numbers are written as JSON integers while they fit `i64` or
/// `u64`, so `1e19` prints in full. Anything larger, and any fraction, is
/// written as a float, which `serde_json` may print in exponent form
/// (`1e20`). Non-finite is `null`.
fn number(n: f64) -> Json {
    if n.is_finite() && n.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&n) {
        Json::from(n as i64)
    } else if n.is_finite() && n.fract() == 0.0 && (0.0..U64_BOUND).contains(&n) {
        Json::from(n as u64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Json::Number)
            .unwrap_or(Json::Null)
    }
}

fn primitive(p: Primitive) -> Json {
    match p {
        Primitive::Bool(b) => Json::Bool(b),
        Primitive::Number(n) => number(n),
        Primitive::String(s) => Json::String(s.to_string()),
    }
}

impl Value {
    /// JSON form of this value; `None` for [`Value::Absent`].
    ///
    /// Nested instances project recursively, dates as ISO-8601 UTC with
    /// millisecond precision. Custom values use their `to_json` hook, then
    /// their coerced primitive, then `null`.
    pub fn to_json(&self) -> Option<Json> {
        let json = match self {
            Value::Absent => return None,
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => number(*n),
            Value::String(s) => Json::String(s.to_string()),
            Value::Date(d) => Json::String(d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::Object(i) => Json::Object(i.to_json()),
            Value::Json(j) => (**j).clone(),
            Value::Custom(h) => h
                .to_json()
                .or_else(|| h.value_of().map(primitive))
                .unwrap_or(Json::Null),
        };
        Some(json)
    }
}

impl Instance {
    /// Snapshot of the resolved fields in declaration order, absent ones
    /// omitted.
    pub fn to_json(&self) -> Map<String, Json> {
        self.entries()
            .filter_map(|(k, v)| v.to_json().map(|j| (k.to_string(), j)))
            .collect()
    }

    pub fn to_json_value(&self) -> Json {
        Json::Object(self.to_json())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Object(i) => i.serialize(serializer),
            other => other.to_json().unwrap_or(Json::Null).serialize(serializer),
        }
    }
}

impl Serialize for Instance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present = self.values().filter(|v| !v.is_absent()).count();
        let mut map = serializer.serialize_map(Some(present))?;
        for (k, v) in self.entries().filter(|(_, v)| !v.is_absent()) {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
