//! Capability traits: how property values take part in equality and projection.
//!
//! The equality engine never inspects concrete types. It asks a value whether
//! it can compare itself structurally ([`ValueEquatable`]) or whether it can be
//! coerced to a comparable primitive ([`ValueComparable`]). Values that offer
//! neither are only ever equal to themselves.
//!
//! ## Built-in capabilities
//!
//! - value-class [`Instance`](crate::Instance)s are `ValueEquatable`
//! - dates are `ValueComparable` (epoch milliseconds)
//! - booleans, numbers and strings coerce to themselves
//!
//! User types plug in through [`HostValue`] and
//! [`Value::custom`](crate::Value::custom).
//!
//! ```ignore
//! #[derive(Debug)]
//! struct Money { cents: i64 }
//!
//! impl HostValue for Money {
//!     fn as_any(&self) -> &dyn Any { self }
//!     fn value_of(&self) -> Option<Primitive> {
//!         Some(Primitive::Number(self.cents as f64))
//!     }
//! }
//!
//! let a = Value::custom(Money { cents: 100 });
//! let b = Value::custom(Money { cents: 100 });
//! assert_eq!(a, b); // equal through coercion
//! ```

use core::any::Any;

use chrono::{DateTime, Utc};

use crate::value::Primitive;

/// Structural equality delegated to the value itself.
pub trait ValueEquatable {
    fn value_equals(&self, other: &Self) -> bool;
}

/// Coercion to a primitive that can be compared with strict equality.
pub trait ValueComparable {
    fn value_of(&self) -> Primitive;
}

impl ValueComparable for DateTime<Utc> {
    fn value_of(&self) -> Primitive {
        Primitive::Number(self.timestamp_millis() as f64)
    }
}

impl ValueComparable for Primitive {
    fn value_of(&self) -> Primitive {
        self.clone()
    }
}

/// A user-defined property type.
///
/// Each capability is optional: returning `None` means the value does not
/// expose it, and the runtime falls through to the next rule.
pub trait HostValue: core::fmt::Debug + Send + Sync + 'static {
    /// Downcasting hook, used by `value_equals` implementations.
    fn as_any(&self) -> &dyn Any;

    /// Structural equality against another host value.
    fn value_equals(&self, _other: &dyn HostValue) -> Option<bool> {
        None
    }

    /// Coercion to a comparable primitive.
    fn value_of(&self) -> Option<Primitive> {
        None
    }

    /// JSON projection hook.
    fn to_json(&self) -> Option<serde_json::Value> {
        None
    }
}
