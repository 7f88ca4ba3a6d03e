//! Equality engine: structural comparison over explicit patches.
//!
//! Only keys explicitly set on at least one side are compared. A key that
//! neither side overrode is skipped without looking at the resolved values,
//! so two instances holding different dynamic defaults (say, random ids)
//! still compare equal as long as neither set that key.

use std::sync::Arc;

use crate::instance::Instance;
use crate::value::{Primitive, Value};
use crate::value_object::{ValueComparable, ValueEquatable};

static ABSENT: Value = Value::Absent;

impl Instance {
    /// Structural equality against an instance of the same value class.
    ///
    /// Classes are not checked; comparing across classes walks `self`'s
    /// fields and treats fields `other` lacks as absent.
    pub fn equals(&self, other: &Instance) -> bool {
        if self.ptr_eq(other) {
            return true;
        }

        let (pa, pb) = (self.patch(), other.patch());
        for key in self.keys() {
            let (ea, eb) = (pa.get(key), pb.get(key));
            if ea.is_none() && eb.is_none() {
                continue;
            }

            let va = ea.or_else(|| self.field(key)).unwrap_or(&ABSENT);
            let vb = eb.or_else(|| other.field(key)).unwrap_or(&ABSENT);
            if !values_equal(va, vb) {
                return false;
            }
        }
        true
    }
}

impl ValueEquatable for Instance {
    fn value_equals(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

/// Same value without consulting any capability.
pub fn identical(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Absent, Value::Absent) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Object(x), Value::Object(y)) => x.ptr_eq(y),
        (Value::Json(x), Value::Json(y)) => Arc::ptr_eq(x, y),
        (Value::Custom(x), Value::Custom(y)) => Arc::ptr_eq(x, y),
        _ => false,
    }
}

/// Delegated structural equality, when both sides offer it.
fn delegate_equals(a: &Value, b: &Value) -> Option<bool> {
    match (a, b) {
        (Value::Object(x), Value::Object(y)) => Some(x.value_equals(y)),
        (Value::Custom(x), Value::Custom(y)) => x.value_equals(&**y),
        _ => None,
    }
}

fn coerce(v: &Value) -> Option<Primitive> {
    match v {
        Value::Date(d) => Some(d.value_of()),
        Value::Custom(h) => h.value_of(),
        other => other.as_primitive(),
    }
}

/// Compare two resolved values: identity, then delegated equality, then
/// coerced primitives. Values offering neither capability are unequal.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    if identical(a, b) {
        return true;
    }
    if let Some(equal) = delegate_equals(a, b) {
        return equal;
    }
    match (coerce(a), coerce(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        values_equal(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::{ClassRef, ValueClass};
    use crate::defaults::random_id;
    use crate::patch;
    use crate::value_object::HostValue;
    use chrono::{TimeZone, Utc};
    use core::any::Any;
    use proptest::prelude::*;

    fn entity() -> ClassRef {
        ValueClass::builder("Entity")
            .field("someString", "default string")
            .field("someNum", 0.134)
            .field("someBool", true)
            .field("someNullable", Value::Null)
            .build()
    }

    #[test]
    fn compares_explicit_values() {
        let class = entity();
        let a = class.create(patch! { "someBool" => false, "someNullable" => Value::Null }).unwrap();
        let equal = class.create(patch! { "someBool" => false, "someNum" => 0.134 }).unwrap();
        let absent = class.create(patch! { "someBool" => false, "someNullable" => Value::Absent }).unwrap();
        let b = class.create(patch! { "someNullable" => 1 }).unwrap();
        let c = class.create(patch! { "someNullable" => Value::Null }).unwrap();
        let extended = b.copy(patch! { "someBool" => true }).unwrap();
        let updated = a.copy(patch! { "someNum" => 14 }).unwrap();

        assert!(!a.equals(&updated));
        assert!(a.equals(&equal));
        assert!(!absent.equals(&equal));
        assert!(b.equals(&extended));
        assert!(!b.equals(&a));
        assert!(!b.equals(&c));
    }

    #[test]
    fn distinct_dynamic_defaults_do_not_break_equality() {
        let ent = ValueClass::builder("Ent").field_with("id", random_id).build();

        let a = ent.create(()).unwrap();
        let b = ent.create(()).unwrap();
        let c = a.copy(()).unwrap();

        assert_ne!(a.field("id").and_then(Value::as_str), b.field("id").and_then(Value::as_str));
        assert!(a.equals(&b));
        assert!(b.equals(&a));
        assert_eq!(a.field("id").and_then(Value::as_str), c.field("id").and_then(Value::as_str));
        assert!(a.equals(&c));
    }

    #[test]
    fn explicitly_set_dynamic_field_is_compared() {
        let ent = ValueClass::builder("Ent").field_with("id", random_id).build();
        let a = ent.create(patch! { "id" => "a" }).unwrap();
        let b = ent.create_default();
        assert!(!a.equals(&b));
        assert!(a.equals(&b.copy(patch! { "id" => "a" }).unwrap()));
    }

    #[test]
    fn dates_compare_through_coercion() {
        let d1 = Utc.with_ymd_and_hms(1996, 12, 17, 3, 24, 0).unwrap();
        let d2 = Utc.with_ymd_and_hms(2001, 12, 17, 3, 24, 0).unwrap();
        assert!(values_equal(&Value::Date(d1), &Value::Date(d1)));
        assert!(!values_equal(&Value::Date(d1), &Value::Date(d2)));
        assert!(!values_equal(&Value::Date(d1), &Value::Null));
    }

    #[test]
    fn plain_containers_compare_by_identity() {
        let shared = Value::from(serde_json::json!({ "foo": "bar" }));
        let other = Value::from(serde_json::json!({ "foo": "bar" }));
        assert!(values_equal(&shared, &shared.clone()));
        assert!(!values_equal(&shared, &other));
    }

    #[test]
    fn null_and_absent_differ() {
        assert!(!values_equal(&Value::Null, &Value::Absent));
        assert!(values_equal(&Value::Null, &Value::Null));
    }

    #[test]
    fn nan_is_never_equal() {
        assert!(!values_equal(&Value::from(f64::NAN), &Value::from(f64::NAN)));
        assert!(values_equal(&Value::from(0.0), &Value::from(-0.0)));
    }

    #[derive(Debug)]
    struct Cents(i64);

    impl HostValue for Cents {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn value_of(&self) -> Option<Primitive> {
            Some(Primitive::Number(self.0 as f64))
        }
    }

    #[derive(Debug)]
    struct Tag(&'static str);

    impl HostValue for Tag {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn value_equals(&self, other: &dyn HostValue) -> Option<bool> {
            let other = other.as_any().downcast_ref::<Tag>()?;
            Some(self.0.eq_ignore_ascii_case(other.0))
        }
    }

    #[test]
    fn custom_values_use_their_capabilities() {
        assert_eq!(Value::custom(Cents(100)), Value::custom(Cents(100)));
        assert_ne!(Value::custom(Cents(100)), Value::custom(Cents(101)));
        assert_eq!(Value::custom(Tag("a")), Value::custom(Tag("A")));
        assert_ne!(Value::custom(Tag("a")), Value::custom(Tag("b")));
        // no shared capability
        assert_ne!(Value::custom(Tag("a")), Value::custom(Cents(1)));
    }

    #[test]
    fn cross_class_comparison_does_not_panic() {
        let user = ValueClass::builder("User").field("name", "Anon").field("age", 0).build();
        let admin = ValueClass::builder("Admin").field("nick", "Boo").build();
        let u = user.create(patch! { "name" => "Liza" }).unwrap();
        let a = admin.create_default();
        assert!(!u.equals(&a));
        assert!(a.equals(&admin.create_default()));
    }

    fn arb_patch() -> impl Strategy<Value = Vec<(usize, String)>> {
        prop::collection::vec((0usize..3, "[a-c]{0,2}"), 0..4)
    }

    fn build(class: &ClassRef, entries: &[(usize, String)]) -> Instance {
        const KEYS: [&str; 3] = ["a", "b", "c"];
        let patch: crate::Patch = entries
            .iter()
            .map(|(k, v)| (KEYS[*k], Value::from(v.as_str())))
            .collect();
        class.create(patch).unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: equality is reflexive and symmetric.
        #[test]
        fn equality_is_reflexive_and_symmetric(p in arb_patch(), q in arb_patch()) {
            let class = ValueClass::builder("Abc").field("a", "").field("b", "").field("c", "").build();
            let x = build(&class, &p);
            let y = build(&class, &q);

            prop_assert!(x.equals(&x));
            prop_assert!(x.equals(&x.copy(()).unwrap()));
            prop_assert_eq!(x.equals(&y), y.equals(&x));
        }

        /// Property: equality is transitive.
        #[test]
        fn equality_is_transitive(p in arb_patch(), q in arb_patch(), r in arb_patch()) {
            let class = ValueClass::builder("Abc").field("a", "").field("b", "").field("c", "").build();
            let x = build(&class, &p);
            let y = build(&class, &q);
            let z = build(&class, &r);

            if x.equals(&y) && y.equals(&z) {
                prop_assert!(x.equals(&z));
            }
        }
    }
}
