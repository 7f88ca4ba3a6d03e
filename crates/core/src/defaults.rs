//! Defaults resolution: the per-class, build-once template.

use chrono::Utc;
use uuid::Uuid;

use crate::class::{ClassRef, ValueClass};
use crate::instance::Instance;
use crate::patch::Patch;
use crate::value::Value;

impl ValueClass {
    /// Resolved default of every declared field, in declaration order.
    ///
    /// Built on first access and cached on this class for its lifetime.
    /// Subclasses build their own template. Instances read their static
    /// defaults from here; dynamic defaults are evaluated per instance.
    pub(crate) fn default_values(&self) -> &[Value] {
        self.template.get_or_init(|| {
            let values: Box<[Value]> = self
                .fields()
                .iter()
                .map(|f| f.default_expr().evaluate())
                .collect();
            tracing::debug!(
                class = %self.name(),
                fields = values.len(),
                "built defaults template"
            );
            values
        })
    }

    /// The class's defaults template: every field at its default, no patch.
    ///
    /// Always the same values, dynamic ones included. Use
    /// [`ValueClass::create_default`] for a fresh instance.
    pub fn defaults(self: &ClassRef) -> Instance {
        Instance::assemble(
            ValueClass::factory_token(),
            self,
            self.default_values().to_vec(),
            Patch::new(),
        )
    }
}

/// Dynamic default producing a fresh, time-ordered identifier string.
///
/// ```ignore
/// ValueClass::builder("Ent").field_with("id", defaults::random_id)
/// ```
pub fn random_id() -> Value {
    Value::from(Uuid::now_v7().to_string())
}

/// Dynamic default producing the current time.
pub fn now() -> Value {
    Value::Date(Utc::now())
}
