//! Instance factory: create, copy, and the immutability guards.

use std::sync::Arc;

use crate::class::{ClassRef, DefaultExpr, FactoryToken, ValueClass};
use crate::error::{ValueError, ValueResult};
use crate::patch::Patch;
use crate::value::Value;

/// An immutable value of some value class.
///
/// Holds the resolved value of every declared field plus the hidden patch:
/// exactly the overrides supplied when it was created. Cloning is cheap and
/// shares the underlying record.
#[derive(Clone)]
pub struct Instance {
    inner: Arc<Record>,
}

struct Record {
    class: ClassRef,
    values: Box<[Value]>,
    patch: Patch,
}

impl ValueClass {
    /// Raw constructor.
    ///
    /// Only the factory can supply a [`FactoryToken`]; any other caller gets
    /// [`ValueError::ConstructionMisuse`]. Use [`ValueClass::create`].
    pub fn construct(
        self: &ClassRef,
        token: Option<FactoryToken>,
        patch: Patch,
    ) -> ValueResult<Instance> {
        let Some(token) = token else {
            return Err(ValueError::construction_misuse(self.name()));
        };
        self.build(token, patch, None)
    }

    /// Create an instance: defaults overridden by `patch`.
    ///
    /// Static defaults come from the class's cached template; dynamic ones
    /// are evaluated afresh for every instance. Fails with
    /// [`ValueError::UnknownProperty`] if `patch` names a field this class
    /// does not declare; nothing is built in that case.
    pub fn create(self: &ClassRef, patch: impl Into<Patch>) -> ValueResult<Instance> {
        let patch = patch.into();
        tracing::trace!(class = %self.name(), overrides = patch.len(), "create");
        self.construct(Some(ValueClass::factory_token()), patch)
    }

    /// Create an instance with no overrides.
    ///
    /// Unlike [`ValueClass::defaults`], dynamic defaults are evaluated for
    /// this instance rather than taken from the template.
    pub fn create_default(self: &ClassRef) -> Instance {
        let values = self.resolve(&Patch::new(), None);
        Instance::assemble(ValueClass::factory_token(), self, values, Patch::new())
    }

    /// Validate `patch`, resolve every field and finalize the instance.
    ///
    /// Fields the patch does not cover take their value from `base` when
    /// given (copy), else from the defaults.
    fn build(
        self: &ClassRef,
        token: FactoryToken,
        patch: Patch,
        base: Option<&[Value]>,
    ) -> ValueResult<Instance> {
        if let Some(key) = patch.keys().find(|k| !self.declares(k)) {
            tracing::debug!(class = %self.name(), key, "rejected patch with undeclared property");
            return Err(ValueError::unknown_property(self.name(), key));
        }

        let values = self.resolve(&patch, base);
        Ok(Instance::assemble(token, self, values, patch))
    }

    fn resolve(&self, patch: &Patch, base: Option<&[Value]>) -> Vec<Value> {
        let template = self.default_values();
        self.fields()
            .iter()
            .enumerate()
            .map(|(i, field)| {
                if let Some(v) = patch.get(field.name()) {
                    return v.clone();
                }
                match (base, field.default_expr()) {
                    (Some(base), _) => base[i].clone(),
                    (None, dynamic @ DefaultExpr::Dynamic(_)) => dynamic.evaluate(),
                    (None, DefaultExpr::Static(_)) => template[i].clone(),
                }
            })
            .collect()
    }
}

impl Instance {
    pub(crate) fn assemble(
        _token: FactoryToken,
        class: &ClassRef,
        values: Vec<Value>,
        patch: Patch,
    ) -> Self {
        Self {
            inner: Arc::new(Record {
                class: Arc::clone(class),
                values: values.into_boxed_slice(),
                patch,
            }),
        }
    }

    /// New instance of the same concrete class, with this instance's patch
    /// merged with `patch` (`patch` wins on conflicts).
    ///
    /// Dynamic defaults are not re-evaluated: fields outside the merged
    /// patch keep this instance's resolved values.
    pub fn copy(&self, patch: impl Into<Patch>) -> ValueResult<Instance> {
        let merged = self.inner.patch.merged(&patch.into());
        tracing::trace!(class = %self.class().name(), overrides = merged.len(), "copy");
        self.inner
            .class
            .build(ValueClass::factory_token(), merged, Some(&self.inner.values))
    }

    /// The most-derived class of this instance.
    pub fn class(&self) -> &ClassRef {
        &self.inner.class
    }

    /// The explicit overrides this instance was created with.
    pub fn patch(&self) -> &Patch {
        &self.inner.patch
    }

    /// Instances are frozen: this always fails and never mutates.
    ///
    /// Declared keys fail with [`ValueError::ImmutableWrite`], anything
    /// else with [`ValueError::ImmutableExtend`].
    pub fn set(&self, key: &str, _value: impl Into<Value>) -> ValueResult<()> {
        let class = self.class().name();
        if self.class().declares(key) {
            Err(ValueError::immutable_write(class, key))
        } else {
            Err(ValueError::immutable_extend(class, key))
        }
    }

    /// Resolved value of a declared field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.class()
            .position(key)
            .map(|i| &self.inner.values[i])
    }

    /// Property lookup: declared fields first, then computed accessors.
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(v) = self.field(key) {
            return Some(v.clone());
        }
        self.class().getter(key).map(|getter| getter(self))
    }

    /// Invoke a declared method, dispatched on the most-derived class.
    pub fn call(&self, name: &str, args: &[Value]) -> ValueResult<Value> {
        match self.class().method(name) {
            Some(method) => Ok(method(self, args)),
            None => Err(ValueError::unknown_method(self.class().name(), name)),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.class().declares(key)
    }

    pub fn len(&self) -> usize {
        self.inner.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.values.is_empty()
    }

    /// Field names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.class().field_names()
    }

    /// Resolved values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.inner.values.iter()
    }

    /// `(name, resolved value)` pairs in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.keys().zip(self.values())
    }

    /// Whether both handles share the same record.
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<'a> IntoIterator for &'a Instance {
    type Item = (&'a str, &'a Value);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a Value)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.entries())
    }
}

impl core::fmt::Debug for Instance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct(self.class().name());
        for (k, v) in self.entries() {
            s.field(k, v);
        }
        s.finish()
    }
}
