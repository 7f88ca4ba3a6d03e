//! Value-class schemas.
//!
//! A [`ValueClass`] is compiled once by a [`ClassBuilder`]: inherited fields,
//! accessors and methods are flattened into the derived class at build time,
//! so no lookup ever walks the parent chain.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::instance::Instance;
use crate::value::Value;

/// Shared handle to a compiled value class.
pub type ClassRef = Arc<ValueClass>;

pub(crate) type DefaultFn = Arc<dyn Fn() -> Value + Send + Sync>;
pub(crate) type Getter = Arc<dyn Fn(&Instance) -> Value + Send + Sync>;
pub(crate) type Method = Arc<dyn Fn(&Instance, &[Value]) -> Value + Send + Sync>;

/// How a field obtains its default.
#[derive(Clone)]
pub enum DefaultExpr {
    /// The same value for every instance.
    Static(Value),
    /// Evaluated afresh for each new instance; copies keep the value.
    Dynamic(DefaultFn),
}

impl DefaultExpr {
    pub fn evaluate(&self) -> Value {
        match self {
            DefaultExpr::Static(v) => v.clone(),
            DefaultExpr::Dynamic(f) => f(),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, DefaultExpr::Dynamic(_))
    }
}

impl core::fmt::Debug for DefaultExpr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DefaultExpr::Static(v) => f.debug_tuple("Static").field(v).finish(),
            DefaultExpr::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// A declared property.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    name: String,
    default: DefaultExpr,
}

impl FieldDecl {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_expr(&self) -> &DefaultExpr {
        &self.default
    }
}

/// Capability token for the raw constructor. Only the factory holds one.
pub struct FactoryToken(());

/// A compiled value class.
pub struct ValueClass {
    name: String,
    parent: Option<ClassRef>,
    fields: Vec<FieldDecl>,
    index: HashMap<String, usize>,
    getters: HashMap<String, Getter>,
    methods: HashMap<String, Method>,
    pub(crate) template: OnceLock<Box<[Value]>>,
}

impl ValueClass {
    /// Start declaring a root value class.
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            parent: None,
            fields: Vec::new(),
            getters: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    /// Start declaring a class that extends `parent`.
    ///
    /// The new class starts with all of the parent's fields (in order),
    /// accessors and methods; later declarations add to or override them.
    pub fn extend(parent: &ClassRef, name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            parent: Some(Arc::clone(parent)),
            fields: parent.fields.clone(),
            getters: parent.getters.clone(),
            methods: parent.methods.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&ClassRef> {
        self.parent.as_ref()
    }

    /// Declared fields, in declaration order (inherited first).
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldDecl::name)
    }

    pub fn declares(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub(crate) fn getter(&self, name: &str) -> Option<&Getter> {
        self.getters.get(name)
    }

    pub(crate) fn method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Whether `self` is `other` or one of its descendants.
    pub fn is_subclass_of(&self, other: &ValueClass) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if core::ptr::eq(class, other) {
                return true;
            }
            current = class.parent.as_deref();
        }
        false
    }

    pub(crate) fn factory_token() -> FactoryToken {
        FactoryToken(())
    }
}

impl core::fmt::Debug for ValueClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ValueClass")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Declares a [`ValueClass`].
///
/// Every field needs a default. Redeclaring a field (inherited or not)
/// replaces its default but keeps its position. A field shadows an accessor
/// of the same name.
#[must_use]
pub struct ClassBuilder {
    name: String,
    parent: Option<ClassRef>,
    fields: Vec<FieldDecl>,
    getters: HashMap<String, Getter>,
    methods: HashMap<String, Method>,
}

impl ClassBuilder {
    /// Declare a field with a constant default.
    pub fn field(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.declare(name.into(), DefaultExpr::Static(default.into()))
    }

    /// Declare a field whose default is computed for each new instance.
    pub fn field_with<F>(self, name: impl Into<String>, default: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.declare(name.into(), DefaultExpr::Dynamic(Arc::new(default)))
    }

    /// Declare a computed, read-only accessor.
    pub fn getter<F>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&Instance) -> Value + Send + Sync + 'static,
    {
        self.getters.insert(name.into(), Arc::new(getter));
        self
    }

    /// Declare (or override) a method.
    pub fn method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&Instance, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(method));
        self
    }

    fn declare(mut self, name: String, default: DefaultExpr) -> Self {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.default = default,
            None => self.fields.push(FieldDecl { name, default }),
        }
        self
    }

    pub fn build(self) -> ClassRef {
        let index = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();

        tracing::trace!(
            class = %self.name,
            parent = self.parent.as_ref().map(|p| p.name()),
            fields = self.fields.len(),
            "compiled value class"
        );

        Arc::new(ValueClass {
            name: self.name,
            parent: self.parent,
            fields: self.fields,
            index,
            getters: self.getters,
            methods: self.methods,
            template: OnceLock::new(),
        })
    }
}
