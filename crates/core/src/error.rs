//! Runtime error model.

use thiserror::Error;

/// Result type used across the value-class runtime.
pub type ValueResult<T> = Result<T, ValueError>;

/// Value-class runtime error.
///
/// Every variant is a programmer error local to the offending call. A failed
/// factory call never leaves a partially built instance behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The raw constructor was called instead of the factory.
    #[error("use {class}::create(...) instead of constructing directly")]
    ConstructionMisuse { class: String },

    /// A patch named a property the class does not declare.
    #[error("cannot add property {key}, {class} is not extensible")]
    UnknownProperty { class: String, key: String },

    /// Reassignment of a declared property on a finalized instance.
    #[error("cannot assign to read only property '{key}' of {class}")]
    ImmutableWrite { class: String, key: String },

    /// Addition of a new property to a finalized instance.
    #[error("cannot add property {key}, {class} instance is not extensible")]
    ImmutableExtend { class: String, key: String },

    /// `call` named a method the class does not declare.
    #[error("{class} has no method '{name}'")]
    UnknownMethod { class: String, name: String },

    /// A JSON document handed in as a patch was not an object.
    #[error("invalid patch: {0}")]
    InvalidPatch(String),
}

impl ValueError {
    pub fn construction_misuse(class: impl Into<String>) -> Self {
        Self::ConstructionMisuse {
            class: class.into(),
        }
    }

    pub fn unknown_property(class: impl Into<String>, key: impl Into<String>) -> Self {
        Self::UnknownProperty {
            class: class.into(),
            key: key.into(),
        }
    }

    pub fn immutable_write(class: impl Into<String>, key: impl Into<String>) -> Self {
        Self::ImmutableWrite {
            class: class.into(),
            key: key.into(),
        }
    }

    pub fn immutable_extend(class: impl Into<String>, key: impl Into<String>) -> Self {
        Self::ImmutableExtend {
            class: class.into(),
            key: key.into(),
        }
    }

    pub fn unknown_method(class: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownMethod {
            class: class.into(),
            name: name.into(),
        }
    }

    pub fn invalid_patch(msg: impl Into<String>) -> Self {
        Self::InvalidPatch(msg.into())
    }
}
