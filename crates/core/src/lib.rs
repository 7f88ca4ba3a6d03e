//! `dataclass-core` — immutable, structurally comparable value classes.
//!
//! A [`ValueClass`] declares ordered fields with defaults (constant or
//! computed per instance), optional computed accessors and methods, and may
//! extend one parent class. Instances are built only through the factory
//! ([`ValueClass::create`], [`Instance::copy`]), are frozen from birth, and
//! remember exactly which fields were set explicitly. Equality and JSON
//! projection are driven by that explicit patch.
//!
//! ```ignore
//! use dataclass_core::{patch, ValueClass, Value};
//!
//! let user = ValueClass::builder("User")
//!     .field("name", "Anon")
//!     .field("age", 0)
//!     .build();
//!
//! let liza = user.create(patch! { "name" => "Liza", "age" => 23 })?;
//! let older = liza.copy(patch! { "age" => 24 })?;
//! assert!(!liza.equals(&older));
//! assert_eq!(older.to_json_value()["name"], "Liza");
//! ```

pub mod class;
pub mod defaults;
pub mod equality;
pub mod error;
pub mod instance;
pub mod patch;
pub mod projection;
pub mod value;
pub mod value_object;

pub use class::{ClassBuilder, ClassRef, DefaultExpr, FactoryToken, FieldDecl, ValueClass};
pub use equality::values_equal;
pub use error::{ValueError, ValueResult};
pub use instance::Instance;
pub use patch::Patch;
pub use value::{Primitive, Value};
pub use value_object::{HostValue, ValueComparable, ValueEquatable};
