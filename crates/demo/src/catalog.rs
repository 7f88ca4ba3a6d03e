//! Example value classes.

use std::sync::LazyLock;

use dataclass_core::{ClassRef, Value, ValueClass, defaults};

pub static USER: LazyLock<ClassRef> = LazyLock::new(|| {
    ValueClass::builder("User")
        .field_with("id", defaults::random_id)
        .field("name", "Anon")
        .field("age", 0)
        .field_with("joined", defaults::now)
        .getter("greeting", |u| {
            let name = u.field("name").and_then(Value::as_str).unwrap_or_default();
            Value::from(format!("Hello, {name}!"))
        })
        .build()
});

pub static ADMIN: LazyLock<ClassRef> = LazyLock::new(|| {
    ValueClass::extend(&USER, "Admin")
        .field("nick", "Boo")
        .field("permissions", serde_json::json!(["read", "write"]))
        .getter("greeting", |u| {
            let nick = u.field("nick").and_then(Value::as_str).unwrap_or_default();
            Value::from(format!("Welcome back, {nick}."))
        })
        .method("can", |u, args| {
            let wanted = args.first().and_then(Value::as_str).unwrap_or_default();
            let granted = u
                .field("permissions")
                .and_then(Value::as_json)
                .and_then(|p| p.as_array())
                .is_some_and(|p| p.iter().any(|x| x.as_str() == Some(wanted)));
            Value::from(granted)
        })
        .build()
});
