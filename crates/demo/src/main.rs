mod catalog;

use anyhow::Context;
use dataclass_core::patch;

use crate::catalog::{ADMIN, USER};

fn main() -> anyhow::Result<()> {
    dataclass_observability::init();

    let user = USER.create(patch! { "name" => "Liza", "age" => 23 })?;
    let updated = user.copy(patch! { "age" => 24 })?;
    tracing::info!(equal = user.equals(&updated), "copied user with a new age");

    let rejected = user.copy(patch! { "isWeird" => false });
    if let Err(err) = &rejected {
        tracing::warn!(error = %err, "copy rejected");
    }

    let admin = ADMIN.create_default();
    let other = ADMIN.create_default();
    tracing::info!(
        equal = admin.equals(&other),
        first_id = ?admin.field("id"),
        second_id = ?other.field("id"),
        "admins get fresh ids yet compare equal"
    );

    for instance in [&user, &updated, &admin] {
        let json = serde_json::to_string_pretty(instance)
            .with_context(|| format!("serializing {}", instance.class().name()))?;
        println!("{json}");
        if let Some(greeting) = instance.get("greeting") {
            println!("{}", greeting.as_str().unwrap_or_default());
        }
    }

    Ok(())
}
