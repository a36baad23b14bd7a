//! # Role Hierarchy Example
//!
//! Defines a small campaign-management hierarchy and prints the resolved
//! role → permissions map as JSON.
//!
//! ```text
//! RUST_LOG=debug cargo run -p cretoai-abilities --example role_hierarchy
//! ```

use cretoai_abilities::Registry;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("CretoAI abilities v{}", cretoai_abilities::VERSION);

    let mut registry = Registry::new();

    registry
        .define_with("reader", |role| {
            role.can("read", "blacklist")?;
            role.can("read", "campaigns")
        })?
        .define_with("blacklist_editor", |role| {
            role.extend("reader")?;
            // alias for read, edit and delete
            role.can("manage", "blacklist")
        })?
        .define_with("editor", |role| {
            role.extend("blacklist_editor")?;
            role.can("manage", "campaigns")
        })?;

    for name in registry.role_names() {
        let count = registry.permissions(name).map_or(0, |permissions| permissions.len());
        info!("{}: {} permissions", name, count);
    }

    println!("{}", serde_json::to_string_pretty(&registry)?);

    Ok(())
}
