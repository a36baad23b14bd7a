//! # CretoAI Abilities
//!
//! Static role and permission definitions for role-based authorization.
//!
//! ## Features
//!
//! - **Roles** as insertion-ordered, duplicate-free permission sets
//! - **Resource-qualified permissions** (`read` on `blacklist` → `read_blacklist`)
//! - **Aliases** expanding shorthand names at grant time (built-in `manage`)
//! - **Role extension** copying the permissions of previously defined roles
//! - **Declarative definitions** loaded from JSON
//!
//! The registry only builds the role → permissions mapping. It does not
//! answer access checks.
//!
//! ## Example
//!
//! ```rust
//! use cretoai_abilities::Registry;
//!
//! # fn main() -> Result<(), cretoai_abilities::AbilitiesError> {
//! let mut registry = Registry::new();
//!
//! registry.define_with("reader", |role| {
//!     role.can("read", "blacklist")?;
//!     role.can("read", "campaigns")
//! })?;
//!
//! registry.define_with("blacklist_editor", |role| {
//!     role.extend("reader")?;
//!     role.can("manage", "blacklist")
//! })?;
//!
//! let roles = registry.export();
//! assert_eq!(
//!     roles["blacklist_editor"],
//!     vec!["read_blacklist", "read_campaigns", "edit_blacklist", "delete_blacklist"]
//! );
//! # Ok(())
//! # }
//! ```

pub mod alias;
pub mod config;
pub mod definitions;
pub mod error;
pub mod registry;
pub mod shared;
pub mod types;

// Re-export commonly used types
pub use alias::{AliasTable, BUILTIN_ALIASES};
pub use config::RegistryConfig;
pub use definitions::{Definitions, Grant, RoleDefinition};
pub use error::{AbilitiesError, Result};
pub use registry::{Registry, RoleScope};
pub use shared::SharedRegistry;
pub use types::{IntoNames, Names, Permission, PermissionSet, DEFAULT_SEPARATOR};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
