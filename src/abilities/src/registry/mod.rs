//! Role registry
//!
//! Holds the role map (role name → permissions) and the alias table, and
//! exposes the definition API:
//!
//! - [`Registry::define`] / [`Registry::define_with`]: (re)define a role
//! - [`RoleScope::can`] / [`RoleScope::extend`]: grant permissions inside a definition
//! - [`Registry::alias`]: declare a permission alias
//! - [`Registry::flush`]: drop every role definition (aliases are kept)
//! - [`Registry::export`]: resolved role → permission strings map
//!
//! # Example
//!
//! ```rust
//! use cretoai_abilities::Registry;
//!
//! # fn main() -> Result<(), cretoai_abilities::AbilitiesError> {
//! let mut registry = Registry::new();
//!
//! registry
//!     .define_with("reader", |role| role.can("read", "blacklist"))?
//!     .define_with("editor", |role| {
//!         role.extend("reader")?;
//!         role.can("manage", "campaigns")
//!     })?;
//!
//! assert_eq!(
//!     registry.permissions("editor").unwrap(),
//!     vec!["read_blacklist", "read_campaigns", "edit_campaigns", "delete_campaigns"]
//! );
//! # Ok(())
//! # }
//! ```

mod scope;

#[cfg(test)]
mod tests;

pub use scope::RoleScope;

use crate::alias::AliasTable;
use crate::config::RegistryConfig;
use crate::error::{AbilitiesError, Result};
use crate::types::{IntoNames, PermissionSet};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use tracing::debug;

/// In-memory role → permission registry
///
/// The registry is a plain value owned by the caller; independent registries
/// share nothing. Use [`SharedRegistry`](crate::SharedRegistry) to share one
/// across threads.
#[derive(Debug, Clone)]
pub struct Registry {
    config: RegistryConfig,
    roles: IndexMap<String, PermissionSet>,
    aliases: AliasTable,
}

impl Registry {
    /// Create a registry with the default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a registry with a custom configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        let aliases = Self::initial_aliases(&config);

        Self {
            config,
            roles: IndexMap::new(),
            aliases,
        }
    }

    fn initial_aliases(config: &RegistryConfig) -> AliasTable {
        if config.builtin_aliases {
            AliasTable::builtin()
        } else {
            AliasTable::new()
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Define a role with no permissions, replacing any previous definition
    pub fn define(&mut self, name: &str) -> Result<&mut Self> {
        self.define_with(name, |_| Ok(()))
    }

    /// Define a role, replacing any previous definition.
    ///
    /// The role starts empty; `setup` is then called once, synchronously, with
    /// a [`RoleScope`] bound to `name`. Whatever the scope collected is stored
    /// even when `setup` fails, so a failing grant keeps the permissions
    /// applied before it.
    ///
    /// # Errors
    ///
    /// - [`AbilitiesError::InvalidArgument`] if `name` is empty (nothing is changed)
    /// - any error returned by `setup`
    pub fn define_with<F>(&mut self, name: &str, setup: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut RoleScope<'_>) -> Result<()>,
    {
        if name.is_empty() {
            return Err(AbilitiesError::invalid_argument("define", name));
        }

        // Reset first so the setup routine never observes the old definition
        if self.roles.insert(name.to_owned(), PermissionSet::new()).is_some() {
            debug!("Redefining role: {}", name);
        } else {
            debug!("Defining role: {}", name);
        }

        let mut scope = RoleScope::new(name, &self.roles, &self.aliases);
        let outcome = setup(&mut scope);
        let permissions = scope.into_permissions();

        debug!("Role {} has {} permissions", name, permissions.len());
        self.roles.insert(name.to_owned(), permissions);

        outcome?;
        Ok(self)
    }

    /// Register or overwrite a permission alias.
    ///
    /// Roles that already expanded a previous definition of the alias keep
    /// their permissions.
    ///
    /// # Errors
    ///
    /// [`AbilitiesError::InvalidArgument`] if `permissions` is neither a string
    /// nor a list of strings.
    pub fn alias(&mut self, name: impl Into<String>, permissions: impl IntoNames) -> Result<()> {
        let name = name.into();
        let targets = permissions.into_names("alias")?;

        debug!("Registering alias {} -> {:?}", name, targets.as_slice());
        if self.aliases.insert(name.clone(), targets).is_some() {
            debug!("Alias {} overwritten", name);
        }

        Ok(())
    }

    /// Remove every role definition.
    ///
    /// The alias table is left untouched; use [`Registry::reset`] to restore
    /// it as well.
    pub fn flush(&mut self) {
        debug!("Flushing {} roles", self.roles.len());
        self.roles.clear();
    }

    /// Remove every role and restore the initial alias table
    pub fn reset(&mut self) {
        self.flush();
        self.aliases = Self::initial_aliases(&self.config);
        debug!("Alias table reset ({} aliases)", self.aliases.len());
    }

    /// Resolved role map: role name → permission strings, both in definition order
    pub fn export(&self) -> IndexMap<String, Vec<String>> {
        self.roles
            .iter()
            .map(|(name, permissions)| (name.clone(), permissions.render(&self.config.separator)))
            .collect()
    }

    /// Exported role map as a JSON value
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Exported role map as a JSON string, keys in definition order
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Permission strings of a single role
    pub fn permissions(&self, role: &str) -> Option<Vec<String>> {
        self.roles
            .get(role)
            .map(|permissions| permissions.render(&self.config.separator))
    }

    /// Structured permissions of a single role
    pub fn role(&self, role: &str) -> Option<&PermissionSet> {
        self.roles.get(role)
    }

    pub fn contains_role(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }

    /// Targets of an alias
    pub fn alias_targets(&self, name: &str) -> Option<&[String]> {
        self.aliases.get(name)
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Number of defined roles
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.roles
                .iter()
                .map(|(name, permissions)| (name, permissions.render(&self.config.separator))),
        )
    }
}
