//! Capabilities handed to a role's setup routine

use crate::alias::AliasTable;
use crate::error::{AbilitiesError, Result};
use crate::types::{IntoNames, Permission, PermissionSet};
use indexmap::IndexMap;
use tracing::trace;

/// Handle bound to the role currently being defined
///
/// Passed to the setup routine of [`Registry::define_with`](super::Registry::define_with).
/// Permissions granted through it are collected here and written back to the
/// registry when the setup routine returns, whether it succeeded or not.
pub struct RoleScope<'a> {
    name: &'a str,
    roles: &'a IndexMap<String, PermissionSet>,
    aliases: &'a AliasTable,
    permissions: PermissionSet,
}

impl<'a> RoleScope<'a> {
    pub(super) fn new(
        name: &'a str,
        roles: &'a IndexMap<String, PermissionSet>,
        aliases: &'a AliasTable,
    ) -> Self {
        Self {
            name,
            roles,
            aliases,
            permissions: PermissionSet::new(),
        }
    }

    /// Name of the role being defined
    pub fn name(&self) -> &str {
        self.name
    }

    /// Permissions collected so far
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// Grant one or more permissions, optionally qualified by a resource.
    ///
    /// Aliases are expanded first (one level), then every resulting name is
    /// qualified with `resource` when given. An empty resource counts as none.
    /// Permissions already held are skipped.
    ///
    /// # Errors
    ///
    /// [`AbilitiesError::InvalidArgument`] if `permissions` is neither a string
    /// nor a list of strings.
    pub fn can<'r, R>(&mut self, permissions: impl IntoNames, resource: R) -> Result<()>
    where
        R: Into<Option<&'r str>>,
    {
        let names = permissions.into_names("can")?;
        let resource = resource.into().filter(|resource| !resource.is_empty());

        for action in self.aliases.expand(&names) {
            let permission = match resource {
                Some(resource) => Permission::on(action, resource),
                None => Permission::new(action),
            };

            if !self.permissions.contains(&permission) {
                trace!("Role {}: granted {}", self.name, permission);
                self.permissions.insert(permission);
            }
        }

        Ok(())
    }

    /// Copy in the permissions of one or more previously defined roles.
    ///
    /// Roles are applied in the order given. The copy is a snapshot: later
    /// redefinitions of an extended role do not propagate.
    ///
    /// # Errors
    ///
    /// - [`AbilitiesError::InvalidArgument`] if `roles` is neither a string nor
    ///   a list of strings
    /// - [`AbilitiesError::NotFound`] for the first role that is not defined;
    ///   roles listed before it remain applied
    pub fn extend(&mut self, roles: impl IntoNames) -> Result<()> {
        let names = roles.into_names("extend")?;

        for existing in names.iter() {
            let inherited = self
                .roles
                .get(existing)
                .ok_or_else(|| AbilitiesError::not_found("extend", existing))?;

            let added = self.permissions.union_with(inherited);
            trace!("Role {}: extended {} (+{} permissions)", self.name, existing, added);
        }

        Ok(())
    }

    pub(super) fn into_permissions(self) -> PermissionSet {
        self.permissions
    }
}
