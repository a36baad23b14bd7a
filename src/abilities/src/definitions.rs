//! Declarative role definitions
//!
//! A [`Definitions`] document describes aliases and roles as data, so a
//! role hierarchy can be kept in JSON next to the application instead of in
//! code:
//!
//! ```json
//! {
//!   "aliases": { "crud": ["create", "read", "update", "delete"] },
//!   "roles": [
//!     { "name": "reader", "grants": [{ "permissions": "read", "resource": "blacklist" }] },
//!     { "name": "editor", "extends": "reader",
//!       "grants": [{ "permissions": "manage", "resource": "campaigns" }] }
//!   ]
//! }
//! ```
//!
//! Permission and role lists are kept as raw JSON values and validated when
//! applied, so a document with `"permissions": 123` fails with the same
//! `InvalidArgument` error as the imperative API.

use crate::error::Result;
use crate::registry::Registry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Aliases and roles to apply to a [`Registry`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definitions {
    /// Alias name → permission name or list of names
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub aliases: IndexMap<String, Value>,

    /// Roles, applied in order
    #[serde(default)]
    pub roles: Vec<RoleDefinition>,
}

/// A single role definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Role name
    pub name: String,

    /// Role name or list of role names to extend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Value>,

    /// Grants, applied in order after `extends`
    #[serde(default)]
    pub grants: Vec<Grant>,
}

/// A single `can` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    /// Permission name or list of names (aliases allowed)
    pub permissions: Value,

    /// Optional resource qualifying every permission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl Definitions {
    /// Parse a definitions document from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl RoleDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: None,
            grants: Vec::new(),
        }
    }

    pub fn extending(mut self, roles: impl Into<Value>) -> Self {
        self.extends = Some(roles.into());
        self
    }

    pub fn granting(mut self, permissions: impl Into<Value>, resource: Option<&str>) -> Self {
        self.grants.push(Grant {
            permissions: permissions.into(),
            resource: resource.map(str::to_owned),
        });
        self
    }
}

impl Registry {
    /// Apply a definitions document: aliases first, then roles in order.
    ///
    /// Stops at the first error; everything applied before it stays.
    pub fn load(&mut self, definitions: &Definitions) -> Result<&mut Self> {
        for (name, permissions) in &definitions.aliases {
            self.alias(name.clone(), permissions)?;
        }

        for definition in &definitions.roles {
            self.define_with(&definition.name, |role| {
                if let Some(extends) = &definition.extends {
                    role.extend(extends)?;
                }

                for grant in &definition.grants {
                    role.can(&grant.permissions, grant.resource.as_deref())?;
                }

                Ok(())
            })?;
        }

        info!(
            "Loaded {} aliases and {} roles",
            definitions.aliases.len(),
            definitions.roles.len()
        );

        Ok(self)
    }

    /// Parse and apply a JSON definitions document
    pub fn load_json(&mut self, json: &str) -> Result<&mut Self> {
        let definitions = Definitions::from_json(json)?;
        self.load(&definitions)
    }
}
