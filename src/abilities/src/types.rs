//! Core permission types

use crate::error::{AbilitiesError, Result};
use indexmap::IndexSet;
use serde_json::Value;
use std::fmt;

/// Separator placed between an action and its resource at the export boundary
pub const DEFAULT_SEPARATOR: &str = "_";

/// A permission granted to a role
///
/// Stored as a structured pair so that a resource containing the separator
/// never aliases another permission internally. The joined form
/// (`read_blacklist`) is only produced by [`Permission::render`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permission {
    action: String,
    resource: Option<String>,
}

impl Permission {
    /// Create a bare permission (e.g. `read`)
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            resource: None,
        }
    }

    /// Create a resource-qualified permission (e.g. `read` on `blacklist`)
    pub fn on(action: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            resource: Some(resource.into()),
        }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Render the permission string, joining action and resource with `separator`
    pub fn render(&self, separator: &str) -> String {
        match &self.resource {
            Some(resource) => format!("{}{}{}", self.action, separator, resource),
            None => self.action.clone(),
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_SEPARATOR))
    }
}

/// Insertion-ordered set of permissions owned by a role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    permissions: IndexSet<Permission>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a permission unless already present.
    ///
    /// Returns `true` if the permission was added.
    pub fn insert(&mut self, permission: Permission) -> bool {
        self.permissions.insert(permission)
    }

    /// Append every permission of `other` not already present, keeping `other`'s order
    pub fn union_with(&mut self, other: &PermissionSet) -> usize {
        other
            .iter()
            .filter(|permission| self.insert((*permission).clone()))
            .count()
    }

    pub fn contains(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.iter()
    }

    /// Number of structured permissions.
    ///
    /// Can exceed the length of [`PermissionSet::render`] when distinct pairs
    /// render to the same string.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Render every permission in insertion order.
    ///
    /// Distinct pairs that render to the same string (`read` on `a_b` and
    /// `read_a` on `b`) collapse to the first occurrence so the exported
    /// sequence stays free of duplicates.
    pub fn render(&self, separator: &str) -> Vec<String> {
        self.iter()
            .map(|permission| permission.render(separator))
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = indexmap::set::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.permissions.iter()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self {
            permissions: iter.into_iter().collect(),
        }
    }
}

/// Normalized "string or list of strings" argument
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Names(Vec<String>);

impl Names {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl IntoIterator for Names {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Conversion into [`Names`], validating dynamically typed input
///
/// Plain strings and string collections always convert. JSON values must be
/// a string or an array of strings; anything else is rejected with
/// [`AbilitiesError::InvalidArgument`] naming `operation`.
pub trait IntoNames {
    fn into_names(self, operation: &'static str) -> Result<Names>;
}

impl IntoNames for Names {
    fn into_names(self, _operation: &'static str) -> Result<Names> {
        Ok(self)
    }
}

impl IntoNames for &str {
    fn into_names(self, _operation: &'static str) -> Result<Names> {
        Ok(Names(vec![self.to_owned()]))
    }
}

impl IntoNames for String {
    fn into_names(self, _operation: &'static str) -> Result<Names> {
        Ok(Names(vec![self]))
    }
}

impl IntoNames for &String {
    fn into_names(self, _operation: &'static str) -> Result<Names> {
        Ok(Names(vec![self.clone()]))
    }
}

impl<T: AsRef<str>> IntoNames for Vec<T> {
    fn into_names(self, _operation: &'static str) -> Result<Names> {
        Ok(Names(self.iter().map(|name| name.as_ref().to_owned()).collect()))
    }
}

impl<T: AsRef<str>> IntoNames for &Vec<T> {
    fn into_names(self, operation: &'static str) -> Result<Names> {
        self.as_slice().into_names(operation)
    }
}

impl<T: AsRef<str>> IntoNames for &[T] {
    fn into_names(self, _operation: &'static str) -> Result<Names> {
        Ok(Names(self.iter().map(|name| name.as_ref().to_owned()).collect()))
    }
}

impl<T: AsRef<str>, const N: usize> IntoNames for [T; N] {
    fn into_names(self, operation: &'static str) -> Result<Names> {
        self.as_slice().into_names(operation)
    }
}

impl<T: AsRef<str>, const N: usize> IntoNames for &[T; N] {
    fn into_names(self, operation: &'static str) -> Result<Names> {
        self.as_slice().into_names(operation)
    }
}

impl IntoNames for &Value {
    fn into_names(self, operation: &'static str) -> Result<Names> {
        match self {
            Value::String(name) => Ok(Names(vec![name.clone()])),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(name) => Ok(name.clone()),
                    _ => Err(AbilitiesError::invalid_argument(operation, self)),
                })
                .collect::<Result<Vec<_>>>()
                .map(Names),
            other => Err(AbilitiesError::invalid_argument(operation, other)),
        }
    }
}

impl IntoNames for Value {
    fn into_names(self, operation: &'static str) -> Result<Names> {
        (&self).into_names(operation)
    }
}
