//! Thread-safe registry handle
//!
//! [`Registry`] itself assumes a single writer. Hosts that need one registry
//! across threads wrap it in a [`SharedRegistry`], which serializes every
//! mutation behind a write lock.

use crate::definitions::Definitions;
use crate::error::Result;
use crate::registry::{Registry, RoleScope};
use crate::types::IntoNames;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable, lock-guarded handle to a [`Registry`]
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Define a role with no permissions
    pub fn define(&self, name: &str) -> Result<()> {
        self.inner.write().define(name).map(|_| ())
    }

    /// Define a role; the write lock is held for the whole setup routine.
    ///
    /// The lock is not reentrant: calling any method of this handle (or a
    /// clone of it) from inside `setup` deadlocks. Read the role being built
    /// through [`RoleScope::permissions`] instead.
    pub fn define_with<F>(&self, name: &str, setup: F) -> Result<()>
    where
        F: FnOnce(&mut RoleScope<'_>) -> Result<()>,
    {
        self.inner.write().define_with(name, setup).map(|_| ())
    }

    pub fn alias(&self, name: impl Into<String>, permissions: impl IntoNames) -> Result<()> {
        self.inner.write().alias(name, permissions)
    }

    pub fn load(&self, definitions: &Definitions) -> Result<()> {
        self.inner.write().load(definitions).map(|_| ())
    }

    pub fn flush(&self) {
        self.inner.write().flush();
    }

    pub fn reset(&self) {
        self.inner.write().reset();
    }

    pub fn export(&self) -> IndexMap<String, Vec<String>> {
        self.inner.read().export()
    }

    pub fn permissions(&self, role: &str) -> Option<Vec<String>> {
        self.inner.read().permissions(role)
    }

    /// Run `f` with shared access to the registry
    pub fn read<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        f(&self.inner.read())
    }

    /// Clone the current registry state
    pub fn snapshot(&self) -> Registry {
        self.inner.read().clone()
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self {
        Self::new(registry)
    }
}
