//! Permission aliases
//!
//! An alias is a shorthand name that expands to one or more permission names
//! when a role is granted it. Expansion is a single level: alias targets are
//! taken as real permission names even when they match another alias.

use crate::types::Names;
use indexmap::IndexMap;

/// Aliases every registry starts with (unless disabled in the config)
pub const BUILTIN_ALIASES: &[(&str, &[&str])] = &[("manage", &["read", "edit", "delete"])];

/// Alias name → ordered list of underlying permission names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: IndexMap<String, Vec<String>>,
}

impl AliasTable {
    /// Create an empty alias table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table seeded with [`BUILTIN_ALIASES`]
    pub fn builtin() -> Self {
        let entries = BUILTIN_ALIASES
            .iter()
            .map(|(name, targets)| {
                let targets = targets.iter().map(|target| target.to_string()).collect();
                (name.to_string(), targets)
            })
            .collect();

        Self { entries }
    }

    /// Register or overwrite an alias.
    ///
    /// Returns the previous targets when the alias already existed.
    pub fn insert(&mut self, name: impl Into<String>, targets: Names) -> Option<Vec<String>> {
        self.entries.insert(name.into(), targets.into_vec())
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Substitute every alias in `names` with its targets, in order.
    ///
    /// The result is an owned snapshot; later changes to the table do not
    /// affect it.
    pub fn expand(&self, names: &Names) -> Vec<String> {
        let mut expanded = Vec::with_capacity(names.len());

        for name in names.iter() {
            match self.entries.get(name) {
                Some(targets) => expanded.extend(targets.iter().cloned()),
                None => expanded.push(name.to_owned()),
            }
        }

        expanded
    }

    /// Export the table as an insertion-ordered map
    pub fn to_map(&self) -> IndexMap<String, Vec<String>> {
        self.entries.clone()
    }
}
