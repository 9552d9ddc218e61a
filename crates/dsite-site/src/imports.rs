//! Import bookkeeping for generated modules.
//!
//! Every generated module carries the list of modules it imports. An
//! [`ImportAggregator`] is scoped to one module of one compilation pass: it
//! deduplicates by module path and guarantees that two distinct module paths
//! never share an alias.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Reference to an imported module, usable in generated config values.
///
/// Serializes as `{"$import": "<alias>"}` so consumers can tell references
/// apart from inline data.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportRef {
    /// Alias bound to the imported module.
    #[serde(rename = "$import")]
    pub alias: String,
}

impl ImportRef {
    /// Alias bound to the imported module.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }
}

impl std::fmt::Display for ImportRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.alias)
    }
}

/// One `(module path, alias)` binding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEntry {
    /// Imported module path.
    pub module_path: String,
    /// Alias bound to the module.
    pub alias: String,
}

/// Append-only set of imports for one generated module.
///
/// Entries keep first-registration order, so identical inputs always yield
/// identical import lists.
#[derive(Clone, Debug, Default)]
pub struct ImportAggregator {
    entries: Vec<ImportEntry>,
    by_path: HashMap<String, usize>,
    aliases: HashSet<String>,
    side_effects: Vec<String>,
}

impl ImportAggregator {
    /// Create an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `module_path` and return a reference to it.
    ///
    /// Idempotent by module path: a path seen before returns its original
    /// alias regardless of `preferred_alias`. A new path gets
    /// `preferred_alias` (made identifier-safe) or, if another path already
    /// holds that alias, the first free `{alias}2`, `{alias}3`, ...
    pub fn add_import(&mut self, module_path: &str, preferred_alias: &str) -> ImportRef {
        if let Some(&idx) = self.by_path.get(module_path) {
            return ImportRef {
                alias: self.entries[idx].alias.clone(),
            };
        }

        let base = sanitize_alias(preferred_alias);
        let mut alias = base.clone();
        let mut suffix = 2;
        while self.aliases.contains(&alias) {
            alias = format!("{base}{suffix}");
            suffix += 1;
        }
        if alias != base {
            tracing::debug!(
                module_path,
                requested = %base,
                assigned = %alias,
                "Import alias collision resolved"
            );
        }

        self.by_path.insert(module_path.to_owned(), self.entries.len());
        self.aliases.insert(alias.clone());
        self.entries.push(ImportEntry {
            module_path: module_path.to_owned(),
            alias: alias.clone(),
        });

        ImportRef { alias }
    }

    /// Register a module imported only for its side effects.
    ///
    /// Duplicates are ignored; order of first registration is kept.
    pub fn add_side_effect(&mut self, module_path: &str) {
        if !self.side_effects.iter().any(|p| p == module_path) {
            self.side_effects.push(module_path.to_owned());
        }
    }

    /// Aliased imports in registration order.
    #[must_use]
    pub fn entries(&self) -> &[ImportEntry] {
        &self.entries
    }

    /// Side-effect imports in registration order.
    #[must_use]
    pub fn side_effects(&self) -> &[String] {
        &self.side_effects
    }

    /// Alias previously assigned to `module_path`.
    #[must_use]
    pub fn alias_of(&self, module_path: &str) -> Option<&str> {
        self.by_path
            .get(module_path)
            .map(|&idx| self.entries[idx].alias.as_str())
    }

    /// Whether nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.side_effects.is_empty()
    }
}

/// Make `alias` usable as an identifier in generated output.
fn sanitize_alias(alias: &str) -> String {
    let mut out: String = alias
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if out.is_empty() {
        out.push_str("module");
    } else if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}
