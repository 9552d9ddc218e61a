//! Navigation tree flattening and ancestor indexing.
//!
//! # Architecture
//!
//! The navigation tree is compiled into a flat `Vec<CompiledNavItem>` in
//! pre-order: every parent precedes all of its descendants and siblings keep
//! their input order. Parent/child structure survives only as `child_keys`
//! on each item, so the runtime can rebuild it with [`build_ancestor_map`]:
//! - O(n) ancestor map construction via a child-key index
//! - O(d) selection path building where d is the item depth

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::tree::{NavNode, TreeError, count_nodes, validate_navigation};

/// Leaf routing data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaData {
    /// Route pattern of the leaf.
    pub path: String,
}

/// Flattened navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledNavItem {
    /// Item key (the node path).
    pub key: String,
    /// Display text.
    pub text: String,
    /// True if the node declared children.
    pub has_sub_menu: bool,
    /// Keys of the direct children, in input order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_keys: Option<Vec<String>>,
    /// Routing data, present iff the item is a leaf.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<MetaData>,
}

impl CompiledNavItem {
    fn from_node(node: &NavNode) -> Self {
        let has_sub_menu = node.child_items.is_some();
        Self {
            key: node.path.clone(),
            text: node.text.clone(),
            has_sub_menu,
            child_keys: node
                .child_items
                .as_ref()
                .map(|children| children.iter().map(|c| c.path.clone()).collect()),
            meta_data: (!has_sub_menu).then(|| MetaData {
                path: node.path.clone(),
            }),
        }
    }

    /// Whether selecting this item ends navigation (no submenu).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !self.has_sub_menu
    }

    /// Child keys, empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[String] {
        self.child_keys.as_deref().unwrap_or_default()
    }
}

/// Distinct page types observed across a navigation tree.
///
/// Serialized as an object of `"<pageType>": true` entries in sorted order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Capabilities(BTreeSet<String>);

impl Capabilities {
    /// Whether the capability is present.
    #[must_use]
    pub fn contains(&self, page_type: &str) -> bool {
        self.0.contains(page_type)
    }

    /// Capabilities in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of distinct capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no page types were observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Capabilities {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|name| (name, true)))
    }
}

impl<'a> FromIterator<&'a str> for Capabilities {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_owned).collect())
    }
}

/// Result of compiling a navigation tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompiledNavigation {
    /// Items in pre-order.
    pub items: Vec<CompiledNavItem>,
    /// Page types observed across the tree.
    pub capabilities: Capabilities,
}

/// Validate and compile a navigation tree.
///
/// # Errors
///
/// Returns [`TreeError`] if keys or paths are not unique.
pub fn compile_navigation(roots: &[NavNode]) -> Result<CompiledNavigation, TreeError> {
    validate_navigation(roots)?;

    let items = flatten(roots);
    let capabilities = collect_capabilities(roots);
    debug_assert_eq!(items.len(), count_nodes(roots));

    tracing::info!(
        item_count = items.len(),
        capability_count = capabilities.len(),
        "Compiled navigation"
    );

    Ok(CompiledNavigation {
        items,
        capabilities,
    })
}

/// Flatten a navigation tree in pre-order.
///
/// Emits one item per node; a node's descendants follow it immediately.
#[must_use]
pub fn flatten(roots: &[NavNode]) -> Vec<CompiledNavItem> {
    fn flatten_into(nodes: &[NavNode], out: &mut Vec<CompiledNavItem>) {
        for node in nodes {
            out.push(CompiledNavItem::from_node(node));
            flatten_into(node.children(), out);
        }
    }

    let mut items = Vec::new();
    flatten_into(roots, &mut items);
    items
}

/// Collect the distinct page types of every node in the tree.
#[must_use]
pub fn collect_capabilities(roots: &[NavNode]) -> Capabilities {
    fn collect<'a>(nodes: &'a [NavNode], out: &mut BTreeSet<&'a str>) {
        for node in nodes {
            out.extend(node.page_types.iter().map(String::as_str));
            collect(node.children(), out);
        }
    }

    let mut page_types = BTreeSet::new();
    collect(roots, &mut page_types);
    page_types.into_iter().collect()
}

/// Append `link` to the root links unless a link with the same path exists.
///
/// Returns `true` if the link was added.
pub fn inject_link(links: &mut Vec<NavNode>, link: NavNode) -> bool {
    if links.iter().any(|l| l.path == link.path) {
        return false;
    }
    links.push(link);
    true
}

/// Mapping from item key to the item listing it as a child.
///
/// Root items have no entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AncestorMap {
    parents: HashMap<String, CompiledNavItem>,
}

impl AncestorMap {
    /// Parent item of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CompiledNavItem> {
        self.parents.get(key)
    }

    /// Number of items that have a parent.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Whether no item has a parent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Build the ancestor map of a flattened item list.
///
/// For every item, records the first item (in list order) whose
/// `child_keys` contain its key. Child keys with no matching item are
/// ignored.
#[must_use]
pub fn build_ancestor_map(items: &[CompiledNavItem]) -> AncestorMap {
    let keys: HashSet<&str> = items.iter().map(|item| item.key.as_str()).collect();

    let mut parents = HashMap::new();
    for item in items {
        for child in item.children() {
            if keys.contains(child.as_str()) && !parents.contains_key(child) {
                parents.insert(child.clone(), item.clone());
            }
        }
    }

    AncestorMap { parents }
}

/// Build the root-to-`key` selection path.
///
/// The path always ends with `key`; a key without an ancestor yields
/// `[key]`. The walk is bounded by the map size, so a malformed map with a
/// parent cycle stops instead of looping.
#[must_use]
pub fn build_selection_path(key: &str, ancestors: &AncestorMap) -> Vec<String> {
    let mut path = vec![key.to_owned()];
    let mut current = key;
    while let Some(parent) = ancestors.get(current) {
        if path.len() > ancestors.len() {
            tracing::warn!(key, "Parent cycle detected while building selection path");
            break;
        }
        path.push(parent.key.clone());
        current = &parent.key;
    }
    path.reverse();
    path
}

/// Check that a flattened item list forms a forest.
///
/// Keys must be unique, an item carries `metaData` iff it has no submenu,
/// child keys must refer to items, no item may have two parents, and every
/// item must reach a root by following parents.
///
/// # Errors
///
/// Returns the first [`TreeError`] found.
pub fn validate_items(items: &[CompiledNavItem]) -> Result<(), TreeError> {
    let mut keys = HashSet::new();
    for item in items {
        if !keys.insert(item.key.as_str()) {
            return Err(TreeError::DuplicateKey {
                key: item.key.clone(),
            });
        }
        if item.has_sub_menu == item.meta_data.is_some()
            || item.has_sub_menu != item.child_keys.is_some()
        {
            return Err(TreeError::MetaDataMismatch {
                key: item.key.clone(),
            });
        }
    }

    let mut parent_of: HashMap<&str, &str> = HashMap::new();
    for item in items {
        for child in item.children() {
            if !keys.contains(child.as_str()) {
                return Err(TreeError::UnknownChild {
                    parent: item.key.clone(),
                    child: child.clone(),
                });
            }
            if let Some(first) = parent_of.insert(child.as_str(), item.key.as_str()) {
                return Err(TreeError::MultipleParents {
                    key: child.clone(),
                    first: first.to_owned(),
                    second: item.key.clone(),
                });
            }
        }
    }

    for item in items {
        let mut current = item.key.as_str();
        let mut steps = 0;
        while let Some(&parent) = parent_of.get(current) {
            steps += 1;
            if steps > items.len() {
                return Err(TreeError::Cycle {
                    key: item.key.clone(),
                });
            }
            current = parent;
        }
    }

    Ok(())
}
