//! Input trees of a site description.
//!
//! Two trees describe a site:
//! - the navigation tree ([`NavNode`]) drives the menu structure
//! - the page tree ([`PageNode`]) drives routable content
//!
//! Both are owned value trees: each node owns its children, so a node can
//! never be shared between two parents by construction. What ownership
//! cannot rule out is two *distinct* nodes claiming the same identity
//! (key, path or route). Compiled output is keyed by those identities, so
//! a duplicate would give one compiled item two parents. [`validate_navigation`]
//! rejects such trees before anything is compiled.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::pattern::validate_route_pattern;

/// Reference to a component module supplied by the site author.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleRef(pub String);

impl ModuleRef {
    /// Module path as written in the site description.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleRef {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Navigation tree node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavNode {
    /// Unique node key.
    pub key: String,
    /// Display text.
    pub text: String,
    /// Route path; becomes the compiled item key.
    pub path: String,
    /// Child nodes. `Some` (even when empty) marks the node as a submenu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_items: Option<Vec<NavNode>>,
    /// Page types shown under this node; aggregated into capabilities.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub page_types: Vec<String>,
}

impl NavNode {
    /// Create a leaf node.
    #[must_use]
    pub fn leaf(key: impl Into<String>, text: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            path: path.into(),
            child_items: None,
            page_types: Vec::new(),
        }
    }

    /// Attach child nodes, turning this node into a submenu.
    #[must_use]
    pub fn with_children(mut self, children: Vec<NavNode>) -> Self {
        self.child_items = Some(children);
        self
    }

    /// Attach page types.
    #[must_use]
    pub fn with_page_types<I, S>(mut self, page_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.page_types = page_types.into_iter().map(Into::into).collect();
        self
    }

    /// Child nodes, empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[NavNode] {
        self.child_items.as_deref().unwrap_or_default()
    }
}

/// Page tree node.
///
/// Leaves carry a component; internal nodes are routing containers whose
/// `path` is a prefix for every descendant route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageNode {
    /// Display name; also the search title.
    pub name: String,
    /// Path segment appended to the parent route.
    pub path: String,
    /// Child pages. `Some` marks a routing container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<PageNode>>,
    /// Component rendered for a leaf page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ModuleRef>,
}

impl PageNode {
    /// Create a leaf page.
    #[must_use]
    pub fn leaf(name: impl Into<String>, path: impl Into<String>, component: &str) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            pages: None,
            component: Some(ModuleRef::from(component)),
        }
    }

    /// Create a routing container.
    #[must_use]
    pub fn container(name: impl Into<String>, path: impl Into<String>, pages: Vec<PageNode>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            pages: Some(pages),
            component: None,
        }
    }
}

/// Malformed site description.
///
/// Fatal at build time: compilation aborts and nothing is written.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Two navigation nodes share a key.
    #[error("Duplicate navigation key \"{key}\"")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
    /// Two navigation nodes share a path (and would share a compiled key).
    #[error("Duplicate navigation path \"{path}\"")]
    DuplicatePath {
        /// The repeated path.
        path: String,
    },
    /// A navigation node has an empty path.
    #[error("Navigation node \"{key}\" has an empty path")]
    EmptyPath {
        /// Key of the offending node.
        key: String,
    },
    /// A leaf navigation path is not a valid route pattern.
    #[error("Navigation node \"{key}\" has invalid route pattern \"{path}\": {reason}")]
    InvalidPattern {
        /// Key of the offending node.
        key: String,
        /// The rejected path.
        path: String,
        /// What is wrong with it.
        reason: String,
    },
    /// Two leaf pages resolve to the same route.
    #[error("Duplicate page route \"{route}\"")]
    DuplicateRoute {
        /// The repeated route.
        route: String,
    },
    /// A leaf page has no component.
    #[error("Page \"{route}\" has no component")]
    MissingComponent {
        /// Route of the offending page.
        route: String,
    },
    /// A compiled item lists a child key that has no item.
    #[error("Item \"{parent}\" lists unknown child \"{child}\"")]
    UnknownChild {
        /// Key of the listing item.
        parent: String,
        /// The unknown child key.
        child: String,
    },
    /// A compiled item is listed as a child by two items.
    #[error("Item \"{key}\" is a child of both \"{first}\" and \"{second}\"")]
    MultipleParents {
        /// The shared child key.
        key: String,
        /// First listing item.
        first: String,
        /// Second listing item.
        second: String,
    },
    /// A compiled item has `metaData` together with a submenu, or neither.
    #[error("Item \"{key}\" must carry route data iff it has no submenu")]
    MetaDataMismatch {
        /// Key of the offending item.
        key: String,
    },
    /// Following parents from an item never reaches a root.
    #[error("Item \"{key}\" is part of a parent cycle")]
    Cycle {
        /// An item on the cycle.
        key: String,
    },
}

/// Check that navigation keys and paths are unique across the whole tree
/// and that every leaf path is a valid route pattern.
///
/// # Errors
///
/// Returns the first [`TreeError`] found in pre-order.
pub fn validate_navigation(roots: &[NavNode]) -> Result<(), TreeError> {
    fn visit<'a>(
        nodes: &'a [NavNode],
        keys: &mut HashSet<&'a str>,
        paths: &mut HashSet<&'a str>,
    ) -> Result<(), TreeError> {
        for node in nodes {
            if !keys.insert(node.key.as_str()) {
                return Err(TreeError::DuplicateKey {
                    key: node.key.clone(),
                });
            }
            if node.path.is_empty() {
                return Err(TreeError::EmptyPath {
                    key: node.key.clone(),
                });
            }
            if !paths.insert(node.path.as_str()) {
                return Err(TreeError::DuplicatePath {
                    path: node.path.clone(),
                });
            }
            if node.child_items.is_none() {
                validate_route_pattern(&node.path).map_err(|reason| TreeError::InvalidPattern {
                    key: node.key.clone(),
                    path: node.path.clone(),
                    reason: reason.to_owned(),
                })?;
            }
            visit(node.children(), keys, paths)?;
        }
        Ok(())
    }

    visit(roots, &mut HashSet::new(), &mut HashSet::new())
}

/// Count nodes in a navigation tree.
#[must_use]
pub fn count_nodes(roots: &[NavNode]) -> usize {
    roots.iter().map(|node| 1 + count_nodes(node.children())).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Vec<NavNode> {
        vec![
            NavNode::leaf("a", "A", "/a").with_children(vec![
                NavNode::leaf("b", "B", "/b"),
                NavNode::leaf("c", "C", "/c").with_children(vec![
                    NavNode::leaf("d", "D", "/d"),
                    NavNode::leaf("e", "E", "/e"),
                ]),
            ]),
        ]
    }

    #[test]
    fn test_validate_accepts_tree() {
        assert_eq!(validate_navigation(&sample_tree()), Ok(()));
    }

    #[test]
    fn test_validate_duplicate_key_in_different_branches() {
        let roots = vec![
            NavNode::leaf("a", "A", "/a").with_children(vec![NavNode::leaf("x", "X", "/x1")]),
            NavNode::leaf("b", "B", "/b").with_children(vec![NavNode::leaf("x", "X", "/x2")]),
        ];

        let err = validate_navigation(&roots).unwrap_err();

        assert_eq!(err, TreeError::DuplicateKey { key: "x".to_owned() });
    }

    #[test]
    fn test_validate_duplicate_path() {
        let roots = vec![
            NavNode::leaf("a", "A", "/shared"),
            NavNode::leaf("b", "B", "/shared"),
        ];

        let err = validate_navigation(&roots).unwrap_err();

        assert_eq!(
            err,
            TreeError::DuplicatePath {
                path: "/shared".to_owned()
            }
        );
        assert_eq!(err.to_string(), "Duplicate navigation path \"/shared\"");
    }

    #[test]
    fn test_validate_empty_path() {
        let roots = vec![NavNode::leaf("a", "A", "")];

        assert_eq!(
            validate_navigation(&roots),
            Err(TreeError::EmptyPath { key: "a".to_owned() })
        );
    }

    #[test]
    fn test_validate_invalid_leaf_pattern() {
        let roots = vec![NavNode::leaf("bad", "Bad", "/docs/:")];

        let err = validate_navigation(&roots).unwrap_err();

        assert_eq!(
            err,
            TreeError::InvalidPattern {
                key: "bad".to_owned(),
                path: "/docs/:".to_owned(),
                reason: "parameter names must be non-empty identifiers".to_owned(),
            }
        );
        assert!(err.to_string().contains("\"bad\""));
    }

    #[test]
    fn test_validate_submenu_path_is_not_a_pattern() {
        let roots = vec![
            NavNode::leaf("files", "Files", "/files/*/all")
                .with_children(vec![NavNode::leaf("a", "A", "/files/:name")]),
        ];

        assert_eq!(validate_navigation(&roots), Ok(()));
    }

    #[test]
    fn test_count_nodes() {
        assert_eq!(count_nodes(&sample_tree()), 5);
        assert_eq!(count_nodes(&[]), 0);
    }

    #[test]
    fn test_nav_node_yaml_camel_case() {
        let yaml = "
key: components
text: Components
path: /components
pageTypes: [doc, test]
childItems:
  - key: button
    text: Button
    path: /components/button
";
        let node: NavNode = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(node.page_types, vec!["doc".to_owned(), "test".to_owned()]);
        assert_eq!(node.children().len(), 1);
        assert!(node.children()[0].child_items.is_none());
    }

    #[test]
    fn test_empty_child_items_is_still_submenu() {
        let node: NavNode =
            serde_yaml::from_str("key: a\ntext: A\npath: /a\nchildItems: []\n").unwrap();

        assert_eq!(node.child_items, Some(Vec::new()));
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_page_node_yaml() {
        let yaml = "
name: Components
path: /components
pages:
  - name: Button
    path: /button
    component: ./generated/Button
";
        let node: PageNode = serde_yaml::from_str(yaml).unwrap();

        let pages = node.pages.unwrap();
        assert_eq!(pages[0].component, Some(ModuleRef::from("./generated/Button")));
        assert!(node.component.is_none());
    }
}
