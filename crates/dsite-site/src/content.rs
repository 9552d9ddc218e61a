//! Page tree compilation.
//!
//! Walks the page tree once to compute routes, validate leaves and build
//! the menu tree, then registers component imports. Validation completes
//! before the first import is registered, so a failed compile leaves the
//! [`ImportAggregator`] untouched.

use std::collections::HashSet;

use serde::Serialize;

use crate::imports::{ImportAggregator, ImportRef};
use crate::naming::pascal_case;
use crate::navigation::{CompiledNavItem, flatten};
use crate::tree::{NavNode, PageNode, TreeError};

/// Routable content for one leaf page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    /// Full route from the tree root to the leaf.
    pub route: String,
    /// Page name, used as the search title.
    pub title: String,
    /// Import of the page component.
    pub component_module: ImportRef,
}

/// Result of compiling a page tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompiledContent {
    /// One entry per leaf page, in pre-order.
    pub content_entries: Vec<ContentEntry>,
    /// Flattened menu mirroring the page hierarchy.
    pub menu_items: Vec<CompiledNavItem>,
}

/// Join a parent route and a path segment with single slashes.
///
/// Both sides may carry leading or trailing slashes; the result always
/// starts with `/` and never ends with one (except the root `/`).
#[must_use]
pub fn join_route(parent: &str, segment: &str) -> String {
    let parts: Vec<&str> = [parent, segment]
        .iter()
        .map(|p| p.trim_matches('/'))
        .filter(|p| !p.is_empty())
        .collect();
    format!("/{}", parts.join("/"))
}

/// Compile a page tree into content entries and menu items.
///
/// Component imports are registered on `imports` in pre-order, aliased by
/// the pascal-cased page name.
///
/// # Errors
///
/// Returns [`TreeError::MissingComponent`] for a leaf page without a
/// component and [`TreeError::DuplicateRoute`] when two pages resolve to
/// the same route.
pub fn compile_content(
    pages: &[PageNode],
    imports: &mut ImportAggregator,
) -> Result<CompiledContent, TreeError> {
    let mut leaves = Vec::new();
    let mut seen = HashSet::new();
    let menu_tree = collect(pages, "", &mut leaves, &mut seen)?;

    let content_entries: Vec<ContentEntry> = leaves
        .into_iter()
        .filter_map(|(route, page)| {
            let component = page.component.as_ref()?;
            let alias = match pascal_case(&page.name) {
                alias if alias.is_empty() => "Page".to_owned(),
                alias => alias,
            };
            Some(ContentEntry {
                route,
                title: page.name.clone(),
                component_module: imports.add_import(component.as_str(), &alias),
            })
        })
        .collect();
    let menu_items = flatten(&menu_tree);

    tracing::info!(
        content_count = content_entries.len(),
        menu_item_count = menu_items.len(),
        "Compiled content"
    );

    Ok(CompiledContent {
        content_entries,
        menu_items,
    })
}

/// Validate pages and build the menu tree, collecting leaves with routes.
fn collect<'a>(
    pages: &'a [PageNode],
    parent_route: &str,
    leaves: &mut Vec<(String, &'a PageNode)>,
    seen: &mut HashSet<String>,
) -> Result<Vec<NavNode>, TreeError> {
    let mut nodes = Vec::with_capacity(pages.len());
    for page in pages {
        let route = join_route(parent_route, &page.path);
        if !seen.insert(route.clone()) {
            return Err(TreeError::DuplicateRoute { route });
        }

        let node = NavNode::leaf(route.clone(), page.name.clone(), route.clone());
        if let Some(children) = &page.pages {
            let child_nodes = collect(children, &route, leaves, seen)?;
            nodes.push(node.with_children(child_nodes));
        } else {
            if page.component.is_none() {
                return Err(TreeError::MissingComponent { route });
            }
            leaves.push((route, page));
            nodes.push(node);
        }
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_pages() -> Vec<PageNode> {
        vec![
            PageNode::leaf("Home", "/home", "./pages/Home"),
            PageNode::container(
                "Components",
                "/components",
                vec![
                    PageNode::leaf("Button", "/button", "./generated/Button"),
                    PageNode::container(
                        "Forms",
                        "forms/",
                        vec![PageNode::leaf("Date Picker", "date-picker", "./generated/DatePicker")],
                    ),
                ],
            ),
        ]
    }

    fn routes(content: &CompiledContent) -> Vec<&str> {
        content
            .content_entries
            .iter()
            .map(|e| e.route.as_str())
            .collect()
    }

    #[test]
    fn test_join_route() {
        assert_eq!(join_route("", ""), "/");
        assert_eq!(join_route("", "/home"), "/home");
        assert_eq!(join_route("/components", "/button"), "/components/button");
        assert_eq!(join_route("/components/", "forms/"), "/components/forms");
        assert_eq!(join_route("/a", ""), "/a");
    }

    #[test]
    fn test_compile_content_routes_in_pre_order() {
        let mut imports = ImportAggregator::new();

        let content = compile_content(&sample_pages(), &mut imports).unwrap();

        assert_eq!(
            routes(&content),
            vec![
                "/home",
                "/components/button",
                "/components/forms/date-picker"
            ]
        );
    }

    #[test]
    fn test_compile_content_registers_component_imports() {
        let mut imports = ImportAggregator::new();

        let content = compile_content(&sample_pages(), &mut imports).unwrap();

        assert_eq!(content.content_entries[2].component_module.alias(), "DatePicker");
        assert_eq!(imports.alias_of("./generated/Button"), Some("Button"));
        assert_eq!(imports.entries().len(), 3);
    }

    #[test]
    fn test_compile_content_shared_component_imported_once() {
        let pages = vec![
            PageNode::leaf("Intro", "/intro", "./pages/Markdown"),
            PageNode::leaf("Guide", "/guide", "./pages/Markdown"),
        ];
        let mut imports = ImportAggregator::new();

        let content = compile_content(&pages, &mut imports).unwrap();

        assert_eq!(imports.entries().len(), 1);
        assert_eq!(
            content.content_entries[0].component_module,
            content.content_entries[1].component_module
        );
    }

    #[test]
    fn test_compile_content_same_name_different_component() {
        let pages = vec![
            PageNode::leaf("Button", "/a", "./a/Button"),
            PageNode::leaf("Button", "/b", "./b/Button"),
        ];
        let mut imports = ImportAggregator::new();

        let content = compile_content(&pages, &mut imports).unwrap();

        assert_eq!(content.content_entries[0].component_module.alias(), "Button");
        assert_eq!(content.content_entries[1].component_module.alias(), "Button2");
    }

    #[test]
    fn test_compile_content_unnamed_page_alias() {
        let pages = vec![PageNode::leaf("", "/x", "./X")];
        let mut imports = ImportAggregator::new();

        let content = compile_content(&pages, &mut imports).unwrap();

        assert_eq!(content.content_entries[0].component_module.alias(), "Page");
    }

    #[test]
    fn test_compile_content_menu_mirrors_pages() {
        let mut imports = ImportAggregator::new();

        let content = compile_content(&sample_pages(), &mut imports).unwrap();

        let keys: Vec<_> = content.menu_items.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "/home",
                "/components",
                "/components/button",
                "/components/forms",
                "/components/forms/date-picker",
            ]
        );
        let components = &content.menu_items[1];
        assert!(components.has_sub_menu);
        assert_eq!(
            components.children(),
            &["/components/button".to_owned(), "/components/forms".to_owned()]
        );
        assert_eq!(content.menu_items[4].text, "Date Picker");
    }

    #[test]
    fn test_compile_content_missing_component_names_route() {
        let pages = vec![PageNode::container(
            "Components",
            "/components",
            vec![PageNode {
                name: "Broken".to_owned(),
                path: "/broken".to_owned(),
                pages: None,
                component: None,
            }],
        )];
        let mut imports = ImportAggregator::new();

        let err = compile_content(&pages, &mut imports).unwrap_err();

        assert_eq!(
            err,
            TreeError::MissingComponent {
                route: "/components/broken".to_owned()
            }
        );
        assert_eq!(err.to_string(), "Page \"/components/broken\" has no component");
    }

    #[test]
    fn test_compile_content_failure_registers_nothing() {
        let pages = vec![
            PageNode::leaf("Home", "/home", "./pages/Home"),
            PageNode::leaf("Again", "home", "./pages/Again"),
        ];
        let mut imports = ImportAggregator::new();

        let err = compile_content(&pages, &mut imports).unwrap_err();

        assert_eq!(
            err,
            TreeError::DuplicateRoute {
                route: "/home".to_owned()
            }
        );
        assert!(imports.is_empty());
    }

    #[test]
    fn test_content_entry_json_shape() {
        let mut imports = ImportAggregator::new();
        let pages = vec![PageNode::leaf("Home", "/home", "./pages/Home")];

        let content = compile_content(&pages, &mut imports).unwrap();

        assert_eq!(
            serde_json::to_value(&content.content_entries[0]).unwrap(),
            serde_json::json!({
                "route": "/home",
                "title": "Home",
                "componentModule": {"$import": "Home"}
            })
        );
    }
}
