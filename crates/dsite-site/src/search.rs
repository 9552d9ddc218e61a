//! Search index derivation.

use serde::Serialize;

use crate::content::ContentEntry;

/// Search index entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchItem {
    /// Display title.
    pub title: String,
    /// Route of the page.
    pub path: String,
}

/// Derive search items from content entries.
///
/// Entries with a blank title are skipped; order follows `entries`.
#[must_use]
pub fn derive_search_items(entries: &[ContentEntry]) -> Vec<SearchItem> {
    entries
        .iter()
        .filter(|entry| !entry.title.trim().is_empty())
        .map(|entry| SearchItem {
            title: entry.title.clone(),
            path: entry.route.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::imports::ImportRef;

    fn entry(route: &str, title: &str) -> ContentEntry {
        ContentEntry {
            route: route.to_owned(),
            title: title.to_owned(),
            component_module: ImportRef {
                alias: "Page".to_owned(),
            },
        }
    }

    #[test]
    fn test_derive_search_items_skips_blank_titles() {
        let entries = vec![
            entry("/a", "Alpha"),
            entry("/b", ""),
            entry("/c", "   "),
            entry("/d", "Delta"),
        ];

        let items = derive_search_items(&entries);

        assert_eq!(
            items,
            vec![
                SearchItem {
                    title: "Alpha".to_owned(),
                    path: "/a".to_owned(),
                },
                SearchItem {
                    title: "Delta".to_owned(),
                    path: "/d".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_derive_search_items_empty() {
        assert!(derive_search_items(&[]).is_empty());
    }
}
