//! Active route resolution over compiled navigation items.
//!
//! # Architecture
//!
//! The resolver holds the item list as a shared `Arc<[CompiledNavItem]>` and
//! everything derived from it:
//! - key to index lookup
//! - the ancestor map
//! - route patterns of leaf items, sorted for match precedence
//!
//! Derived state is rebuilt only when [`NavigationResolver::replace_items`]
//! receives a different list (by pointer identity).

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use dsite_site::{AncestorMap, CompiledNavItem, build_ancestor_map, build_selection_path, validate_items};

use crate::NavError;
use crate::route::RoutePattern;

/// Resolves routes to navigation items and selection paths.
#[derive(Debug)]
pub struct NavigationResolver {
    items: Arc<[CompiledNavItem]>,
    index: HashMap<String, usize>,
    ancestors: AncestorMap,
    /// Leaf patterns with their item index, most specific first.
    routes: Vec<(RoutePattern, usize)>,
}

impl NavigationResolver {
    /// Build a resolver for `items`.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Tree`] if the items do not form a forest and
    /// [`NavError::InvalidPattern`] for an unparseable leaf path.
    pub fn new(items: Arc<[CompiledNavItem]>) -> Result<Self, NavError> {
        validate_items(&items)?;

        let index = items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.key.clone(), i))
            .collect();
        let ancestors = build_ancestor_map(&items);

        let mut routes = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| item.meta_data.as_ref().map(|meta| (meta.path.as_str(), i)))
            .map(|(path, i)| RoutePattern::parse(path).map(|pattern| (pattern, i)))
            .collect::<Result<Vec<_>, _>>()?;
        // Descending by lowercased pattern, then raw pattern; stable, so equal
        // patterns keep list order.
        routes.sort_by_cached_key(|(pattern, _)| {
            Reverse((pattern.as_str().to_lowercase(), pattern.as_str().to_owned()))
        });

        tracing::debug!(
            item_count = items.len(),
            route_count = routes.len(),
            "Built navigation resolver"
        );

        Ok(Self {
            items,
            index,
            ancestors,
            routes,
        })
    }

    /// Swap in a new item list.
    ///
    /// Returns `Ok(false)` without recomputing anything if `items` is the
    /// list already held. On error the previous state is kept.
    pub fn replace_items(&mut self, items: Arc<[CompiledNavItem]>) -> Result<bool, NavError> {
        if Arc::ptr_eq(&self.items, &items) {
            return Ok(false);
        }
        *self = Self::new(items)?;
        Ok(true)
    }

    /// Key of the item whose route pattern matches `route`.
    ///
    /// Patterns are tried in descending lexicographic order of their
    /// lowercased form, so `/docs/:id` wins over `/docs` whatever their case. `None` means no item matches.
    pub fn active_key(&self, route: &str) -> Option<&str> {
        self.routes
            .iter()
            .find(|(pattern, _)| pattern.matches(route))
            .map(|&(_, i)| self.items[i].key.as_str())
    }

    /// Root-to-`key` selection path.
    pub fn selection_path(&self, key: &str) -> Vec<String> {
        build_selection_path(key, &self.ancestors)
    }

    /// Item by key.
    pub fn item(&self, key: &str) -> Option<&CompiledNavItem> {
        self.index.get(key).map(|&i| &self.items[i])
    }

    /// Parent item of `key`.
    pub fn ancestor(&self, key: &str) -> Option<&CompiledNavItem> {
        self.ancestors.get(key)
    }

    /// Shared item list.
    pub fn items(&self) -> &Arc<[CompiledNavItem]> {
        &self.items
    }
}
