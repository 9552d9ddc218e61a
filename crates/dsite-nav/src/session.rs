//! Navigation session: route and selection events for one UI session.

use crate::menu::{Breakpoint, MenuEvent, MenuState, MenuStateMachine};
use crate::resolver::NavigationResolver;

/// Route shown for unresolved routes.
pub const NOT_FOUND_ROUTE: &str = "/404";

/// Result of a route change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The route resolved to a navigation item.
    Active {
        key: String,
        selection_path: Vec<String>,
    },
    /// The caller should navigate to this route instead.
    Redirect(String),
    /// Show the not-found view.
    NotFound,
}

/// Active route, selection path and menu state of one UI session.
#[derive(Debug)]
pub struct NavigationSession {
    resolver: NavigationResolver,
    menu: MenuStateMachine,
    index_path: String,
    active_key: Option<String>,
    selection_path: Vec<String>,
}

impl NavigationSession {
    pub fn new(resolver: NavigationResolver, index_path: impl Into<String>, breakpoint: Breakpoint) -> Self {
        Self {
            resolver,
            menu: MenuStateMachine::new(breakpoint),
            index_path: index_path.into(),
            active_key: None,
            selection_path: Vec::new(),
        }
    }

    /// Resolve `route` and update the active item.
    ///
    /// Unmatched routes clear the selection: `/` redirects to the index
    /// path, the not-found route reports [`RouteOutcome::NotFound`], and
    /// anything else redirects to the not-found route.
    pub fn route_changed(&mut self, route: &str) -> RouteOutcome {
        if let Some(key) = self.resolver.active_key(route) {
            let key = key.to_owned();
            self.selection_path = self.resolver.selection_path(&key);
            self.active_key = Some(key.clone());
            return RouteOutcome::Active {
                key,
                selection_path: self.selection_path.clone(),
            };
        }

        self.active_key = None;
        self.selection_path.clear();

        let trimmed = route.trim_end_matches('/');
        let outcome = if trimmed.is_empty() && self.index_path.trim_end_matches('/') != trimmed {
            RouteOutcome::Redirect(self.index_path.clone())
        } else if trimmed.eq_ignore_ascii_case(NOT_FOUND_ROUTE) || trimmed.is_empty() {
            RouteOutcome::NotFound
        } else {
            RouteOutcome::Redirect(NOT_FOUND_ROUTE.to_owned())
        };
        tracing::debug!(route, ?outcome, "Route did not resolve");
        outcome
    }

    /// Select a menu item.
    ///
    /// For a leaf item, collapses the compact overlay and returns the route
    /// to navigate to, or `None` if the item is already active. Unknown
    /// keys and submenus leave all state unchanged.
    pub fn select(&mut self, key: &str) -> Option<String> {
        let Some(item) = self.resolver.item(key) else {
            tracing::warn!(key, "Ignoring selection of unknown navigation item");
            return None;
        };
        let Some(meta) = item.meta_data.as_ref().filter(|_| item.is_terminal()) else {
            tracing::debug!(key, "Ignoring selection of submenu item");
            return None;
        };
        let path = meta.path.clone();

        self.menu.handle(MenuEvent::TerminalSelection);
        if self.active_key.as_deref() == Some(key) {
            return None;
        }
        Some(path)
    }

    /// Forward a menu event.
    pub fn menu_event(&mut self, event: MenuEvent) -> MenuState {
        self.menu.handle(event)
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active_key.as_deref()
    }

    pub fn selection_path(&self) -> &[String] {
        &self.selection_path
    }

    pub fn menu(&self) -> &MenuStateMachine {
        &self.menu
    }

    pub fn resolver(&self) -> &NavigationResolver {
        &self.resolver
    }

    pub fn index_path(&self) -> &str {
        &self.index_path
    }
}
