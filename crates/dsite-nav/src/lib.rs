//! Runtime navigation for dsite.
//!
//! Consumes the `navigationItems` produced by `dsite-site` and provides:
//! - [`RoutePattern`]: route pattern matching
//! - [`NavigationResolver`]: active item and selection path for a route
//! - [`MenuStateMachine`]: compact/pinned menu presentation
//! - [`NavigationSession`]: route and selection events for one UI session
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use dsite_nav::{Breakpoint, NavigationResolver, NavigationSession, RouteOutcome};
//! use dsite_site::{NavNode, flatten};
//!
//! let items = flatten(&[NavNode::leaf("docs", "Docs", "/docs")]);
//! let resolver = NavigationResolver::new(Arc::from(items)).unwrap();
//! let mut session = NavigationSession::new(resolver, "/docs", Breakpoint::Large);
//!
//! assert_eq!(session.route_changed("/"), RouteOutcome::Redirect("/docs".to_owned()));
//! ```

mod menu;
mod resolver;
mod route;
mod session;

use dsite_site::TreeError;

pub use menu::{Breakpoint, MenuEvent, MenuState, MenuStateMachine};
pub use resolver::NavigationResolver;
pub use route::RoutePattern;
pub use session::{NOT_FOUND_ROUTE, NavigationSession, RouteOutcome};

/// Navigation runtime error.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Loaded items do not form a forest.
    #[error("Invalid navigation items: {0}")]
    Tree(#[from] TreeError),
    /// A leaf path is not a valid route pattern.
    #[error("Invalid route pattern \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },
    /// Breakpoint name not recognized.
    #[error("Unknown breakpoint \"{0}\"")]
    UnknownBreakpoint(String),
}
