//! Route patterns.
//!
//! Patterns use the usual client-side router syntax:
//! - literal segments, matched case-insensitively
//! - `:name` for exactly one segment
//! - `:name?` for an optional segment
//! - `*` for the rest of the route (last segment only)
//!
//! Matching is non-exact: a pattern matches the route itself and any route
//! below it on a segment boundary, so `/docs` matches `/docs/42` but not
//! `/docsx`.

use dsite_site::{PatternSegment, parse_route_pattern};
use regex::Regex;

use crate::NavError;

/// Compiled route pattern.
#[derive(Clone, Debug)]
pub struct RoutePattern {
    pattern: String,
    regex: Regex,
}

impl RoutePattern {
    /// Compile a pattern.
    pub fn parse(pattern: &str) -> Result<Self, NavError> {
        let invalid = |reason: &str| NavError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: reason.to_owned(),
        };

        let mut body = String::new();
        for segment in parse_route_pattern(pattern).map_err(invalid)? {
            match segment {
                PatternSegment::Literal(literal) => {
                    body.push('/');
                    body.push_str(&regex::escape(literal));
                }
                PatternSegment::Param { optional: true, .. } => body.push_str("(?:/[^/]+)?"),
                PatternSegment::Param { optional: false, .. } => body.push_str("/[^/]+"),
                PatternSegment::Rest => body.push_str("(?:/.*)?"),
            }
        }

        let regex = Regex::new(&format!("(?i)^{body}(?:/.*)?$"))
            .map_err(|e| invalid(&e.to_string()))?;

        Ok(Self {
            pattern: pattern.to_owned(),
            regex,
        })
    }

    /// Whether `route` is this pattern or lies below it.
    pub fn matches(&self, route: &str) -> bool {
        self.regex.is_match(route)
    }

    /// Pattern source.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}
