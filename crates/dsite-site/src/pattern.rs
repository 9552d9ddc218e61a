//! Route pattern syntax.
//!
//! Leaf navigation paths are route patterns:
//! - literal segments
//! - `:name` for exactly one segment
//! - `:name?` for an optional segment
//! - `*` for the rest of the route (last segment only)
//!
//! Parsing lives here so the build rejects a pattern the runtime could not
//! compile.

/// One parsed pattern segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternSegment<'a> {
    Literal(&'a str),
    Param { name: &'a str, optional: bool },
    Rest,
}

/// Parse `pattern` into segments; empty segments are skipped.
///
/// # Errors
///
/// Returns the reason the pattern is malformed.
pub fn parse_route_pattern(pattern: &str) -> Result<Vec<PatternSegment<'_>>, &'static str> {
    let raw: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    raw.iter()
        .copied()
        .enumerate()
        .map(|(i, segment)| {
            if segment == "*" {
                if i + 1 != raw.len() {
                    return Err("`*` must be the last segment");
                }
                Ok(PatternSegment::Rest)
            } else if let Some(param) = segment.strip_prefix(':') {
                let (name, optional) = match param.strip_suffix('?') {
                    Some(name) => (name, true),
                    None => (param, false),
                };
                if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    return Err("parameter names must be non-empty identifiers");
                }
                Ok(PatternSegment::Param { name, optional })
            } else {
                Ok(PatternSegment::Literal(segment))
            }
        })
        .collect()
}

/// Check that `pattern` is a valid route pattern.
pub fn validate_route_pattern(pattern: &str) -> Result<(), &'static str> {
    parse_route_pattern(pattern).map(|_| ())
}
