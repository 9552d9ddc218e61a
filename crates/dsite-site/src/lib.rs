//! Site description compilation for dsite.
//!
//! This crate provides:
//! - Tree model ([`NavNode`], [`PageNode`]) and validation
//! - Navigation flattening, capabilities and ancestor indexing
//! - Page tree compilation into content entries, menu items and search items
//! - [`ImportAggregator`] bookkeeping for generated module imports
//! - [`generate_app_config`]: the full build pipeline into a [`ConfigWriter`]
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use dsite_config::Config;
//! use dsite_site::{generate_app_config, load_site_description};
//! use dsite_writer::FsWriter;
//!
//! let config = Config::load(Some(Path::new("dsite.toml")), None)?;
//! let desc = load_site_description(&config.site_resolved)?;
//! let writer = FsWriter::new(config.build_resolved.build_dir());
//! let site = generate_app_config(&desc, &config.app, &config.build_resolved, &writer)?;
//! println!("{}", site.document_title());
//! # Ok(())
//! # }
//! ```
//!
//! [`ConfigWriter`]: dsite_writer::ConfigWriter

mod content;
mod generate;
mod imports;
mod naming;
mod navigation;
mod pattern;
mod search;
mod settings;
mod site_loader;
mod tree;

pub use content::{CompiledContent, ContentEntry, compile_content, join_route};
pub use generate::{
    CompiledSite, EVIDENCE_PATH, GenerateError, compile_site, generate_app_config, navigation_links,
};
pub use imports::{ImportAggregator, ImportEntry, ImportRef};
pub use naming::{pascal_case, start_case};
pub use navigation::{
    AncestorMap, Capabilities, CompiledNavItem, CompiledNavigation, MetaData, build_ancestor_map,
    build_selection_path, collect_capabilities, compile_navigation, flatten, inject_link,
    validate_items,
};
pub use pattern::{PatternSegment, parse_route_pattern, validate_route_pattern};
pub use search::{SearchItem, derive_search_items};
pub use settings::{ExtensionEntry, NameConfig, SettingsConfig, document_title, extension_entries};
pub use site_loader::{LoadError, NavigationConfig, SiteDescription, load_site_description};
pub use tree::{ModuleRef, NavNode, PageNode, TreeError, count_nodes, validate_navigation};

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(ImportAggregator: Send, Sync);
    static_assertions::assert_impl_all!(CompiledNavItem: Send, Sync);
    static_assertions::assert_impl_all!(AncestorMap: Send, Sync);
    static_assertions::assert_impl_all!(CompiledSite: Send, Sync);
}
