//! Site description loading.
//!
//! Reads the navigation and page trees from the YAML files named in
//! [`SiteSources`]. The compilers never touch the filesystem; everything
//! they see has been parsed here first.

use std::path::{Path, PathBuf};

use dsite_config::SiteSources;
use serde::Deserialize;

use crate::tree::{NavNode, PageNode};

/// Navigation file contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Route the root route redirects to.
    pub index: Option<String>,
    /// Root navigation links.
    pub links: Vec<NavNode>,
}

/// Complete, parsed site description.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteDescription {
    pub navigation: NavigationConfig,
    pub pages: Vec<PageNode>,
}

impl SiteDescription {
    /// Route the root route redirects to.
    ///
    /// Falls back to the first root link, then to `/`.
    #[must_use]
    pub fn index_path(&self) -> &str {
        self.navigation
            .index
            .as_deref()
            .or_else(|| self.navigation.links.first().map(|link| link.path.as_str()))
            .unwrap_or("/")
    }
}

/// Site description loading error.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid YAML for its tree.
    #[error("Failed to parse {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Load the navigation and page trees.
pub fn load_site_description(sources: &SiteSources) -> Result<SiteDescription, LoadError> {
    let navigation: NavigationConfig = read_yaml(&sources.navigation)?;
    let pages: Vec<PageNode> = read_yaml(&sources.pages)?;

    tracing::debug!(
        navigation = %sources.navigation.display(),
        pages = %sources.pages.display(),
        link_count = navigation.links.len(),
        page_count = pages.len(),
        "Loaded site description"
    );

    Ok(SiteDescription { navigation, pages })
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| LoadError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_sources(dir: &TempDir, navigation: &str, pages: &str) -> SiteSources {
        let sources = SiteSources {
            navigation: dir.path().join("navigation.yaml"),
            pages: dir.path().join("pages.yaml"),
        };
        fs::write(&sources.navigation, navigation).unwrap();
        fs::write(&sources.pages, pages).unwrap();
        sources
    }

    #[test]
    fn test_load_site_description() {
        let dir = TempDir::new().unwrap();
        let sources = write_sources(
            &dir,
            "index: /home\nlinks:\n  - key: home\n    text: Home\n    path: /home\n",
            "- name: Home\n  path: /home\n  component: ./pages/Home\n",
        );

        let desc = load_site_description(&sources).unwrap();

        assert_eq!(desc.index_path(), "/home");
        assert_eq!(desc.navigation.links.len(), 1);
        assert_eq!(desc.pages[0].name, "Home");
    }

    #[test]
    fn test_index_path_fallbacks() {
        let mut desc = SiteDescription::default();
        assert_eq!(desc.index_path(), "/");

        desc.navigation.links.push(NavNode::leaf("docs", "Docs", "/docs"));
        assert_eq!(desc.index_path(), "/docs");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let sources = SiteSources {
            navigation: dir.path().join("missing.yaml"),
            pages: dir.path().join("pages.yaml"),
        };

        let err = load_site_description(&sources).unwrap_err();

        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let sources = write_sources(&dir, "links: {not: a list}\n", "[]\n");

        let err = load_site_description(&sources).unwrap_err();

        assert!(matches!(err, LoadError::Yaml { .. }));
    }
}
