//! App config generation.
//!
//! Compiles a [`SiteDescription`] into the named modules the site runtime
//! loads, then hands them to a [`ConfigWriter`].
//!
//! # Modules
//!
//! Written in this order, each as `{ imports, sideEffects, config }`:
//! - `settingsConfig`: themes, locales and direction
//! - `nameConfig`: start-cased title
//! - `menuItems`: flattened page-tree menu
//! - `contentConfig`: route entries importing page components
//! - `navigationItems`: flattened navigation links
//! - `extensionsConfig`: header extensions (only when configured)
//! - `searchItems`: search index (not imported by `siteConfig`)
//! - `siteConfig`: aggregate importing the modules above
//!
//! Every module is built in memory before the first write, so a
//! malformed description never leaves a partial build behind.

use dsite_config::{AppConfig, BuildConfig};
use dsite_writer::{ConfigWriter, GeneratedModule, WriteError};
use serde::Serialize;

use crate::content::{ContentEntry, compile_content};
use crate::imports::{ImportAggregator, ImportEntry, ImportRef};
use crate::navigation::{Capabilities, compile_navigation, inject_link};
use crate::search::derive_search_items;
use crate::settings::{NameConfig, SettingsConfig, document_title, extension_entries};
use crate::site_loader::{LoadError, SiteDescription};
use crate::tree::{NavNode, TreeError};

/// Path of the injected test evidence link.
pub const EVIDENCE_PATH: &str = "/evidence";

/// App config generation error.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Malformed site description.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// Site description could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// A module could not be built or persisted.
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Wire format of a generated module.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModuleBody<'a, T: Serialize> {
    imports: &'a [ImportEntry],
    side_effects: &'a [String],
    config: &'a T,
}

/// Contents of the `contentConfig` module.
#[derive(Serialize)]
struct ContentConfig<'a> {
    content: &'a [ContentEntry],
}

/// Contents of the `siteConfig` module.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SiteConfig<'a> {
    name_config: ImportRef,
    settings_config: ImportRef,
    menu_items: ImportRef,
    content_config: ImportRef,
    navigation_items: ImportRef,
    index_path: &'a str,
    capabilities: &'a Capabilities,
    #[serde(skip_serializing_if = "Option::is_none")]
    extensions: Option<ImportRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder_src: Option<ImportRef>,
}

/// Compiled, not yet persisted, app config.
#[derive(Clone, Debug)]
pub struct CompiledSite {
    modules: Vec<GeneratedModule>,
    document_title: String,
    index_path: String,
}

impl CompiledSite {
    /// Modules in write order.
    #[must_use]
    pub fn modules(&self) -> &[GeneratedModule] {
        &self.modules
    }

    /// Module by name.
    #[must_use]
    pub fn module(&self, name: &str) -> Option<&GeneratedModule> {
        self.modules.iter().find(|m| m.name() == name)
    }

    /// Browser document title.
    #[must_use]
    pub fn document_title(&self) -> &str {
        &self.document_title
    }

    /// Route the root route redirects to.
    #[must_use]
    pub fn index_path(&self) -> &str {
        &self.index_path
    }

    /// Write every module through `writer`, in order.
    pub fn persist(&self, writer: &dyn ConfigWriter) -> Result<(), WriteError> {
        for module in &self.modules {
            writer.write(module)?;
        }
        tracing::info!(module_count = self.modules.len(), "Persisted app config");
        Ok(())
    }
}

/// Collects modules and registers each one on the `siteConfig` imports.
struct ModuleSet {
    modules: Vec<GeneratedModule>,
    site_imports: ImportAggregator,
}

impl ModuleSet {
    /// Build a module from its own imports and config.
    fn build<T: Serialize>(
        name: &str,
        imports: &ImportAggregator,
        config: &T,
    ) -> Result<GeneratedModule, WriteError> {
        GeneratedModule::from_serialize(
            name,
            &ModuleBody {
                imports: imports.entries(),
                side_effects: imports.side_effects(),
                config,
            },
        )
    }

    /// Add a module and import it from `siteConfig`.
    fn add_config<T: Serialize>(
        &mut self,
        name: &str,
        imports: &ImportAggregator,
        config: &T,
    ) -> Result<ImportRef, WriteError> {
        let module = Self::build(name, imports, config)?;
        let import = self.site_imports.add_import(&module.import_path(), name);
        self.modules.push(module);
        Ok(import)
    }

    /// Add a module that `siteConfig` does not import.
    fn add_detached<T: Serialize>(&mut self, name: &str, config: &T) -> Result<(), WriteError> {
        let module = Self::build(name, &ImportAggregator::new(), config)?;
        self.modules.push(module);
        Ok(())
    }
}

/// Root navigation links for a build.
///
/// Appends the test evidence link when the build asks for it and no root
/// link already uses its path.
pub fn navigation_links(desc: &SiteDescription, build: &BuildConfig) -> Vec<NavNode> {
    let mut links = desc.navigation.links.clone();
    if build.include_test_evidence {
        let evidence = NavNode::leaf("evidence", "Evidence", EVIDENCE_PATH).with_page_types(["evidence"]);
        if !inject_link(&mut links, evidence) {
            tracing::debug!(path = EVIDENCE_PATH, "Evidence link already present");
        }
    }
    links
}

/// Compile a site description into its app config modules.
///
/// Pure: nothing is written.
pub fn compile_site(
    desc: &SiteDescription,
    app: &AppConfig,
    build: &BuildConfig,
) -> Result<CompiledSite, GenerateError> {
    let navigation = compile_navigation(&navigation_links(desc, build))?;
    let mut content_imports = ImportAggregator::new();
    let content = compile_content(&desc.pages, &mut content_imports)?;
    let search_items = derive_search_items(&content.content_entries);

    let mut set = ModuleSet {
        modules: Vec::new(),
        site_imports: ImportAggregator::new(),
    };
    let no_imports = ImportAggregator::new();

    let settings_config = set.add_config(
        "settingsConfig",
        &no_imports,
        &SettingsConfig::from_app(app, build.locale.as_deref()),
    )?;
    let name_config = set.add_config("nameConfig", &no_imports, &NameConfig::from_app(app))?;
    let menu_items = set.add_config("menuItems", &no_imports, &content.menu_items)?;
    let content_config = set.add_config(
        "contentConfig",
        &content_imports,
        &ContentConfig {
            content: &content.content_entries,
        },
    )?;
    let navigation_items = set.add_config("navigationItems", &no_imports, &navigation.items)?;

    let extensions = if app.extensions.is_empty() {
        None
    } else {
        let mut extension_imports = ImportAggregator::new();
        let entries = extension_entries(&app.extensions, &mut extension_imports);
        Some(set.add_config("extensionsConfig", &extension_imports, &entries)?)
    };

    set.add_detached("searchItems", &search_items)?;

    let placeholder_src = build
        .placeholder_src
        .as_deref()
        .map(|src| set.site_imports.add_import(src, "placeholderSrc"));
    for module_path in &build.side_effect_imports {
        set.site_imports.add_side_effect(module_path);
    }

    let index_path = desc.index_path();
    let site_config = SiteConfig {
        name_config,
        settings_config,
        menu_items,
        content_config,
        navigation_items,
        index_path,
        capabilities: &navigation.capabilities,
        extensions,
        placeholder_src,
    };
    let site_module = ModuleSet::build("siteConfig", &set.site_imports, &site_config)?;
    set.modules.push(site_module);

    tracing::info!(
        module_count = set.modules.len(),
        navigation_items = navigation.items.len(),
        content_entries = content.content_entries.len(),
        search_items = search_items.len(),
        "Compiled app config"
    );

    Ok(CompiledSite {
        modules: set.modules,
        document_title: document_title(app),
        index_path: index_path.to_owned(),
    })
}

/// Compile a site description and persist every module.
///
/// Nothing is written unless compilation succeeds.
pub fn generate_app_config(
    desc: &SiteDescription,
    app: &AppConfig,
    build: &BuildConfig,
    writer: &dyn ConfigWriter,
) -> Result<CompiledSite, GenerateError> {
    let site = compile_site(desc, app, build)?;
    site.persist(writer)?;
    Ok(site)
}

#[cfg(test)]
mod tests {
    use dsite_config::ExtensionConfig;
    use dsite_writer::MockWriter;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::site_loader::NavigationConfig;
    use crate::tree::PageNode;

    fn description() -> SiteDescription {
        SiteDescription {
            navigation: NavigationConfig {
                index: Some("/home".to_owned()),
                links: vec![
                    NavNode::leaf("home", "Home", "/home"),
                    NavNode::leaf("components", "Components", "/components")
                        .with_page_types(["doc", "test"]),
                ],
            },
            pages: vec![
                PageNode::leaf("Home", "/home", "./pages/Home"),
                PageNode::container(
                    "Components",
                    "/components",
                    vec![PageNode::leaf("Button", "/button", "./generated/Button")],
                ),
            ],
        }
    }

    fn names(site: &CompiledSite) -> Vec<&str> {
        site.modules().iter().map(GeneratedModule::name).collect()
    }

    #[test]
    fn test_compile_site_module_order() {
        let site = compile_site(&description(), &AppConfig::default(), &BuildConfig::default()).unwrap();

        assert_eq!(
            names(&site),
            vec![
                "settingsConfig",
                "nameConfig",
                "menuItems",
                "contentConfig",
                "navigationItems",
                "searchItems",
                "siteConfig",
            ]
        );
    }

    #[test]
    fn test_site_config_imports_modules_but_not_search() {
        let site = compile_site(&description(), &AppConfig::default(), &BuildConfig::default()).unwrap();

        let body = site.module("siteConfig").unwrap().body();
        let paths: Vec<_> = body["imports"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["modulePath"].as_str().unwrap())
            .collect();

        assert_eq!(
            paths,
            vec![
                "./settingsConfig",
                "./nameConfig",
                "./menuItems",
                "./contentConfig",
                "./navigationItems",
            ]
        );
        assert_eq!(body["config"]["nameConfig"], json!({"$import": "nameConfig"}));
        assert_eq!(body["config"]["indexPath"], json!("/home"));
        assert_eq!(body["config"]["capabilities"], json!({"doc": true, "test": true}));
        assert!(body["config"].get("extensions").is_none());
        assert!(body["config"].get("placeholderSrc").is_none());
    }

    #[test]
    fn test_content_config_imports_components() {
        let site = compile_site(&description(), &AppConfig::default(), &BuildConfig::default()).unwrap();

        let body = site.module("contentConfig").unwrap().body();

        assert_eq!(
            body["imports"],
            json!([
                {"modulePath": "./pages/Home", "alias": "Home"},
                {"modulePath": "./generated/Button", "alias": "Button"},
            ])
        );
        assert_eq!(
            body["config"]["content"][1],
            json!({
                "route": "/components/button",
                "title": "Button",
                "componentModule": {"$import": "Button"}
            })
        );
    }

    #[test]
    fn test_search_items_module() {
        let site = compile_site(&description(), &AppConfig::default(), &BuildConfig::default()).unwrap();

        let body = site.module("searchItems").unwrap().body();

        assert_eq!(
            body["config"],
            json!([
                {"title": "Home", "path": "/home"},
                {"title": "Button", "path": "/components/button"},
            ])
        );
    }

    #[test]
    fn test_evidence_link_injected() {
        let build = BuildConfig {
            include_test_evidence: true,
            ..BuildConfig::default()
        };

        let site = compile_site(&description(), &AppConfig::default(), &build).unwrap();

        let items = &site.module("navigationItems").unwrap().body()["config"];
        assert_eq!(items.as_array().unwrap().len(), 3);
        assert_eq!(items[2]["key"], json!(EVIDENCE_PATH));
        assert_eq!(items[2]["text"], json!("Evidence"));
        let capabilities = &site.module("siteConfig").unwrap().body()["config"]["capabilities"];
        assert_eq!(capabilities["evidence"], json!(true));
    }

    #[test]
    fn test_evidence_link_not_duplicated() {
        let mut desc = description();
        desc.navigation
            .links
            .push(NavNode::leaf("my-evidence", "My Evidence", EVIDENCE_PATH));
        let build = BuildConfig {
            include_test_evidence: true,
            ..BuildConfig::default()
        };

        let site = compile_site(&desc, &AppConfig::default(), &build).unwrap();

        let items = &site.module("navigationItems").unwrap().body()["config"];
        assert_eq!(items.as_array().unwrap().len(), 3);
        assert_eq!(items[2]["text"], json!("My Evidence"));
    }

    #[test]
    fn test_extensions_placeholder_and_side_effects() {
        let app = AppConfig {
            extensions: vec![ExtensionConfig {
                key: "github".to_owned(),
                text: "GitHub".to_owned(),
                icon: "./extensions/GithubIcon".to_owned(),
                component: "./extensions/GithubExtension".to_owned(),
            }],
            ..AppConfig::default()
        };
        let build = BuildConfig {
            placeholder_src: Some("./placeholder.png".to_owned()),
            side_effect_imports: vec!["./polyfills".to_owned(), "./polyfills".to_owned()],
            ..BuildConfig::default()
        };

        let site = compile_site(&description(), &app, &build).unwrap();

        assert!(names(&site).contains(&"extensionsConfig"));
        let body = site.module("siteConfig").unwrap().body();
        assert_eq!(body["config"]["extensions"], json!({"$import": "extensionsConfig"}));
        assert_eq!(body["config"]["placeholderSrc"], json!({"$import": "placeholderSrc"}));
        assert_eq!(body["sideEffects"], json!(["./polyfills"]));
        let extensions = site.module("extensionsConfig").unwrap().body();
        assert_eq!(extensions["config"][0]["icon"], json!({"$import": "GithubIcon"}));
    }

    #[test]
    fn test_locale_override_and_title() {
        let app = AppConfig {
            title: "terra dev-site".to_owned(),
            headline: Some("Terra".to_owned()),
            locales: vec!["en".to_owned(), "es".to_owned()],
            ..AppConfig::default()
        };
        let build = BuildConfig {
            locale: Some("es".to_owned()),
            ..BuildConfig::default()
        };

        let site = compile_site(&description(), &app, &build).unwrap();

        assert_eq!(
            site.module("settingsConfig").unwrap().body()["config"]["defaultLocale"],
            json!("es")
        );
        assert_eq!(
            site.module("nameConfig").unwrap().body()["config"],
            json!({"title": "Terra Dev Site"})
        );
        assert_eq!(site.document_title(), "Terra - terra dev-site");
    }

    #[test]
    fn test_compile_site_is_deterministic() {
        let first = compile_site(&description(), &AppConfig::default(), &BuildConfig::default()).unwrap();
        let second = compile_site(&description(), &AppConfig::default(), &BuildConfig::default()).unwrap();

        let bodies = |site: &CompiledSite| {
            site.modules()
                .iter()
                .map(|m| serde_json::to_string(m.body()).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(bodies(&first), bodies(&second));
    }

    #[test]
    fn test_generate_writes_all_modules() {
        let writer = MockWriter::new();

        let site = generate_app_config(
            &description(),
            &AppConfig::default(),
            &BuildConfig::default(),
            &writer,
        )
        .unwrap();

        assert_eq!(writer.len(), site.modules().len());
        assert_eq!(
            writer.get("nameConfig").unwrap()["config"],
            json!({"title": "Dev Site"})
        );
    }

    #[test]
    fn test_generate_malformed_tree_writes_nothing() {
        let mut desc = description();
        desc.pages.push(PageNode {
            name: "Broken".to_owned(),
            path: "/broken".to_owned(),
            pages: None,
            component: None,
        });
        let writer = MockWriter::new();

        let err = generate_app_config(&desc, &AppConfig::default(), &BuildConfig::default(), &writer)
            .unwrap_err();

        assert!(matches!(
            err,
            GenerateError::Tree(TreeError::MissingComponent { .. })
        ));
        assert!(writer.is_empty());
    }

    #[test]
    fn test_generate_duplicate_navigation_key_writes_nothing() {
        let mut desc = description();
        desc.navigation
            .links
            .push(NavNode::leaf("home", "Home again", "/home-again"));
        let writer = MockWriter::new();

        let err = generate_app_config(&desc, &AppConfig::default(), &BuildConfig::default(), &writer)
            .unwrap_err();

        assert_eq!(err.to_string(), "Duplicate navigation key \"home\"");
        assert!(writer.is_empty());
    }

    #[test]
    fn test_generate_propagates_write_failure() {
        let writer = MockWriter::new().failing_on("menuItems");

        let err = generate_app_config(
            &description(),
            &AppConfig::default(),
            &BuildConfig::default(),
            &writer,
        )
        .unwrap_err();

        assert!(matches!(err, GenerateError::Write(_)));
    }
}
