//! Configuration management for dsite.
//!
//! Parses `dsite.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `app.title`
//! - `app.headline`
//! - `app.subline`
//! - `build.placeholder_src`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override site prefix.
    pub prefix: Option<String>,
    /// Override the default locale written to the settings config.
    pub locale: Option<String>,
    /// Override test evidence link injection.
    pub include_test_evidence: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "dsite.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application branding, theming and extensions.
    pub app: AppConfig,
    /// Site description sources (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Build output configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,

    /// Resolved site description sources (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteSources,
    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Application branding and presentation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Site title (start-cased into the name config).
    pub title: String,
    /// Optional headline shown before the title in the document title.
    pub headline: Option<String>,
    /// Optional subline shown after the title in the document title.
    pub subline: Option<String>,
    /// Theme selected at startup.
    pub default_theme: Option<String>,
    /// Themes offered by the theme switcher.
    pub themes: Vec<String>,
    /// Locale selected at startup.
    pub default_locale: String,
    /// Locales offered by the locale switcher.
    pub locales: Vec<String>,
    /// Text direction selected at startup.
    pub default_direction: String,
    /// Application header extensions.
    pub extensions: Vec<ExtensionConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Dev Site".to_owned(),
            headline: None,
            subline: None,
            default_theme: None,
            themes: Vec::new(),
            default_locale: "en".to_owned(),
            locales: Vec::new(),
            default_direction: "ltr".to_owned(),
            extensions: Vec::new(),
        }
    }
}

/// Application header extension.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtensionConfig {
    /// Unique extension key.
    pub key: String,
    /// Display text.
    pub text: String,
    /// Module path of the icon component.
    pub icon: String,
    /// Module path of the extension component.
    pub component: String,
}

/// Raw site source configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    navigation: Option<String>,
    pages: Option<String>,
}

/// Resolved site description sources with absolute paths.
#[derive(Debug, Default)]
pub struct SiteSources {
    /// YAML file holding the navigation tree and index path.
    pub navigation: PathBuf,
    /// YAML file holding the page tree.
    pub pages: PathBuf,
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    output_dir: Option<String>,
    prefix: Option<String>,
    placeholder_src: Option<String>,
    include_test_evidence: Option<bool>,
    side_effect_imports: Option<Vec<String>>,
}

/// Resolved build configuration.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Root directory for generated modules.
    pub output_dir: PathBuf,
    /// Site prefix for multi-site builds (output subdirectory).
    pub prefix: Option<String>,
    /// Module path of the placeholder image.
    pub placeholder_src: Option<String>,
    /// Inject the test evidence navigation link.
    pub include_test_evidence: bool,
    /// Modules imported for side effects only.
    pub side_effect_imports: Vec<String>,
    /// Locale override for the settings config.
    pub locale: Option<String>,
}

impl BuildConfig {
    /// Directory receiving this site's generated modules.
    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        match &self.prefix {
            Some(prefix) if !prefix.is_empty() => self.output_dir.join(prefix),
            _ => self.output_dir.clone(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`app.title`").
        field: String,
        /// Error message (e.g., "${`SITE_TITLE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require `value` to be one of `allowed` when `allowed` is non-empty.
fn require_listed(value: &str, allowed: &[String], field: &str) -> Result<(), ConfigError> {
    if !allowed.is_empty() && !allowed.iter().any(|a| a == value) {
        return Err(ConfigError::Validation(format!(
            "{field} \"{value}\" is not one of [{}]",
            allowed.join(", ")
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `dsite.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(prefix) = &settings.prefix {
            self.build_resolved.prefix = Some(prefix.clone());
        }
        if let Some(locale) = &settings.locale {
            self.build_resolved.locale = Some(locale.clone());
        }
        if let Some(include) = settings.include_test_evidence {
            self.build_resolved.include_test_evidence = include;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            app: AppConfig::default(),
            site: SiteConfigRaw::default(),
            build: BuildConfigRaw::default(),
            site_resolved: SiteSources {
                navigation: base.join("site/navigation.yaml"),
                pages: base.join("site/pages.yaml"),
            },
            build_resolved: BuildConfig {
                output_dir: base.join("dev-site-config/build"),
                ..BuildConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI settings
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_app()?;
        self.validate_build()?;
        Ok(())
    }

    /// Validate app configuration.
    fn validate_app(&self) -> Result<(), ConfigError> {
        let app = &self.app;
        require_non_empty(&app.title, "app.title")?;
        require_non_empty(&app.default_locale, "app.default_locale")?;
        require_listed(&app.default_locale, &app.locales, "app.default_locale")?;
        if let Some(theme) = &app.default_theme {
            require_listed(theme, &app.themes, "app.default_theme")?;
        }

        let mut seen = std::collections::HashSet::new();
        for extension in &app.extensions {
            require_non_empty(&extension.key, "app.extensions.key")?;
            require_non_empty(&extension.component, "app.extensions.component")?;
            if !seen.insert(extension.key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "app.extensions key \"{}\" is defined more than once",
                    extension.key
                )));
            }
        }

        Ok(())
    }

    /// Validate build configuration.
    fn validate_build(&self) -> Result<(), ConfigError> {
        if let Some(locale) = &self.build_resolved.locale {
            require_listed(locale, &self.app.locales, "locale")?;
        }

        if let Some(prefix) = &self.build_resolved.prefix
            && (prefix.starts_with('/') || prefix.split('/').any(|s| s == ".."))
        {
            return Err(ConfigError::Validation(format!(
                "build.prefix \"{prefix}\" must be a relative path without '..'"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.app.title = expand::expand_env(&self.app.title, "app.title")?;
        expand::expand_opt(&mut self.app.headline, "app.headline")?;
        expand::expand_opt(&mut self.app.subline, "app.subline")?;
        expand::expand_opt(&mut self.build.placeholder_src, "build.placeholder_src")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.site_resolved = SiteSources {
            navigation: resolve(self.site.navigation.as_deref(), "site/navigation.yaml"),
            pages: resolve(self.site.pages.as_deref(), "site/pages.yaml"),
        };

        self.build_resolved = BuildConfig {
            output_dir: resolve(self.build.output_dir.as_deref(), "dev-site-config/build"),
            prefix: self.build.prefix.clone().filter(|p| !p.is_empty()),
            placeholder_src: self.build.placeholder_src.clone(),
            include_test_evidence: self.build.include_test_evidence.unwrap_or(false),
            side_effect_imports: self.build.side_effect_imports.clone().unwrap_or_default(),
            locale: None,
        };
    }
}
