//! Name, settings and extension configs derived from [`AppConfig`].

use dsite_config::{AppConfig, ExtensionConfig};
use serde::Serialize;

use crate::imports::{ImportAggregator, ImportRef};
use crate::naming::{pascal_case, start_case};

/// Application name shown in the header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NameConfig {
    /// Start-cased site title.
    pub title: String,
}

impl NameConfig {
    /// Build the name config from the app title.
    #[must_use]
    pub fn from_app(app: &AppConfig) -> Self {
        Self {
            title: start_case(&app.title),
        }
    }
}

/// Theme, locale and direction settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_theme: Option<String>,
    pub themes: Vec<String>,
    pub default_locale: String,
    pub locales: Vec<String>,
    pub default_direction: String,
}

impl SettingsConfig {
    /// Build settings from the app config; `locale` replaces the default
    /// locale when set.
    #[must_use]
    pub fn from_app(app: &AppConfig, locale: Option<&str>) -> Self {
        Self {
            default_theme: app.default_theme.clone(),
            themes: app.themes.clone(),
            default_locale: locale.map_or_else(|| app.default_locale.clone(), str::to_owned),
            locales: app.locales.clone(),
            default_direction: app.default_direction.clone(),
        }
    }
}

/// Header extension with imported icon and component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExtensionEntry {
    pub key: String,
    pub text: String,
    pub icon: ImportRef,
    pub component: ImportRef,
}

/// Register extension imports and build their entries.
///
/// Aliases are `{Key}Icon` and `{Key}Extension`.
pub fn extension_entries(
    extensions: &[ExtensionConfig],
    imports: &mut ImportAggregator,
) -> Vec<ExtensionEntry> {
    extensions
        .iter()
        .map(|ext| {
            let base = pascal_case(&ext.key);
            ExtensionEntry {
                key: ext.key.clone(),
                text: ext.text.clone(),
                icon: imports.add_import(&ext.icon, &format!("{base}Icon")),
                component: imports.add_import(&ext.component, &format!("{base}Extension")),
            }
        })
        .collect()
}

/// Browser document title: headline, title and subline joined by `" - "`.
///
/// Blank parts are omitted.
#[must_use]
pub fn document_title(app: &AppConfig) -> String {
    [
        app.headline.as_deref(),
        Some(app.title.as_str()),
        app.subline.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" - ")
}
