//! Settings infrastructure for hlsp.
//!
//! This module provides support for loading and parsing `hlsp.toml` files
//! to configure the highlight theme and extra file-extension mappings.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::highlight::Language;
use crate::style::{Color, Theme};

/// Name of the settings file searched for by [`discover_settings`].
pub const SETTINGS_FILE: &str = "hlsp.toml";

/// Root settings structure loaded from hlsp.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Theme configuration.
    pub theme: Option<ThemeSettings>,

    /// Extra extension mappings: extension -> language id.
    ///
    /// Keys are stored lowercase without a leading dot. When two keys
    /// normalise to the same extension, the last in sorted order wins.
    #[serde(default, deserialize_with = "extension_keys")]
    pub languages: Option<HashMap<String, String>>,
}

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}

fn extension_keys<'de, D>(deserializer: D) -> Result<Option<HashMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, String>>::deserialize(deserializer)?;
    Ok(raw.map(|map| {
        map.into_iter()
            .map(|(ext, id)| (normalize_extension(&ext), id))
            .collect()
    }))
}

/// Theme settings. Colours are `#rrggbb` strings and override `base`.
#[derive(Debug, Default, Deserialize)]
pub struct ThemeSettings {
    /// Built-in theme to start from: "light" (default) or "dark".
    pub base: Option<String>,
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub keyword: Option<String>,
    pub string: Option<String>,
    pub comment: Option<String>,
    pub operator: Option<String>,
}

impl Settings {
    /// Build the configured theme.
    ///
    /// Unknown base names and malformed colours are reported and ignored.
    pub fn theme(&self) -> Theme {
        let Some(ref settings) = self.theme else {
            return Theme::default();
        };

        let mut theme = match settings.base.as_deref() {
            Some(base) => Theme::by_name(base).unwrap_or_else(|| {
                tracing::warn!(base, "unknown base theme, using light");
                Theme::light()
            }),
            None => Theme::default(),
        };

        let overrides = [
            ("foreground", &settings.foreground, &mut theme.foreground),
            ("background", &settings.background, &mut theme.background),
            ("keyword", &settings.keyword, &mut theme.keyword),
            ("string", &settings.string, &mut theme.string),
            ("comment", &settings.comment, &mut theme.comment),
            ("operator", &settings.operator, &mut theme.operator),
        ];
        for (name, value, slot) in overrides {
            let Some(value) = value else { continue };
            match value.parse::<Color>() {
                Ok(color) => *slot = color,
                Err(e) => tracing::warn!(key = name, "ignoring theme colour: {}", e),
            }
        }

        theme
    }

    /// Language configured for `path`'s extension, if any.
    pub fn language_for(&self, path: &Path) -> Option<Language> {
        let languages = self.languages.as_ref()?;
        let ext = path.extension()?.to_str()?;
        let id = languages.get(&normalize_extension(ext))?;

        let language = Language::from_id(id);
        if language.is_none() {
            tracing::warn!(extension = ext, id = %id, "unknown language id in settings");
        }
        language
    }
}

/// Load settings from a settings file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to parse settings: {}", e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

/// Discover hlsp.toml by searching up the directory tree, then direct children.
///
/// Search order:
/// 1. Walk up from `start_dir` to filesystem root
/// 2. If not found, check immediate child directories of `start_dir`
///
/// Returns `(settings, settings_dir)` where `settings_dir` is the directory
/// containing the found file. If not found, returns
/// `(Settings::default(), start_dir)`.
pub fn discover_settings(start_dir: &Path) -> (Settings, PathBuf) {
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join(SETTINGS_FILE);
        if candidate.is_file() {
            return (load_settings(&candidate), dir.to_path_buf());
        }
        current = dir.parent();
    }

    if let Ok(entries) = std::fs::read_dir(start_dir) {
        for entry in entries.flatten() {
            if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                let candidate = entry.path().join(SETTINGS_FILE);
                if candidate.is_file() {
                    return (load_settings(&candidate), entry.path());
                }
            }
        }
    }

    (Settings::default(), start_dir.to_path_buf())
}
