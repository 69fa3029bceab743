//! Operator settings (catalog location, default exhibition).
//!
//! The settings file is `~/.config/exhibitor/settings.toml`:
//!
//! ```toml
//! [catalog]
//! dir = "/srv/exhibitor/catalog"
//! exhibition = "ishtar-2019"
//! ```

use std::path::{Path, PathBuf};

use crate::error::CliError;

pub(crate) const DEFAULT_CATALOG_DIR: &str = "catalog";
pub(crate) const DEFAULT_EXHIBITION: &str = "ishtar-2019";

/// Canonical path to the settings file.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("exhibitor").join("settings.toml")
}

/// Where a resolved setting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Source {
    Flag,
    SettingsFile,
    Default,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Flag => "command line",
            Self::SettingsFile => "settings file",
            Self::Default => "default",
        })
    }
}

/// Values read from `settings.toml`. Absent keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Settings {
    pub catalog_dir: Option<PathBuf>,
    pub exhibition: Option<String>,
}

impl Settings {
    /// Load the settings file, or empty settings when it does not exist.
    pub(crate) fn load(path: &Path) -> Result<Self, CliError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Self::parse(&contents).map_err(|msg| CliError::config(format!("{}: {msg}", path.display())))
    }

    fn parse(contents: &str) -> Result<Self, String> {
        let doc: toml::Value = contents.parse().map_err(|e: toml::de::Error| e.to_string())?;
        let Some(catalog) = doc.get("catalog") else {
            return Ok(Self::default());
        };
        let string = |key: &str| -> Result<Option<String>, String> {
            match catalog.get(key) {
                None => Ok(None),
                Some(toml::Value::String(s)) if s.is_empty() => Ok(None),
                Some(toml::Value::String(s)) => Ok(Some(s.clone())),
                Some(_) => Err(format!("catalog.{key} must be a string")),
            }
        };
        Ok(Self {
            catalog_dir: string("dir")?.map(PathBuf::from),
            exhibition: string("exhibition")?,
        })
    }

    /// Resolve the catalog directory: flag, then settings file, then default.
    pub(crate) fn resolve_catalog_dir(&self, flag: Option<PathBuf>) -> (PathBuf, Source) {
        match (flag, &self.catalog_dir) {
            (Some(dir), _) => (dir, Source::Flag),
            (None, Some(dir)) => (dir.clone(), Source::SettingsFile),
            (None, None) => (PathBuf::from(DEFAULT_CATALOG_DIR), Source::Default),
        }
    }

    /// Resolve the exhibition name: flag, then settings file, then default.
    pub(crate) fn resolve_exhibition(&self, flag: Option<String>) -> (String, Source) {
        match (flag, &self.exhibition) {
            (Some(name), _) => (name, Source::Flag),
            (None, Some(name)) => (name.clone(), Source::SettingsFile),
            (None, None) => (DEFAULT_EXHIBITION.to_string(), Source::Default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(
            settings.resolve_catalog_dir(None),
            (PathBuf::from("catalog"), Source::Default)
        );
        assert_eq!(
            settings.resolve_exhibition(None),
            ("ishtar-2019".to_string(), Source::Default)
        );
    }

    #[test]
    fn flag_beats_settings_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[catalog]\ndir = \"/srv/catalog\"\nexhibition = \"lyre-2021\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(
            settings.resolve_catalog_dir(None),
            (PathBuf::from("/srv/catalog"), Source::SettingsFile)
        );
        assert_eq!(
            settings.resolve_exhibition(Some("ishtar-2019".into())),
            ("ishtar-2019".to_string(), Source::Flag)
        );
    }

    #[test]
    fn malformed_settings_are_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[catalog]\ndir = 3\n").unwrap();
        assert!(matches!(Settings::load(&path), Err(CliError::Config(_))));

        std::fs::write(&path, "[catalog\n").unwrap();
        assert!(matches!(Settings::load(&path), Err(CliError::Config(_))));
    }
}
