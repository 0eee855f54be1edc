//! Branding and display settings served via `GET /set`.
//!
//! These are consumed by the playground frontend only; the gateway itself
//! reads nothing from them beyond the `author` field used in the response
//! envelope. A missing or unparseable settings file falls back to defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Branding configuration for the documentation frontend
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Display name shown in the playground header
    #[serde(default = "default_name")]
    pub name: String,

    /// Tagline shown under the name
    #[serde(default = "default_description")]
    pub description: String,

    /// Logo path, relative to the frontend root
    #[serde(default = "default_icon")]
    pub icon: String,

    /// Author handle, lowercased into the `creator` envelope field
    #[serde(default = "default_author")]
    pub author: String,

    /// Notification entries rendered in the frontend dropdown
    #[serde(default)]
    pub notification: Vec<Notification>,
}

/// One entry of the frontend notification dropdown
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: default_description(),
            icon: default_icon(),
            author: default_author(),
            notification: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file, falling back to defaults.
    ///
    /// Never fails: a broken branding file should not keep the gateway from
    /// starting.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(settings) => settings,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "invalid settings file, using defaults");
                    Self::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read settings file, using defaults");
                Self::default()
            }
        }
    }
}

fn default_name() -> String {
    "Restdock API".to_string()
}

fn default_description() -> String {
    "Self-documenting REST API gateway".to_string()
}

fn default_icon() -> String {
    "/icon.svg".to_string()
}

fn default_author() -> String {
    "restdock".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.name, "Restdock API");
        assert_eq!(settings.author, "restdock");
        assert!(settings.notification.is_empty());
    }

    #[test]
    fn test_parse_partial() {
        let settings: Settings = toml::from_str(
            r#"
            name = "My API"

            [[notification]]
            title = "New endpoint"
            message = "Lyrics lookup is live"
            "#,
        )
        .unwrap();
        assert_eq!(settings.name, "My API");
        // Unspecified fields keep their defaults
        assert_eq!(settings.author, "restdock");
        assert_eq!(settings.notification.len(), 1);
        assert_eq!(settings.notification[0].title, "New endpoint");
    }

    #[test]
    fn test_load_missing_file() {
        let settings = Settings::load(Path::new("does-not-exist.toml"));
        assert_eq!(settings.name, "Restdock API");
    }
}
