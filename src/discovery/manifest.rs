//! Manifest parsing and validation.
//!
//! A manifest is valid iff it parses as TOML and its `handler` key names a
//! registered handler. Any other outcome is logged with the offending path
//! and skipped; one broken manifest never prevents the remaining endpoints
//! or the server itself from starting.

use super::scanner::DiscoveredManifest;
use crate::registry::HandlerRegistry;
use serde::Deserialize;
use std::sync::Arc;

pub const DEFAULT_DESC: &str = "No description provided";
pub const DEFAULT_CATEGORY: &str = "Other";

/// On-disk manifest schema
#[derive(Debug, Deserialize)]
struct ManifestFile {
    /// Name of a handler registered in `registry::builtin`
    handler: String,
    #[serde(default)]
    meta: ManifestMeta,
}

#[derive(Debug, Default, Deserialize)]
struct ManifestMeta {
    name: Option<String>,
    desc: Option<String>,
    category: Option<String>,
    params: Option<Vec<String>>,
}

/// Endpoint metadata with every absent field resolved to its default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointMeta {
    pub name: String,
    pub desc: String,
    pub category: String,
    pub params: Vec<String>,
}

/// One discovered endpoint, ready for registration
pub struct HandlerModule {
    pub route: String,
    pub handler: Arc<dyn crate::registry::ApiHandler>,
    pub meta: EndpointMeta,
}

/// Load a discovered manifest, resolving its handler against the registry.
///
/// Returns `None` on any failure, after logging it; the caller continues
/// with the rest of the scan.
pub fn load(found: &DiscoveredManifest, registry: &HandlerRegistry) -> Option<HandlerModule> {
    let raw = match std::fs::read_to_string(&found.path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::error!(path = %found.path.display(), error = %err, "failed to read manifest");
            return None;
        }
    };

    let manifest: ManifestFile = match toml::from_str(&raw) {
        Ok(manifest) => manifest,
        Err(err) => {
            tracing::error!(path = %found.path.display(), error = %err, "failed to parse manifest");
            return None;
        }
    };

    let Some(handler) = registry.get(manifest.handler.as_str()) else {
        tracing::error!(
            path = %found.path.display(),
            handler = %manifest.handler,
            "manifest names an unregistered handler"
        );
        return None;
    };

    let stem = found
        .path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    Some(HandlerModule {
        route: found.route.clone(),
        handler: handler.clone(),
        meta: EndpointMeta {
            name: manifest.meta.name.unwrap_or(stem),
            desc: manifest
                .meta
                .desc
                .unwrap_or_else(|| DEFAULT_DESC.to_string()),
            category: manifest
                .meta
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            params: manifest.meta.params.unwrap_or_default(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;
    use std::path::PathBuf;

    fn manifest_on_disk(contents: &str) -> (tempfile::TempDir, DiscoveredManifest) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("greet.toml");
        std::fs::write(&path, contents).unwrap();
        (
            dir,
            DiscoveredManifest {
                path,
                route: "/greet".to_string(),
            },
        )
    }

    #[test]
    fn test_full_manifest() {
        let (_dir, found) = manifest_on_disk(
            r#"
            handler = "hello"

            [meta]
            name = "Hello"
            desc = "Returns a greeting message"
            category = "Example"
            params = ["name"]
            "#,
        );
        let module = load(&found, &registry::builtin()).unwrap();
        assert_eq!(module.route, "/greet");
        assert_eq!(module.meta.name, "Hello");
        assert_eq!(module.meta.category, "Example");
        assert_eq!(module.meta.params, vec!["name".to_string()]);
    }

    #[test]
    fn test_defaults_applied() {
        let (_dir, found) = manifest_on_disk("handler = \"hello\"");
        let module = load(&found, &registry::builtin()).unwrap();
        // Name falls back to the file stem
        assert_eq!(module.meta.name, "greet");
        assert_eq!(module.meta.desc, DEFAULT_DESC);
        assert_eq!(module.meta.category, DEFAULT_CATEGORY);
        assert!(module.meta.params.is_empty());
    }

    #[test]
    fn test_unknown_handler_skipped() {
        let (_dir, found) = manifest_on_disk("handler = \"does-not-exist\"");
        assert!(load(&found, &registry::builtin()).is_none());
    }

    #[test]
    fn test_parse_error_skipped() {
        let (_dir, found) = manifest_on_disk("not even { toml");
        assert!(load(&found, &registry::builtin()).is_none());
    }

    #[test]
    fn test_unreadable_file_skipped() {
        let found = DiscoveredManifest {
            path: PathBuf::from("no/such/file.toml"),
            route: "/file".to_string(),
        };
        assert!(load(&found, &registry::builtin()).is_none());
    }
}
