//! Recursive manifest scan.
//!
//! The position of a manifest in the scanned tree IS its public route:
//! `<root>/example/hello.toml` becomes `/example/hello`. Moving a file moves
//! the route.

use std::path::{Path, PathBuf};

/// Extension a file must carry to be considered an endpoint manifest
pub const MANIFEST_EXT: &str = "toml";

/// A manifest file found during the scan, with its derived route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredManifest {
    pub path: PathBuf,
    pub route: String,
}

/// Walk `root` depth-first and collect every manifest with its route.
///
/// A missing root is not fatal: the gateway starts with zero endpoints.
/// Unreadable directories prune their own branch only.
pub fn scan(root: &Path) -> Vec<DiscoveredManifest> {
    let mut found = Vec::new();
    if !root.is_dir() {
        tracing::warn!(root = %root.display(), "endpoint directory not found, starting with no endpoints");
        return found;
    }
    tracing::info!(root = %root.display(), "scanning for endpoint manifests");
    scan_dir(root, "", &mut found);
    found
}

fn scan_dir(dir: &Path, prefix: &str, found: &mut Vec<DiscoveredManifest>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(dir = %dir.display(), error = %err, "cannot read directory, skipping");
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(dir = %dir.display(), error = %err, "cannot read directory entry, skipping");
                continue;
            }
        };
        let path = entry.path();

        if path.is_dir() {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!(path = %path.display(), "non-UTF-8 directory name, skipping");
                continue;
            };
            scan_dir(&path, &format!("{prefix}/{name}"), found);
        } else if path.extension().and_then(|e| e.to_str()) == Some(MANIFEST_EXT) {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!(path = %path.display(), "non-UTF-8 file name, skipping");
                continue;
            };
            found.push(DiscoveredManifest {
                route: format!("{prefix}/{stem}"),
                path,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_root_yields_empty() {
        let found = scan(Path::new("no-such-directory"));
        assert!(found.is_empty());
    }

    #[test]
    fn test_route_derivation() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/b/file.toml"), "handler = \"hello\"").unwrap();
        fs::write(dir.path().join("top.toml"), "handler = \"hello\"").unwrap();

        let mut routes: Vec<String> = scan(dir.path()).into_iter().map(|m| m.route).collect();
        routes.sort();
        assert_eq!(routes, vec!["/a/b/file", "/top"]);
    }

    #[test]
    fn test_non_manifest_files_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), "nope").unwrap();
        fs::write(dir.path().join("real.toml"), "handler = \"hello\"").unwrap();

        let found = scan(dir.path());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].route, "/real");
    }
}
