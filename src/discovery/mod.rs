//! Endpoint discovery: scan the manifest tree, validate each manifest
//! against the handler registry, and produce the modules to register plus
//! the metadata catalog.
//!
//! Discovery runs exactly once, on the startup path, before the server
//! starts accepting connections; everything it produces is immutable for the
//! process lifetime.

pub mod catalog;
pub mod manifest;
pub mod scanner;

pub use catalog::{Catalog, CategoryBucket, EndpointSummary};
pub use manifest::{EndpointMeta, HandlerModule};

use crate::registry::HandlerRegistry;
use std::path::Path;

/// Routes owned by the gateway shell; a manifest may not shadow them
const RESERVED_ROUTES: &[&str] = &["/endpoints", "/set", "/health"];

/// Outcome of a discovery pass
pub struct DiscoveryReport {
    pub modules: Vec<HandlerModule>,
    /// Manifests seen but not registered (invalid, reserved, or displaced
    /// by a route collision)
    pub skipped: usize,
}

/// Scan `root` and resolve every manifest into a registrable module.
///
/// Never fails: every per-file problem is logged and skipped, and a missing
/// root yields an empty report. The server starts regardless.
pub fn discover(root: &Path, registry: &HandlerRegistry) -> DiscoveryReport {
    let found = scanner::scan(root);
    let total = found.len();

    let mut modules: Vec<HandlerModule> = Vec::new();
    for candidate in &found {
        let Some(module) = manifest::load(candidate, registry) else {
            continue;
        };

        if RESERVED_ROUTES.contains(&module.route.as_str()) {
            tracing::warn!(route = %module.route, "manifest shadows a reserved gateway route, skipping");
            continue;
        }
        // The router treats route syntax characters as capture definitions
        // and rejects duplicates outright, so both are resolved here where
        // they can be logged instead of aborting startup.
        if module.route.contains(['{', '}', ':', '*']) {
            tracing::warn!(route = %module.route, "route contains router syntax characters, skipping");
            continue;
        }
        if let Some(previous) = modules.iter().position(|m| m.route == module.route) {
            tracing::warn!(route = %module.route, "duplicate route, last discovered wins");
            modules.remove(previous);
        }

        modules.push(module);
    }

    let skipped = total - modules.len();
    tracing::info!(loaded = modules.len(), skipped, "endpoint discovery complete");

    DiscoveryReport { modules, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;
    use std::fs;

    #[test]
    fn test_reserved_route_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("endpoints.toml"), "handler = \"hello\"").unwrap();
        fs::write(dir.path().join("fine.toml"), "handler = \"hello\"").unwrap();

        let report = discover(dir.path(), &registry::builtin());
        assert_eq!(report.modules.len(), 1);
        assert_eq!(report.modules[0].route, "/fine");
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_router_syntax_route_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("{weird}.toml"), "handler = \"hello\"").unwrap();

        let report = discover(dir.path(), &registry::builtin());
        assert!(report.modules.is_empty());
        assert_eq!(report.skipped, 1);
    }
}
