//! Integration tests for endpoint discovery: the file-position → route
//! mapping, per-manifest failure isolation, and catalog aggregation.

use restdock::discovery::{self, Catalog, catalog::display_path};
use restdock::registry;
use std::fs;
use std::path::Path;

fn write_manifest(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[test]
fn route_round_trips_through_file_location() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "a/b/file.toml", "handler = \"hello\"");

    let report = discovery::discover(dir.path(), &registry::builtin());
    assert_eq!(report.modules.len(), 1);
    assert_eq!(report.modules[0].route, "/a/b/file");
}

#[test]
fn invalid_manifests_are_skipped_without_aborting_the_scan() {
    let dir = tempfile::tempdir().unwrap();
    // No handler key at all
    write_manifest(dir.path(), "broken/no-handler.toml", "[meta]\nname = \"x\"");
    // Unparseable
    write_manifest(dir.path(), "broken/garbage.toml", "not { toml");
    // Names a handler nobody registered
    write_manifest(dir.path(), "broken/unknown.toml", "handler = \"missing\"");
    // And one valid neighbour
    write_manifest(dir.path(), "works.toml", "handler = \"hello\"");

    let report = discovery::discover(dir.path(), &registry::builtin());
    assert_eq!(report.modules.len(), 1);
    assert_eq!(report.modules[0].route, "/works");
    assert_eq!(report.skipped, 3);
}

#[test]
fn catalog_counts_match_files_and_categories() {
    let dir = tempfile::tempdir().unwrap();
    for (rel, category) in [
        ("one.toml", "Alpha"),
        ("two.toml", "Beta"),
        ("nested/three.toml", "Alpha"),
        ("nested/four.toml", "Gamma"),
        ("five.toml", "Beta"),
    ] {
        write_manifest(
            dir.path(),
            rel,
            &format!("handler = \"hello\"\n[meta]\ncategory = \"{category}\""),
        );
    }

    let report = discovery::discover(dir.path(), &registry::builtin());
    let catalog = Catalog::build(&report.modules);
    assert_eq!(catalog.count, 5);
    assert_eq!(catalog.endpoints.len(), 3);
}

#[test]
fn hello_scenario_registers_route_and_call_template() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(
        dir.path(),
        "example/hello.toml",
        r#"
        handler = "hello"

        [meta]
        name = "Hello"
        category = "Example"
        params = ["name"]
        "#,
    );

    let report = discovery::discover(dir.path(), &registry::builtin());
    assert_eq!(report.modules[0].route, "/example/hello");

    let catalog = Catalog::build(&report.modules);
    let value = serde_json::to_value(&catalog).unwrap();
    assert_eq!(value["endpoints"][0]["name"], "Example");
    assert_eq!(
        value["endpoints"][0]["items"][0]["Hello"]["path"],
        "/example/hello?name="
    );
}

#[test]
fn missing_root_yields_empty_catalog() {
    let report = discovery::discover(
        Path::new("definitely/not/a/directory"),
        &registry::builtin(),
    );
    assert!(report.modules.is_empty());

    let catalog = Catalog::build(&report.modules);
    assert_eq!(catalog.count, 0);
    assert!(catalog.endpoints.is_empty());
}

#[test]
fn defaulted_categories_share_one_other_bucket() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "first.toml", "handler = \"hello\"");
    write_manifest(dir.path(), "second.toml", "handler = \"hello\"");

    let report = discovery::discover(dir.path(), &registry::builtin());
    let catalog = Catalog::build(&report.modules);
    assert_eq!(catalog.endpoints.len(), 1);
    assert_eq!(catalog.endpoints[0].name, "Other");
    assert_eq!(catalog.endpoints[0].items.len(), 2);
}

#[test]
fn category_names_are_never_folded() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(
        dir.path(),
        "a.toml",
        "handler = \"hello\"\n[meta]\ncategory = \"anime\"",
    );
    write_manifest(
        dir.path(),
        "b.toml",
        "handler = \"hello\"\n[meta]\ncategory = \"Anime\"",
    );

    let report = discovery::discover(dir.path(), &registry::builtin());
    let catalog = Catalog::build(&report.modules);
    assert_eq!(catalog.endpoints.len(), 2);
}

#[test]
fn display_path_is_pure_over_route_and_params() {
    assert_eq!(display_path("/x", &[]), "/x");
    assert_eq!(
        display_path("/x", &["a".to_string(), "b".to_string()]),
        "/x?a=&b="
    );
}
