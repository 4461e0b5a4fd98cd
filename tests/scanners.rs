use std::fs;
use std::path::Path;
use std::sync::Arc;

use nexus_di::{
    managed_type, ArchiveScanner, Container, DiError, DirectoryScanner, DiscoveryError,
    ManagedType, ScanError, TypeCatalog, TypeScanner,
};
use tempfile::TempDir;

#[derive(Default)]
struct Greeter;

managed_type!(Greeter => ManagedType::builder::<Greeter>()
    .component()
    .constructor(Greeter::default)
    .build());

#[derive(Default)]
struct Helper;

managed_type!(Helper => ManagedType::builder::<Helper>()
    .component()
    .constructor(Helper::default)
    .build());

fn catalog() -> Arc<TypeCatalog> {
    let mut catalog = TypeCatalog::new();
    catalog
        .add::<Greeter>("app.impl")
        .add::<Helper>("app.support");
    Arc::new(catalog)
}

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

fn unit_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "app/impl/Greeter.unit");
    touch(dir.path(), "app/impl/README.md");
    touch(dir.path(), "app/support/Helper.unit");
    dir
}

fn simple_names(types: &[Arc<ManagedType>]) -> Vec<&str> {
    types.iter().map(|t| t.simple_name()).collect()
}

#[test]
fn directory_scan_finds_units_under_namespace() {
    let dir = unit_tree();
    let scanner = DirectoryScanner::new(dir.path(), catalog());

    assert_eq!(simple_names(&scanner.scan("app.impl").unwrap()), vec!["Greeter"]);
    assert_eq!(
        simple_names(&scanner.scan("app").unwrap()),
        vec!["Greeter", "Helper"]
    );
}

#[test]
fn directory_scan_of_missing_namespace_is_empty() {
    let dir = unit_tree();
    let scanner = DirectoryScanner::new(dir.path(), catalog());
    assert!(scanner.scan("app.missing").unwrap().is_empty());
}

#[test]
fn directory_scan_rejects_unknown_units() {
    let dir = unit_tree();
    touch(dir.path(), "app/impl/Ghost.unit");
    let scanner = DirectoryScanner::new(dir.path(), catalog());

    match scanner.scan("app.impl") {
        Err(ScanError::UnknownUnit(name)) => assert_eq!(name, "app.impl.Ghost"),
        other => panic!("expected UnknownUnit, got {:?}", other.map(|t| t.len())),
    }
}

fn write_archive(path: &Path, entries: &[&str]) {
    let file = fs::File::create(path).unwrap();
    let mut builder = tar::Builder::new(file);
    for entry in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, entry, std::io::empty())
            .unwrap();
    }
    builder.finish().unwrap();
}

#[test]
fn archive_scan_matches_directory_scan() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("units.tar");
    write_archive(
        &archive,
        &[
            "app/impl/Greeter.unit",
            "app/impl/notes.txt",
            "app/support/Helper.unit",
            "application/Stray.unit",
        ],
    );
    let scanner = ArchiveScanner::new(&archive, catalog());

    assert_eq!(simple_names(&scanner.scan("app.impl").unwrap()), vec!["Greeter"]);
    // "application" is not under "app"
    assert_eq!(
        simple_names(&scanner.scan("app").unwrap()),
        vec!["Greeter", "Helper"]
    );
    assert!(scanner.scan("other").unwrap().is_empty());
}

/// Writes entries with their names stored verbatim, the way `tar -C dir .`
/// does (`./app/...`).
fn write_dot_archive(path: &Path, entries: &[&str]) {
    let file = fs::File::create(path).unwrap();
    let mut builder = tar::Builder::new(file);
    for entry in entries {
        let mut header = tar::Header::new_old();
        header.as_old_mut().name[..entry.len()].copy_from_slice(entry.as_bytes());
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(0);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append(&header, std::io::empty()).unwrap();
    }
    builder.finish().unwrap();
}

#[test]
fn archive_scan_accepts_dot_prefixed_entries() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("packaged.tar");
    write_dot_archive(
        &archive,
        &["./app/impl/Greeter.unit", "./app/support/Helper.unit"],
    );
    let scanner = ArchiveScanner::new(&archive, catalog());

    assert_eq!(simple_names(&scanner.scan("app.impl").unwrap()), vec!["Greeter"]);
    assert_eq!(
        simple_names(&scanner.scan("app").unwrap()),
        vec!["Greeter", "Helper"]
    );
}

#[test]
fn missing_archive_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("absent.tar");
    let scanner = ArchiveScanner::new(&archive, catalog());

    match scanner.scan("app") {
        Err(ScanError::Io { path, .. }) => assert_eq!(path, archive),
        other => panic!("expected Io error, got {:?}", other.map(|t| t.len())),
    }
}

#[derive(Default)]
struct AppConfig;

fn app_config() -> Arc<ManagedType> {
    ManagedType::builder::<AppConfig>()
        .configuration()
        .component_scan(["app"])
        .constructor(AppConfig::default)
        .build()
}

#[test]
fn container_discovers_components_on_disk() {
    let dir = unit_tree();
    let container = Container::builder(vec![app_config()])
        .scanner(Arc::new(DirectoryScanner::new(dir.path(), catalog())))
        .build()
        .unwrap();

    assert_eq!(container.bean_names(), vec!["appConfig", "greeter", "helper"]);
    assert!(container.get_as::<Greeter>("greeter").is_ok());
    container.destroy().unwrap();
}

#[test]
fn scan_failure_aborts_container_build() {
    let dir = unit_tree();
    touch(dir.path(), "app/impl/Ghost.unit");
    let result = Container::builder(vec![app_config()])
        .scanner(Arc::new(DirectoryScanner::new(dir.path(), catalog())))
        .build();

    match result {
        Err(DiError::DiscoveryFailure(DiscoveryError::Scan { namespace, source })) => {
            assert_eq!(namespace, "app");
            assert!(matches!(source, ScanError::UnknownUnit(_)));
        }
        other => panic!("expected DiscoveryFailure, got {:?}", other),
    }
}
