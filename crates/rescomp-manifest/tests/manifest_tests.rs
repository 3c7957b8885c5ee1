//! Integration tests for manifest loading from disk.
//!
//! Each test lays out a manifest and its sources in a temporary directory
//! and checks the resulting tree, loaded data and dependency output.

use rescomp_manifest::Manifest;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_manifest(dir: &Path, value: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.join("manifest.json");
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

/// A single file entry loads its bytes and detects the MIME type
#[test]
fn test_hello_scenario() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("hello.txt"), "hi").unwrap();
    let manifest_path = write_manifest(
        temp_dir.path(),
        &json!({ "entries": [{ "type": "file", "path": "hello.txt", "source": "hello.txt" }] }),
    );

    let manifest = Manifest::load(&manifest_path, "demo").unwrap();
    let vfs = manifest.vfs();
    let file = vfs.file(vfs.find_file("hello.txt").unwrap());

    assert_eq!(file.size(), 2);
    assert_eq!(file.data(), Some(&b"hi"[..]));
    assert_eq!(file.mime(), "text/plain");
    assert_eq!(manifest.base_dir(), temp_dir.path());
}

/// Two explicit entries for the same virtual path abort the load
#[test]
fn test_explicit_duplicate_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
    let manifest_path = write_manifest(
        temp_dir.path(),
        &json!({ "entries": [
            { "type": "file", "path": "x/a.txt", "source": "a.txt" },
            { "type": "folder", "path": "x", "entries": [
                { "type": "file", "path": "a.txt", "source": "a.txt" }
            ]}
        ]}),
    );

    let err = Manifest::load(&manifest_path, "demo").unwrap_err();
    assert!(err.is_duplicate());
    assert!(err.to_string().contains("x/a.txt"));
}

/// Globs that re-match an existing file are tolerated
#[test]
fn test_glob_duplicate_is_tolerated() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("img")).unwrap();
    fs::write(temp_dir.path().join("img/a.png"), [1, 2, 3]).unwrap();
    fs::write(temp_dir.path().join("img/b.png"), [4]).unwrap();
    let manifest_path = write_manifest(
        temp_dir.path(),
        &json!({ "entries": [
            { "type": "file", "path": "icons/a.png", "source": "img/a.png", "metadata": { "origin": "explicit" } },
            { "type": "glob", "pattern": "img/*.png", "target": "icons", "metadata": { "origin": "glob" } },
            { "type": "glob", "pattern": "img/*.png", "target": "icons" }
        ]}),
    );

    let manifest = Manifest::load(&manifest_path, "demo").unwrap();
    let vfs = manifest.vfs();
    let icons = vfs.find_folder("icons").unwrap();
    assert_eq!(vfs.folder(icons).file_count(), 2);

    let a = vfs.file(vfs.find_file("icons/a.png").unwrap());
    assert_eq!(a.metadata().get("origin"), Some("explicit"));
    let b = vfs.file(vfs.find_file("icons/b.png").unwrap());
    assert_eq!(b.metadata().get("origin"), Some("glob"));
    assert_eq!(b.size(), 1);
}

/// `**/*.json` picks up nested JSON files and nothing else
#[test]
fn test_recursive_glob() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("api")).unwrap();
    fs::write(temp_dir.path().join("api/config.json"), "{}").unwrap();
    fs::write(temp_dir.path().join("readme.md"), "# readme").unwrap();
    let manifest_path = write_manifest(
        temp_dir.path(),
        &json!({ "entries": [
            { "type": "folder", "path": "conf", "entries": [
                { "type": "glob", "pattern": "**/*.json", "target": "" }
            ]}
        ]}),
    );

    let manifest = Manifest::load(&manifest_path, "demo").unwrap();
    let vfs = manifest.vfs();

    // The manifest itself lives in the base directory and matches too.
    let conf = vfs.find_folder("conf").unwrap();
    let names: Vec<_> = vfs
        .folder(conf)
        .files()
        .iter()
        .map(|&id| vfs.file(id).name())
        .collect();
    assert_eq!(names, ["config.json", "manifest.json"]);
    assert!(vfs.find_file("conf/readme.md").is_none());
    assert_eq!(
        vfs.file(vfs.find_file("conf/config.json").unwrap()).mime(),
        "application/json"
    );
}

/// Dependency mode resolves sources without reading them
#[test]
fn test_load_deps_skips_missing_sources() {
    let temp_dir = TempDir::new().unwrap();
    let manifest_path = write_manifest(
        temp_dir.path(),
        &json!({ "entries": [
            { "type": "file", "path": "a.txt", "source": "./missing/a.txt" },
            { "type": "folder", "path": "sub", "entries": [
                { "type": "file", "path": "b.txt", "source": "b.txt" }
            ]}
        ]}),
    );

    let manifest = Manifest::load_deps(&manifest_path).unwrap();
    let a = temp_dir.path().join("missing/a.txt");
    let b = temp_dir.path().join("b.txt");

    assert_eq!(manifest.dependencies(), vec![a.as_path(), b.as_path()]);
    assert_eq!(
        manifest.dependency_list(),
        format!("{}\n{}\n", a.display(), b.display())
    );
    assert_eq!(
        manifest.depfile_rule(Path::new("res.c"), Path::new("res.h")),
        format!("res.c res.h: {} {}\n", a.display(), b.display())
    );

    let err = Manifest::load(&manifest_path, "demo").unwrap_err();
    assert!(err.is_io_error());
}

/// Unknown entry types are rejected
#[test]
fn test_unknown_type_is_invalid_argument() {
    let temp_dir = TempDir::new().unwrap();
    let manifest_path = write_manifest(
        temp_dir.path(),
        &json!({ "entries": [{ "type": "symlink", "path": "a" }] }),
    );

    let err = Manifest::load(&manifest_path, "demo").unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("symlink"));
}

/// Glob entries need both a pattern and a target
#[test]
fn test_missing_field_is_invalid_argument() {
    let temp_dir = TempDir::new().unwrap();
    let manifest_path = write_manifest(
        temp_dir.path(),
        &json!({ "entries": [{ "type": "glob", "pattern": "*.txt" }] }),
    );

    let err = Manifest::load(&manifest_path, "demo").unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("target"));
}

/// Malformed JSON is a parse error
#[test]
fn test_malformed_json_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let manifest_path = temp_dir.path().join("manifest.json");
    fs::write(&manifest_path, "{ \"entries\": [ }").unwrap();

    let err = Manifest::load(&manifest_path, "demo").unwrap_err();
    assert!(err.is_parse_error());
}

/// A missing manifest file is an I/O error naming the path
#[test]
fn test_missing_manifest_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Manifest::load(temp_dir.path().join("nope.json"), "demo").unwrap_err();
    assert!(err.is_io_error());
    assert!(err.to_string().contains("nope.json"));
}

/// Folders named by several entries are merged, not duplicated
#[test]
fn test_repeated_folders_merge() {
    let temp_dir = TempDir::new().unwrap();
    let manifest_path = write_manifest(
        temp_dir.path(),
        &json!({ "entries": [
            { "type": "folder", "path": "a/b", "metadata": { "first": "1" } },
            { "type": "folder", "path": "a", "entries": [
                { "type": "folder", "path": "b", "metadata": { "second": "2" } }
            ]},
            { "type": "file", "path": "a/b/c.txt", "source": "c.txt" }
        ]}),
    );

    let manifest = Manifest::load_deps(&manifest_path).unwrap();
    let vfs = manifest.vfs();
    assert_eq!(vfs.folder_len(), 3);

    let b = vfs.folder(vfs.find_folder("a/b").unwrap());
    let keys: Vec<_> = b.metadata().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, ["first", "second"]);
    assert_eq!(b.file_count(), 1);

    for id in vfs.files_preorder() {
        let file = vfs.file(id);
        let parent = vfs.folder(file.parent());
        assert_eq!(file.path(), format!("{}/{}", parent.path(), file.name()));
    }
}
