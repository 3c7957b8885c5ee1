//! Integration tests for the rescomp binary.
//!
//! Runs the compiled binary against manifests in temporary directories and
//! checks exit codes, stdout and the files it writes.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn rescomp(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rescomp"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Writes `hello.txt` and a manifest embedding it.
fn hello_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("hello.txt"), "hi").unwrap();
    fs::write(
        temp_dir.path().join("res.json"),
        r#"{"entries":[{"type":"file","path":"hello.txt","source":"hello.txt"}]}"#,
    )
    .unwrap();
    temp_dir
}

/// Tests that generation writes both files and reports them.
#[test]
fn test_generate_hello() {
    let project = hello_project();
    let output = rescomp(
        project.path(),
        &["-n", "res", "-c", "res.json", "-o", "res.c", "-H", "res.h"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Generated res.c and res.h\n");

    let header = fs::read_to_string(project.path().join("res.h")).unwrap();
    assert!(header.contains("extern const rescomp_file_t * const res_file_hello_txt;"));
    let source = fs::read_to_string(project.path().join("res.c")).unwrap();
    assert!(source.contains("0x68, 0x69"));
}

/// Tests that `-M` writes a Makefile rule next to the outputs.
#[test]
fn test_generate_with_depfile() {
    let project = hello_project();
    let output = rescomp(
        project.path(),
        &[
            "--name", "res", "--config", "res.json", "--output", "res.c", "--header", "res.h",
            "--depfile", "res.d",
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let rule = fs::read_to_string(project.path().join("res.d")).unwrap();
    assert!(rule.starts_with("res.c res.h: "));
    assert!(rule.trim_end().ends_with("hello.txt"));
}

/// Tests that deps mode prints one source per line and writes nothing.
#[test]
fn test_deps_mode() {
    let project = hello_project();
    fs::write(project.path().join("b.txt"), "b").unwrap();
    fs::write(
        project.path().join("res.json"),
        r#"{"entries":[
            {"type":"file","path":"hello.txt","source":"hello.txt"},
            {"type":"file","path":"sub/b.txt","source":"b.txt"},
            {"type":"file","path":"missing.txt","source":"missing.txt"}
        ]}"#,
    )
    .unwrap();

    let output = rescomp(project.path(), &["-d", "-c", "res.json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("hello.txt"));
    assert!(lines[1].ends_with("b.txt"));
    assert!(lines[2].ends_with("missing.txt"));
    assert!(!project.path().join("res.c").exists());
}

/// Tests that missing flags fail with exit code 1 and a usage hint.
#[test]
fn test_missing_flags() {
    let project = hello_project();
    let output = rescomp(project.path(), &["-c", "res.json"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("-n/--name is required"));
    assert!(stderr.contains("Usage: rescomp"));
}

/// Tests that unknown flags fail with exit code 1.
#[test]
fn test_unknown_flag() {
    let project = hello_project();
    let output = rescomp(project.path(), &["--bogus"]);
    assert_eq!(output.status.code(), Some(1));
}

/// Tests that help and version succeed.
#[test]
fn test_help_and_version() {
    let project = hello_project();

    let output = rescomp(project.path(), &["-h"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("--depfile"));

    let output = rescomp(project.path(), &["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

/// Tests that a missing config fails with exit code 1.
#[test]
fn test_missing_config() {
    let project = hello_project();
    let output = rescomp(
        project.path(),
        &["-n", "res", "-c", "nope.json", "-o", "res.c", "-H", "res.h"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to load config 'nope.json'"));
    assert!(!project.path().join("res.h").exists());
}

/// Tests that a duplicate explicit entry aborts generation.
#[test]
fn test_duplicate_entry_fails() {
    let project = hello_project();
    fs::write(
        project.path().join("res.json"),
        r#"{"entries":[
            {"type":"file","path":"hello.txt","source":"hello.txt"},
            {"type":"file","path":"hello.txt","source":"hello.txt"}
        ]}"#,
    )
    .unwrap();

    let output = rescomp(
        project.path(),
        &["-n", "res", "-c", "res.json", "-o", "res.c", "-H", "res.h"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Duplicate entry"));
}

/// Tests that an invalid symbol base name is rejected.
#[test]
fn test_invalid_name() {
    let project = hello_project();
    let output = rescomp(
        project.path(),
        &["-n", "my-res", "-c", "res.json", "-o", "res.c", "-H", "res.h"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("not a valid C identifier"));
}

/// Tests that an unwritable depfile fails after the outputs are written.
#[test]
fn test_unwritable_depfile() {
    let project = hello_project();
    let output = rescomp(
        project.path(),
        &[
            "-n", "res", "-c", "res.json", "-o", "res.c", "-H", "res.h", "-M", "no/such/res.d",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("cannot open depfile"));
    assert!(project.path().join("res.c").exists());
}
