//! crashscanctl integration tests
//!
//! Write captures to a temp dir and drive the command layer directly.

use crashscanctl::cli::{Cli, Commands};
use crashscanctl::commands::{build_reporter, detect_files, run, scan_files};
use crashscanctl::errors::{EXIT_CRASH_FOUND, EXIT_SUCCESS};
use crashscan_common::{Category, TargetRegistry};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn default_config(dir: &TempDir) -> PathBuf {
    write(dir, "config.toml", "target = \"xv6\"\n")
}

fn cli(config: &Path, command: Commands) -> Cli {
    Cli {
        config: Some(config.to_path_buf()),
        target: None,
        verbose: false,
        command,
    }
}

#[tokio::test]
async fn test_scan_files_keeps_input_order() {
    let dir = TempDir::new().unwrap();
    let config = default_config(&dir);
    let files = vec![
        write(&dir, "clean.log", "init: starting sh\n$ "),
        write(&dir, "panic.log", "hart 1 starting\npanic: kfree\n"),
        write(&dir, "assert.log", "assertion failed: ip->ref > 0\n"),
    ];

    let registry = TargetRegistry::with_builtin().unwrap();
    let reporter = Arc::new(build_reporter(&registry, Some(&config), None).unwrap());
    let reports = scan_files(reporter, &files).await.unwrap();

    assert_eq!(reports.len(), 3);
    assert!(reports[0].file.ends_with("clean.log"));
    assert!(!reports[0].report.has_crash());
    assert_eq!(reports[1].report.category, Category::KernelPanic);
    assert_eq!(reports[2].report.category, Category::AssertionFailure);
}

#[tokio::test]
async fn test_scan_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let config = default_config(&dir);
    let registry = TargetRegistry::with_builtin().unwrap();
    let reporter = Arc::new(build_reporter(&registry, Some(&config), None).unwrap());

    let err = scan_files(reporter, &[dir.path().join("missing.log")])
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("missing.log"));
}

#[tokio::test]
async fn test_detect_files() {
    let dir = TempDir::new().unwrap();
    let config = default_config(&dir);
    let files = vec![
        write(&dir, "a.log", "fatal error: disk full\n"),
        write(&dir, "b.log", "warning: only suspicious\n"),
    ];
    let registry = TargetRegistry::with_builtin().unwrap();
    let reporter = Arc::new(build_reporter(&registry, Some(&config), None).unwrap());

    let results = detect_files(reporter, &files).await.unwrap();
    assert!(results[0].1, "signature should be detected");
    assert!(!results[1].1, "keywords alone are not a detected signature");
}

#[tokio::test]
async fn test_run_exit_codes() {
    let dir = TempDir::new().unwrap();
    let config = default_config(&dir);
    let clean = write(&dir, "clean.log", "hello world\n");
    let crash = write(&dir, "crash.log", "page fault: va=0x0\n");

    let code = run(cli(&config, Commands::Scan { files: vec![clean.clone()], json: true }))
        .await
        .unwrap();
    assert_eq!(code, EXIT_SUCCESS);

    let code = run(cli(&config, Commands::Scan { files: vec![clean, crash.clone()], json: true }))
        .await
        .unwrap();
    assert_eq!(code, EXIT_CRASH_FOUND);

    let code = run(cli(&config, Commands::Detect { files: vec![crash] }))
        .await
        .unwrap();
    assert_eq!(code, EXIT_CRASH_FOUND);
}

#[tokio::test]
async fn test_config_extra_signature_and_target_override() {
    let dir = TempDir::new().unwrap();
    let config = write(
        &dir,
        "config.toml",
        r#"
system_label = "xv6-riscv"

[[extra_signatures]]
pattern = "usertrap\\(\\): (.+)"
kind = "fault"
label = "user trap"
"#,
    );
    let log = write(&dir, "trap.log", "usertrap(): unexpected scause 0xf pid=4\n");

    let registry = TargetRegistry::with_builtin().unwrap();
    let reporter = Arc::new(build_reporter(&registry, Some(&config), Some("XV6")).unwrap());
    let reports = scan_files(reporter, &[log]).await.unwrap();
    assert_eq!(reports[0].report.title, "xv6-riscv user trap: unexpected scause 0xf pid=4");

    let err = build_reporter(&registry, Some(&config), Some("plan9")).unwrap_err();
    assert_eq!(crashscanctl::errors::exit_code_for(&err), 66);
}
