//! Command-line integration tests for gnboot.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const TOOLCHAIN_VARS: &[&str] = &[
    "CC", "CXX", "LD", "AR", "CFLAGS", "CXXFLAGS", "LDFLAGS", "ARFLAGS",
];

fn gnboot() -> Command {
    let mut cmd = Command::cargo_bin("gnboot").unwrap();
    for var in TOOLCHAIN_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// A checkout with a couple of gn sources and the shipped templates.
fn create_checkout(dir: &Path) {
    let gn_dir = dir.join("tools/gn");
    fs::create_dir_all(&gn_dir).unwrap();
    for file in ["args.cc", "gn_main.cc", "value.cc"] {
        fs::write(gn_dir.join(file), "").unwrap();
    }

    let templates = Path::new(env!("CARGO_MANIFEST_DIR")).join("../gnboot-build/templates");
    let build_dir = dir.join("build");
    fs::create_dir_all(&build_dir).unwrap();
    for entry in fs::read_dir(templates).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), build_dir.join(entry.file_name())).unwrap();
    }
}

#[test]
fn test_help() {
    gnboot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--debug"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_unknown_argument_is_usage_error() {
    let temp = TempDir::new().unwrap();
    create_checkout(temp.path());

    gnboot()
        .current_dir(temp.path())
        .arg("--frobnicate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--frobnicate"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_generate_in_current_directory() {
    let temp = TempDir::new().unwrap();
    create_checkout(temp.path());

    gnboot().current_dir(temp.path()).assert().success();

    let manifest = fs::read_to_string(temp.path().join("out/build.ninja")).unwrap();
    assert!(manifest.contains("rule regen"));
    assert!(manifest.contains("build build.ninja: regen"));
    assert!(temp.path().join("out/build.ninja.d").exists());
    assert!(!temp.path().join("out/compile_commands.json").exists());
}

#[cfg(target_os = "linux")]
#[test]
fn test_debug_flag_and_env_overrides() {
    let temp = TempDir::new().unwrap();
    create_checkout(temp.path());

    gnboot()
        .args(["--root", temp.path().to_str().unwrap(), "-d"])
        .env("CC", "clang")
        .env("CFLAGS", "-Wall")
        .assert()
        .success();

    let manifest = fs::read_to_string(temp.path().join("out/build.ninja")).unwrap();
    assert!(manifest.starts_with("cc = clang\ncxx = c++\n"));
    assert!(manifest.contains(" -O0 -g "));
    assert!(manifest.contains("build gn: link tools/gn/gn_main.o || "));
    assert!(manifest.lines().any(|l| l.starts_with("  command = ") && l.ends_with(" --debug")));
    let cflags = manifest
        .lines()
        .find_map(|l| l.strip_prefix("  cflags = "))
        .unwrap();
    assert!(cflags.ends_with(" -Wall"));
}

#[test]
fn test_custom_paths_and_compile_commands() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("src");
    create_checkout(&root);
    fs::rename(root.join("build"), temp.path().join("templates")).unwrap();

    gnboot()
        .current_dir(temp.path())
        .args([
            "--root",
            "src",
            "--out-path",
            "ninja-out",
            "--template-dir",
            "templates",
            "--compile-commands",
        ])
        .assert()
        .success();

    let out = temp.path().join("ninja-out");
    assert!(out.join("build.ninja").exists());
    let json = fs::read_to_string(out.join("compile_commands.json")).unwrap();
    assert!(json.contains("args.cc"));
    assert!(!root.join("out").exists());
}

#[test]
fn test_missing_template_fails() {
    let temp = TempDir::new().unwrap();
    create_checkout(temp.path());
    fs::remove_dir_all(temp.path().join("build")).unwrap();

    gnboot()
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ninja template not found"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_verbose_logs_to_stderr() {
    let temp = TempDir::new().unwrap();
    create_checkout(temp.path());

    gnboot()
        .current_dir(temp.path())
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("wrote manifest"));
}
