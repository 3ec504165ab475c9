//! Smoke tests for the uiglue binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn uiglue(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("uiglue").unwrap();
    cmd.env("HOME", home.path()).env_remove("UIGLUE_CONFIG");
    cmd
}

// === Help ===

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    uiglue(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_search_help() {
    let home = TempDir::new().unwrap();
    uiglue(&home)
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--delay-ms"))
        .stdout(predicate::str::contains("--failure-rate"));
}

// === Search ===

#[test]
fn test_search_resolves_on_eof() {
    let home = TempDir::new().unwrap();
    uiglue(&home)
        .args(["search", "--delay-ms", "10"])
        .write_stdin("ap\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 issued \"ap\""))
        .stdout(predicate::str::contains("resolved with"))
        .stdout(predicate::str::contains("Apple"));
}

#[test]
fn test_search_json_events() {
    let home = TempDir::new().unwrap();
    uiglue(&home)
        .args(["search", "--delay-ms", "10", "--json"])
        .write_stdin("pe\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""event":"armed""#))
        .stdout(predicate::str::contains(r#""event":"resolved""#))
        .stdout(predicate::str::contains(r#"{"id":"pear","label":"Pear"}"#));
}

#[test]
fn test_search_short_query_never_issues() {
    let home = TempDir::new().unwrap();
    uiglue(&home)
        .args(["search", "--delay-ms", "10"])
        .write_stdin("a\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("cleared"))
        .stdout(predicate::str::contains("issued").not());
}

#[test]
fn test_search_select_after_wait() {
    let home = TempDir::new().unwrap();
    uiglue(&home)
        .args(["search", "--delay-ms", "10"])
        .write_stdin("apple\n:wait 200\n:select apple\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("selected Apple (apple)"));
}

#[test]
fn test_search_failure_reported() {
    let home = TempDir::new().unwrap();
    uiglue(&home)
        .args(["search", "--delay-ms", "10", "--failure-rate", "1"])
        .write_stdin("ap\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 failed: Network error"));
}

#[test]
fn test_search_missing_catalog_fails() {
    let home = TempDir::new().unwrap();
    uiglue(&home)
        .args(["search", "--catalog", "/nonexistent/catalog.json"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load catalog"));
}

// === Config ===

#[test]
fn test_config_init_show_path() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("uiglue.toml");
    let path_arg = path.to_str().unwrap();

    uiglue(&home)
        .args(["config", "--config", path_arg, "init"])
        .assert()
        .success();
    assert!(path.exists());

    uiglue(&home)
        .args(["config", "--config", path_arg, "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("delay_ms = 300"))
        .stdout(predicate::str::contains("max_toasts = 3"));

    uiglue(&home)
        .args(["config", "--config", path_arg, "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    uiglue(&home)
        .args(["config", "--config", path_arg, "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uiglue.toml"));
}

#[test]
fn test_config_path_defaults_to_home() {
    let home = TempDir::new().unwrap();
    uiglue(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".uiglue/config.toml"));
}

#[test]
fn test_search_with_demo_catalog_file() {
    let home = TempDir::new().unwrap();
    let catalog = concat!(env!("CARGO_MANIFEST_DIR"), "/../demos/catalog.json");
    uiglue(&home)
        .args(["search", "--delay-ms", "10", "--catalog", catalog])
        .write_stdin("veg\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vega"));
}
