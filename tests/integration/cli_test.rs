//! Integration tests for the imgnav binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::png_folder;

fn imgnav(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("imgnav").unwrap();
    cmd.arg("--config")
        .arg(config_dir.path().join("config.toml"))
        .env_remove("IMGNAV_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn groups_prints_tree() {
    let config = TempDir::new().unwrap();
    let pics = png_folder(&["cat_2_b.png", "cat_10_a.png", "dog_x.png"]);

    imgnav(&config)
        .arg("groups")
        .arg(pics.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("cat (2)\n  2\n    cat_2_b.png\n  10\n"))
        .stdout(predicate::str::contains("3 files in 2 groups (sorted by name)"));
}

#[test]
fn groups_json_is_parseable() {
    let config = TempDir::new().unwrap();
    let pics = png_folder(&["cat_1_a.png", "cat_1_b.png"]);

    let output = imgnav(&config)
        .args(["groups", "--json"])
        .arg(pics.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["files"], 2);
    assert_eq!(value["groups"][0]["key"], "cat");
    assert_eq!(value["groups"][0]["sets"][0]["files"][1], "cat_1_b.png");
}

#[test]
fn groups_on_missing_folder_fails() {
    let config = TempDir::new().unwrap();
    imgnav(&config)
        .args(["groups", "/definitely/not/a/folder"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn config_path_echoes_override() {
    let config = TempDir::new().unwrap();
    imgnav(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_show_prints_defaults() {
    let config = TempDir::new().unwrap();
    imgnav(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[preload]"))
        .stdout(predicate::str::contains("forward = 7"));
}

#[test]
fn browse_without_folder_explains_itself() {
    let config = TempDir::new().unwrap();
    imgnav(&config)
        .arg("browse")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No folder given"));
}

#[test]
fn completions_generate_for_bash() {
    let config = TempDir::new().unwrap();
    imgnav(&config)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("imgnav"));
}

#[test]
fn help_lists_subcommands() {
    let config = TempDir::new().unwrap();
    imgnav(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("groups"))
        .stdout(predicate::str::contains("completions"));
}
