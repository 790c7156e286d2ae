//! Integration tests for `slb extract` and `slb get`.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn write_page(dir: &std::path::Path, rel: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(rel);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn extract_prints_concatenated_blocks() {
    let tmp = tempdir().unwrap();
    let page = write_page(
        tmp.path(),
        "CONFIG.md",
        "Intro\n\n```slate-lua\nfirst()\n```\n\nmiddle\n\n```slate-lua\nsecond()\n```\n",
    );

    Command::cargo_bin("slb")
        .unwrap()
        .args(["extract", page.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::diff("first()\nsecond()\n"));
}

#[test]
fn extract_with_custom_tag() {
    let tmp = tempdir().unwrap();
    let page = write_page(
        tmp.path(),
        "CONFIG.md",
        "```lua\nplain()\n```\n\n```slate-lua\nconfig()\n```\n",
    );

    Command::cargo_bin("slb")
        .unwrap()
        .args(["extract", page.to_str().unwrap(), "--tag", "lua"])
        .assert()
        .success()
        .stdout(predicate::str::diff("plain()\n"));
}

#[test]
fn extract_prints_nothing_without_matches() {
    let tmp = tempdir().unwrap();
    let page = write_page(tmp.path(), "CONFIG.md", "no fences\n");

    Command::cargo_bin("slb")
        .unwrap()
        .args(["extract", page.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn get_prints_value_at_path() {
    let tmp = tempdir().unwrap();
    let page = write_page(
        tmp.path(),
        "CONFIG.md",
        "```slate-lua\nconfig.set('editor.theme', 'dark')\n```\n",
    );

    Command::cargo_bin("slb")
        .unwrap()
        .args(["get", page.to_str().unwrap(), "editor.theme"])
        .assert()
        .success()
        .stdout(predicate::str::diff("\"dark\"\n"));
}

#[test]
fn get_falls_back_to_default() {
    let tmp = tempdir().unwrap();
    let page = write_page(tmp.path(), "CONFIG.md", "no script\n");

    Command::cargo_bin("slb")
        .unwrap()
        .args([
            "get",
            page.to_str().unwrap(),
            "editor.theme",
            "--default",
            "\"light\"",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("\"light\"\n"));
}

#[test]
fn get_default_defaults_to_null() {
    let tmp = tempdir().unwrap();
    let page = write_page(tmp.path(), "CONFIG.md", "no script\n");

    Command::cargo_bin("slb")
        .unwrap()
        .args(["get", page.to_str().unwrap(), "anything.at.all"])
        .assert()
        .success()
        .stdout(predicate::str::diff("null\n"));
}

#[test]
fn get_rejects_invalid_default_json() {
    let tmp = tempdir().unwrap();
    let page = write_page(tmp.path(), "CONFIG.md", "no script\n");

    Command::cargo_bin("slb")
        .unwrap()
        .args([
            "get",
            page.to_str().unwrap(),
            "x",
            "--default",
            "not json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}
