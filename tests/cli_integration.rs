use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tree_explorer() -> Command {
    let mut cmd = Command::cargo_bin("tree-explorer").unwrap();
    // Keep the user's own config file out of the way.
    cmd.env("XDG_CONFIG_HOME", env!("CARGO_TARGET_TMPDIR"));
    cmd
}

/// site/{pages/index.html, __components/nav.html, data.json, .secret}
fn create_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("site");
    fs::create_dir_all(root.join("pages")).unwrap();
    fs::create_dir_all(root.join("__components")).unwrap();
    fs::write(root.join("pages/index.html"), "<html></html>").unwrap();
    fs::write(root.join("__components/nav.html"), "<nav></nav>").unwrap();
    fs::write(root.join("data.json"), "{}").unwrap();
    fs::write(root.join(".secret"), "").unwrap();
    dir
}

#[test]
fn shows_help() {
    tree_explorer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("collapsible tree"));
}

#[test]
fn shows_version() {
    tree_explorer()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn requires_subcommand() {
    tree_explorer()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn classify_page_and_asset() {
    tree_explorer()
        .args(["classify", "index.html"])
        .assert()
        .success()
        .stdout("pages\n");

    tree_explorer()
        .args(["classify", "data.json"])
        .assert()
        .success()
        .stdout("assets\n");
}

#[test]
fn classify_component_by_path() {
    tree_explorer()
        .args(["classify", "nav.html", "--path", "/__components/nav.html"])
        .assert()
        .success()
        .stdout("component\n");
}

#[test]
fn classify_double_extension_is_not_html() {
    tree_explorer()
        .args(["classify", "archive.tar.gz"])
        .assert()
        .success()
        .stdout("assets\n");

    tree_explorer()
        .args(["classify", "page.html.dl"])
        .assert()
        .success()
        .stdout("pages\n");
}

#[test]
fn classify_project_and_folder() {
    tree_explorer()
        .args(["classify", "site", "--folder", "--project", "site"])
        .assert()
        .success()
        .stdout("project\n");

    tree_explorer()
        .args(["classify", "docs", "--folder"])
        .assert()
        .success()
        .stdout("folder\n");
}

#[test]
fn classify_verbose_shows_menu() {
    tree_explorer()
        .args(["-v", "classify", "index.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pages\tpages-menu"));
}

#[test]
fn print_scanned_project() {
    let dir = create_project();

    tree_explorer()
        .arg("print")
        .arg(dir.path().join("site"))
        .assert()
        .success()
        .stdout("▼ site\n  ► __components\n  ► pages\n    data.json\n");
}

#[test]
fn print_expanded_with_categories() {
    let dir = create_project();

    tree_explorer()
        .args(["print", "--expand-all", "--categories"])
        .arg(dir.path().join("site"))
        .assert()
        .success()
        .stdout(predicate::str::contains("      nav.html  [component]"))
        .stdout(predicate::str::contains("      index.html  [pages]"))
        .stdout(predicate::str::contains("▼ site  [project]"))
        .stdout(predicate::str::contains(".secret").not());
}

#[test]
fn print_tree_file_as_json() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("tree.json");
    fs::write(
        &file,
        r#"{"name": "site", "Path": "/", "children": {"name": "a.txt", "Path": "/a.txt"}}"#,
    )
    .unwrap();

    tree_explorer()
        .args(["print", "--json", "--tree"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Path\": \"/a.txt\""));
}

#[test]
fn print_loading_tree_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("tree.json");
    fs::write(
        &file,
        r#"{"name": "site", "Path": "/", "toggled": true, "loading": true, "children": []}"#,
    )
    .unwrap();

    tree_explorer()
        .args(["print", "--tree"])
        .arg(&file)
        .assert()
        .success()
        .stdout("▼ site\n  loading...\n");
}

#[test]
fn print_missing_directory_fails() {
    tree_explorer()
        .args(["print", "/definitely/not/here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn print_invalid_tree_file_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("tree.json");
    fs::write(&file, "{ not json").unwrap();

    tree_explorer()
        .args(["print", "--tree"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid tree file"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[style]\nindent = 99\n").unwrap();

    tree_explorer()
        .arg("--config")
        .arg(&config)
        .args(["classify", "index.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("indent"));
}

#[test]
fn generates_completions() {
    tree_explorer()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tree-explorer"));
}
