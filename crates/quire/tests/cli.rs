//! CLI integration tests for quire commands.
//!
//! These tests focus on exit codes, artifacts on disk and the key lines of output,
//! not on exact formatting which may change.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a quire command with logging and artifact overrides cleared.
fn quire() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quire").unwrap();
    cmd.env_remove("QUIRE_BASE_PATH").env_remove("RUST_LOG");
    cmd
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

/// Writes a file below `root`, creating parent directories.
fn write(root: &Path, rel_path: &str, content: &str) {
    let path = root.join(rel_path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Creates a site with a config file and two pages in `v1.0`.
fn site() -> tempfile::TempDir {
    let dir = temp_dir();
    let root = dir.path();
    write(root, ".quire.toml", "[content]\ndir = \"content\"\n");
    write(
        root,
        "content/v1.0/intro.mdx",
        "---\ntitle: Introduction\ncategory: Guide\nnavOrder: 1\n---\n\n## Getting Started\n\nWelcome to the mixer.\n",
    );
    write(
        root,
        "content/v1.0/surround.mdx",
        "---\ntitle: Surround Sound\ndescription: Positional audio\ncategory: Audio\n---\n\n## Layouts\n\n### Stereo\n\nTwo channels.\n",
    );
    dir
}

/// Creates a site and runs `quire build` in it.
fn built_site() -> tempfile::TempDir {
    let dir = site();
    quire().current_dir(dir.path()).arg("build").assert().success();
    dir
}

/// Runs a command that should succeed and returns its stdout without ANSI codes.
fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let assert = quire().current_dir(dir).args(args).assert().success();
    strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout))
}

/// Runs a command that should succeed and parses its stdout as JSON.
fn json_of(dir: &Path, args: &[&str]) -> Value {
    let assert = quire().current_dir(dir).args(args).assert().success();
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}

/// Reads an artifact from the default output directory.
fn artifact(dir: &Path, name: &str) -> Value {
    let raw = fs::read_to_string(dir.join("public").join(name)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let dir = temp_dir();

        quire()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .success();

        let contents = fs::read_to_string(dir.path().join(".quire.toml")).unwrap();
        assert!(contents.contains("# [content]"));
    }

    #[test]
    fn fails_if_config_exists() {
        let dir = temp_dir();
        fs::write(dir.path().join(".quire.toml"), "existing").unwrap();

        quire()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn force_overwrites_broken_config() {
        let dir = temp_dir();
        fs::write(dir.path().join(".quire.toml"), "[content\nbroken").unwrap();

        quire()
            .current_dir(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let contents = fs::read_to_string(dir.path().join(".quire.toml")).unwrap();
        assert!(contents.contains("# [search]"));
    }

    #[test]
    fn prints_config_preview() {
        let dir = temp_dir();
        let stdout = stdout_of(dir.path(), &["init"]);
        assert!(stdout.contains("Configuration written:"), "{stdout}");
        assert!(stdout.contains("min_query_length"), "{stdout}");
    }
}

mod build {
    use super::*;

    #[test]
    fn writes_three_artifacts() {
        let dir = site();

        quire()
            .current_dir(dir.path())
            .arg("build")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Built metadata for 2 pages and search index.",
            ));

        let meta = artifact(dir.path(), "content-meta.json");
        let pages = meta.as_array().unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0]["id"], 0);
        assert_eq!(pages[0]["slug"], "intro");
        assert_eq!(pages[0]["navOrder"], 1.0);
        assert!(pages[0].get("content").is_none());

        let full = artifact(dir.path(), "content-full.json");
        assert!(
            full[1]["content"]
                .as_str()
                .unwrap()
                .starts_with("---\ntitle: Surround Sound")
        );

        let index = artifact(dir.path(), "search-index.json");
        assert!(index.get("reg").is_some());
        assert!(index.get("title.map").is_some());
    }

    #[test]
    fn segment_order_is_preserved() {
        let dir = built_site();
        let raw = fs::read_to_string(dir.path().join("public/search-index.json")).unwrap();

        let positions: Vec<usize> = [
            "\"reg\"",
            "\"title.map\"",
            "\"description.map\"",
            "\"content.map\"",
            "\"store\"",
        ]
        .iter()
        .map(|key| raw.find(key).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{raw}");
    }

    #[test]
    fn empty_corpus_builds_empty_artifacts() {
        let dir = temp_dir();
        write(dir.path(), ".quire.toml", "");
        fs::create_dir_all(dir.path().join("content")).unwrap();

        quire()
            .current_dir(dir.path())
            .arg("build")
            .assert()
            .success()
            .stdout(predicate::str::contains("Built metadata for 0 pages"));

        assert_eq!(artifact(dir.path(), "content-meta.json"), Value::Array(vec![]));
        assert_eq!(artifact(dir.path(), "content-full.json"), Value::Array(vec![]));
        assert_eq!(
            artifact(dir.path(), "search-index.json"),
            Value::Object(Default::default())
        );
    }

    #[test]
    fn missing_content_dir_fails() {
        let dir = temp_dir();
        write(dir.path(), ".quire.toml", "");

        quire()
            .current_dir(dir.path())
            .arg("build")
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }

    #[test]
    fn malformed_frontmatter_fails_without_writing() {
        let dir = site();
        write(
            dir.path(),
            "content/v1.0/broken.mdx",
            "---\ntitle: [unclosed\n---\nBody\n",
        );

        quire()
            .current_dir(dir.path())
            .arg("build")
            .assert()
            .failure()
            .stderr(predicate::str::contains("broken.mdx"));

        assert!(!dir.path().join("public/content-meta.json").exists());
    }

    #[test]
    fn skip_policy_leaves_out_bad_pages() {
        let dir = site();
        write(
            dir.path(),
            ".quire.toml",
            "[content]\ndir = \"content\"\n\n[build]\non_error = \"skip\"\n",
        );
        write(
            dir.path(),
            "content/v1.0/broken.mdx",
            "---\ntitle: [unclosed\n---\nBody\n",
        );

        let stdout = stdout_of(dir.path(), &["build"]);
        assert!(stdout.contains("Built metadata for 2 pages"), "{stdout}");
        assert!(stdout.contains("skipped"), "{stdout}");

        let meta = artifact(dir.path(), "content-meta.json");
        let ids: Vec<u64> = meta
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn custom_output_dir() {
        let dir = site();
        write(
            dir.path(),
            ".quire.toml",
            "[content]\ndir = \"content\"\n\n[output]\ndir = \"dist/data\"\n",
        );

        quire()
            .current_dir(dir.path())
            .arg("build")
            .assert()
            .success();

        assert!(dir.path().join("dist/data/content-full.json").exists());
    }
}

mod search {
    use super::*;

    #[test]
    fn prefix_matches_title() {
        let dir = built_site();
        let stdout = stdout_of(dir.path(), &["search", "surr"]);
        assert!(stdout.contains("Audio"), "{stdout}");
        assert!(stdout.contains("Surround Sound"), "{stdout}");
        assert!(stdout.contains("v1.0/surround"), "{stdout}");
        assert!(!stdout.contains("Introduction"), "{stdout}");
    }

    #[test]
    fn single_character_returns_nothing() {
        let dir = built_site();
        let stdout = stdout_of(dir.path(), &["search", "s"]);
        assert!(stdout.contains("No results found."), "{stdout}");
    }

    #[test]
    fn unknown_word_returns_nothing() {
        let dir = built_site();
        let stdout = stdout_of(dir.path(), &["search", "xyz123"]);
        assert!(stdout.contains("No results found."), "{stdout}");
    }

    #[test]
    fn json_output_groups_by_category() {
        let dir = built_site();
        let json = json_of(dir.path(), &["search", "--json", "surround"]);

        assert_eq!(json["query"], "surround");
        assert_eq!(json["total_matches"], 1);
        assert_eq!(json["groups"][0]["category"], "Audio");
        assert_eq!(json["groups"][0]["results"][0]["slug"], "surround");
    }

    #[test]
    fn content_matches_are_found() {
        let dir = built_site();
        let json = json_of(dir.path(), &["search", "--json", "mixer"]);
        assert_eq!(json["groups"][0]["results"][0]["slug"], "intro");
    }

    #[test]
    fn fails_without_artifacts() {
        let dir = site();
        quire()
            .current_dir(dir.path())
            .args(["search", "surround"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("content-meta.json"));
    }

    #[test]
    fn base_path_env_selects_artifacts() {
        let dir = built_site();
        let elsewhere = temp_dir();
        write(elsewhere.path(), ".quire.toml", "");

        let assert = quire()
            .current_dir(elsewhere.path())
            .env("QUIRE_BASE_PATH", dir.path().join("public"))
            .args(["search", "--json", "surround"])
            .assert()
            .success();
        let json: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
        assert_eq!(json["total_matches"], 1);
    }

    #[test]
    fn search_works_without_index_artifact() {
        let dir = built_site();
        fs::remove_file(dir.path().join("public/search-index.json")).unwrap();

        let stdout = stdout_of(dir.path(), &["search", "surround"]);
        assert!(stdout.contains("No results found."), "{stdout}");
        let stdout = stdout_of(dir.path(), &["get", "v1.0", "surround"]);
        assert!(stdout.contains("Surround Sound"), "{stdout}");
    }
}

mod get {
    use super::*;

    #[test]
    fn latest_redirects_to_first_page() {
        let dir = built_site();

        quire()
            .current_dir(dir.path())
            .args(["get", "latest"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Introduction"))
            .stderr(predicate::str::contains("v1.0/intro"));
    }

    #[test]
    fn shows_page_with_outline() {
        let dir = built_site();
        let stdout = stdout_of(dir.path(), &["get", "v1.0", "surround"]);
        assert!(stdout.contains("Surround Sound"), "{stdout}");
        assert!(stdout.contains("Positional audio"), "{stdout}");
        assert!(stdout.contains("category: Audio"), "{stdout}");
        assert!(stdout.contains("Layouts"), "{stdout}");
    }

    #[test]
    fn outline_lists_headings() {
        let dir = built_site();
        let json = json_of(dir.path(), &["get", "v1.0", "surround", "--outline", "--json"]);
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["title"], "Layouts");
        assert_eq!(entries[0]["level"], 2);
        assert_eq!(entries[1]["id"], "stereo");
    }

    #[test]
    fn raw_prints_source() {
        let dir = built_site();
        let stdout = stdout_of(dir.path(), &["get", "v1.0", "intro", "--raw"]);
        assert!(stdout.contains("title: Introduction"), "{stdout}");
        assert!(stdout.contains("Welcome to the mixer."), "{stdout}");
    }

    #[test]
    fn json_is_the_full_record() {
        let dir = built_site();
        let json = json_of(dir.path(), &["get", "latest", "surround", "--json"]);
        assert_eq!(json["id"], 1);
        assert_eq!(json["version"], "v1.0");
        assert_eq!(json["category"], "Audio");
        assert!(json["content"].as_str().unwrap().contains("## Layouts"));
    }

    #[test]
    fn unknown_slug_falls_back_to_first_page() {
        let dir = built_site();
        let stdout = stdout_of(dir.path(), &["get", "v1.0", "nowhere"]);
        assert!(stdout.contains("Introduction"), "{stdout}");
    }

    #[test]
    fn unknown_version_fails() {
        let dir = built_site();
        quire()
            .current_dir(dir.path())
            .args(["get", "v9.9", "intro"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not found"));
    }
}

mod nav {
    use super::*;

    #[test]
    fn defaults_to_latest_version() {
        let dir = built_site();
        let stdout = stdout_of(dir.path(), &["nav"]);
        let audio = stdout.find("Audio").unwrap();
        let guide = stdout.find("Guide").unwrap();
        assert!(audio < guide, "{stdout}");
        assert!(stdout.contains("Surround Sound"), "{stdout}");
    }

    #[test]
    fn json_tree() {
        let dir = built_site();
        let json = json_of(dir.path(), &["nav", "v1.0", "--json"]);
        assert_eq!(json[0]["title"], "Audio");
        assert_eq!(json[0]["children"][0]["slug"], "surround");
        assert_eq!(json[1]["title"], "Guide");
    }

    #[test]
    fn unknown_version_fails() {
        let dir = built_site();
        quire()
            .current_dir(dir.path())
            .args(["nav", "v9.9"])
            .assert()
            .failure();
    }
}

mod versions {
    use super::*;

    #[test]
    fn newest_first() {
        let dir = site();
        for version in ["v1.9.0", "v1.10.0"] {
            write(
                dir.path(),
                &format!("content/{version}/intro.mdx"),
                "---\ntitle: Introduction\n---\nHello\n",
            );
        }
        quire().current_dir(dir.path()).arg("build").assert().success();

        let json = json_of(dir.path(), &["versions", "--json"]);
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["version"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["v1.10.0", "v1.9.0", "v1.0"]);
        assert_eq!(json[0]["latest"], true);
        assert_eq!(json[2]["pages"], 2);
    }

    #[test]
    fn table_output() {
        let dir = built_site();
        let stdout = stdout_of(dir.path(), &["versions"]);
        assert!(stdout.contains("v1.0"), "{stdout}");
        assert!(stdout.contains("latest"), "{stdout}");
    }
}

mod status {
    use super::*;

    #[test]
    fn reports_missing_artifacts() {
        let dir = site();
        let stdout = stdout_of(dir.path(), &["status"]);
        assert!(stdout.contains("content-meta.json"), "{stdout}");
        assert!(stdout.contains("[not built]"), "{stdout}");
        assert!(stdout.contains("No issues found."), "{stdout}");
    }

    #[test]
    fn reports_built_artifacts() {
        let dir = built_site();
        let stdout = stdout_of(dir.path(), &["status"]);
        assert!(!stdout.contains("[not built]"), "{stdout}");
        assert!(stdout.contains("bytes"), "{stdout}");
    }

    #[test]
    fn fails_when_content_is_missing() {
        let dir = temp_dir();
        write(dir.path(), ".quire.toml", "[content]\ndir = \"docs\"\n");

        quire()
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Warnings"));
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_effective_settings() {
        let dir = temp_dir();
        write(dir.path(), ".quire.toml", "[search]\nlimit = 4\n");

        let stdout = stdout_of(dir.path(), &["config"]);
        assert!(stdout.contains("[search]"), "{stdout}");
        assert!(stdout.contains("limit = 4"), "{stdout}");
    }

    #[test]
    fn invalid_config_fails() {
        let dir = temp_dir();
        write(dir.path(), ".quire.toml", "[search\n");

        quire()
            .current_dir(dir.path())
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}
