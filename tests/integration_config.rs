// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use std::path::PathBuf;

use atelier::config::Config;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_minimal() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.project.root, PathBuf::from("."));
    assert!(config.run.command.is_empty());
    assert!(config.database.path.is_none());
}

#[test]
fn config_parse_full() {
    let toml = r#"
[global]
output_log_level = 4
file_log_level = 5
log_file = "atelier.log"

[project]
name = "demo"
root = "/work/demo"

[run]
command = "python"
args = ["main.py"]
cwd = "src"

[test]
command = "pytest"

[run.env]
PYTHONUNBUFFERED = "1"

[database]
path = "data/app.db"
creation_script = "schema.sql"
editor = "sqlitebrowser"
editor_args = ["--table", "user"]
raise_warning = false
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.global.output_log_level.as_u8(), 4);
    assert_eq!(config.project.name, "demo");
    assert_eq!(config.run.env.get("PYTHONUNBUFFERED").map(String::as_str), Some("1"));
    assert_eq!(config.database.editor_args, vec!["--table", "user"]);
    assert!(config.database.raise_exception);
    assert!(!config.database.raise_warning);
}

// =============================================================================
// Path resolution against the project root
// =============================================================================

#[test]
fn config_paths_resolved() {
    let toml = r#"
[project]
root = "/work/demo"

[run]
command = "make"
cwd = "build"

[test]
command = "make"

[database]
path = "data/app.db"
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.run.cwd, Some(PathBuf::from("/work/demo/build")));
    assert_eq!(config.test.cwd, Some(PathBuf::from("/work/demo")));
    assert_eq!(
        config.database.path,
        Some(PathBuf::from("/work/demo/data/app.db"))
    );
}

// =============================================================================
// Layered loading from files
// =============================================================================

#[test]
fn config_later_file_overrides_earlier() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.toml");
    let extra = dir.path().join("extra.toml");
    std::fs::write(&base, "[project]\nname = \"base\"\nroot = \"/work\"\n").unwrap();
    std::fs::write(&extra, "[project]\nname = \"extra\"\n").unwrap();

    let config = Config::builder()
        .add_toml_file(&base)
        .add_toml_file(&extra)
        .build()
        .unwrap();

    assert_eq!(config.project.name, "extra");
    assert_eq!(config.project.root, PathBuf::from("/work"));
}

#[test]
fn config_missing_required_file_fails() {
    assert!(Config::from_file("/nonexistent/atelier.toml").is_err());
}

#[test]
fn config_optional_file_skipped() {
    let config = Config::builder()
        .add_toml_file_optional("/nonexistent/atelier.toml")
        .build()
        .unwrap();
    assert!(config.project.name.is_empty());
}

#[test]
fn config_loader_lists_files() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("atelier.toml");
    std::fs::write(&file, "[project]\nname = \"demo\"\n").unwrap();

    let loader = Config::builder().add_toml_file(&file);
    let listing = loader.format_loaded_files();
    assert_eq!(listing.len(), 1);
    assert!(listing[0].contains("atelier.toml"));
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn config_rejects_unknown_sections() {
    assert!(Config::parse("[surprise]\nkey = 1\n").is_err());
}

#[test]
fn config_options_listing_mentions_every_section() {
    let config = Config::parse("").unwrap();
    let lines = config.format_options();
    for prefix in ["global.", "project.", "run.", "test.", "database."] {
        assert!(
            lines.iter().any(|l| l.starts_with(prefix)),
            "missing section {prefix} in options listing"
        );
    }
}
