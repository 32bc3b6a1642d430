// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::Config;
use crate::logging::LogLevel;

#[test]
fn test_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.global.file_log_level, LogLevel::TRACE);
    assert_eq!(config.project.root, PathBuf::from("."));
    assert!(config.run.command.is_empty());
    assert!(config.database.path.is_none());
    assert!(config.database.raise_exception);
    assert!(config.database.raise_warning);
}

#[test]
fn test_parse_sections() {
    let toml = r#"
[project]
name = "demo"
root = "/work/demo"

[run]
command = "cargo"
args = ["run", "--release"]

[test]
command = "cargo"
args = ["test"]

[database]
path = "data/app.db"
creation_script = "schema.sql"
editor = "sqlitebrowser"
raise_exception = false
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.project.name, "demo");
    assert_eq!(config.run.command, "cargo");
    assert_eq!(config.run.args, vec!["run", "--release"]);
    assert!(!config.database.raise_exception);
    assert!(config.database.raise_warning);
}

#[test]
fn test_relative_paths_resolve_against_root() {
    let toml = r#"
[project]
root = "/work/demo"

[database]
path = "data/app.db"
creation_script = "schema.sql"
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(
        config.database.path,
        Some(PathBuf::from("/work/demo/data/app.db"))
    );
    assert_eq!(
        config.database.creation_script,
        Some(PathBuf::from("/work/demo/schema.sql"))
    );
}

#[test]
fn test_absolute_paths_kept() {
    let toml = r#"
[project]
root = "/work/demo"

[database]
path = "/var/db/app.db"
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.database.path, Some(PathBuf::from("/var/db/app.db")));
}

#[test]
fn test_command_cwd_defaults_to_root() {
    let toml = r#"
[project]
root = "/work/demo"

[run]
command = "cargo"

[test]
command = "cargo"
cwd = "sub"
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.run.cwd, Some(PathBuf::from("/work/demo")));
    assert_eq!(config.test.cwd, Some(PathBuf::from("/work/demo/sub")));
}

#[test]
fn test_missing_command_reported_with_section() {
    let config = Config::parse("").unwrap();
    let err = config.run.resolved_command("run").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'command' in section '[run]'");
}

#[test]
fn test_unknown_key_rejected() {
    assert!(Config::parse("[project]\nnonsense = 1\n").is_err());
}

#[test]
fn test_dao_settings_from_database_section() {
    let toml = r#"
[database]
creation_script = "schema.sql"
raise_warning = false
"#;
    let config = Config::parse(toml).unwrap();
    let settings = config.database.dao_settings();
    assert!(settings.creation_script().is_some());
    assert!(settings.raise_exception());
    assert!(!settings.raise_warning());
}

#[test]
fn test_format_options_deterministic() {
    let config = Config::parse("[project]\nname = \"demo\"\n").unwrap();
    let lines = config.format_options();
    assert!(!lines.is_empty());
    let mut sorted = lines.clone();
    sorted.sort();
    assert_eq!(lines, sorted);
    assert!(lines.iter().any(|l| l.contains("project.name") && l.contains("demo")));
}
