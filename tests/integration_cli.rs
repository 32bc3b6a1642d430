// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for command-line parsing.

use std::path::PathBuf;

use atelier::cli::{Command, parse_from};

#[test]
fn cli_version_alias() {
    let cli = parse_from(["atelier", "-v"]);
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_globals_apply_to_every_command() {
    for command in ["options", "configs", "version"] {
        let cli = parse_from(["atelier", "-c", "a.toml", "-c", "b.toml", "--dry", command]);
        assert_eq!(
            cli.global.configs,
            vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]
        );
        assert!(cli.global.dry);
    }
}

#[test]
fn cli_test_command_passes_args_through() {
    let cli = parse_from(["atelier", "test", "--", "--nocapture", "dao"]);
    let Some(Command::Test(args)) = cli.command else {
        panic!("expected test command");
    };
    assert_eq!(args.args, vec!["--nocapture", "dao"]);
}

#[test]
fn cli_sql_export() {
    let cli = parse_from(["atelier", "sql", "--export"]);
    let Some(Command::Sql(args)) = cli.command else {
        panic!("expected sql command");
    };
    assert!(args.export);
    assert!(!args.json);
    assert!(args.database.is_none());
}

#[test]
fn cli_file_log_level_independent_of_console() {
    let cli = parse_from(["atelier", "-l", "1", "--file-log-level", "5", "run"]);
    assert_eq!(cli.global.log_level, Some(1));
    assert_eq!(cli.global.file_log_level, Some(5));
}
