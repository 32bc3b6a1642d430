// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the `sql` command.
//!
//! ```text
//! atelier sql --tables
//! atelier sql --query "SELECT * FROM user"
//! atelier sql --columns user --json
//! atelier sql --export > dump.sql
//! atelier sql --editor
//! ```

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `sql` command.
///
/// Exactly one action is required; `--json` modifies the output format
/// of `--query` and `--columns`.
#[derive(Debug, Clone, Default, Args)]
pub struct SqlArgs {
    /// Opens the configured external database editor on the database.
    #[arg(long, group = "action")]
    pub editor: bool,

    /// Executes a SELECT statement and prints the result.
    #[arg(long, value_name = "SQL", group = "action")]
    pub query: Option<String>,

    /// Executes a SQL script file against the database.
    #[arg(long, value_name = "FILE", group = "action")]
    pub script: Option<PathBuf>,

    /// Lists the user tables.
    #[arg(long, group = "action")]
    pub tables: bool,

    /// Lists the columns of a table.
    #[arg(long, value_name = "TABLE", group = "action")]
    pub columns: Option<String>,

    /// Prints a SQL dump of the whole database (schema and data).
    #[arg(long, group = "action")]
    pub export: bool,

    /// Prints results as JSON instead of plain text.
    #[arg(long)]
    pub json: bool,

    /// Database file to operate on, overriding the configured path.
    #[arg(value_name = "DATABASE")]
    pub database: Option<PathBuf>,
}
