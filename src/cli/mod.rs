// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for atelier using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! atelier [global options] <command>
//! run [args...]
//! test [args...]
//! sql [--editor | --query SQL | --script FILE | --tables | --columns TABLE | --export]
//! options
//! configs
//! version
//! ```

pub mod global;
pub mod run;
pub mod sql;


use crate::cli::global::GlobalOptions;
use crate::cli::run::{RunArgs, TestArgs};
use crate::cli::sql::SqlArgs;
use clap::{Parser, Subcommand};

/// Atelier - Desktop Project Manager
///
/// Command-line companion for managed desktop projects.
#[derive(Debug, Parser)]
#[command(
    name = "atelier",
    author,
    version,
    about = "Desktop Project Manager",
    long_about = "atelier Copyright (C) 2026 Atelier Contributors\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  A command-line companion for managed desktop projects.\n\n\
                  Invoking `atelier run` launches the configured project command.\n\
                  See `atelier <command> --help` for more information about a\n\
                  command.",
    after_help = "CONFIG FILES:\n\n\
                  By default, atelier looks for `atelier.toml` in the current\n\
                  directory. Additional files can be specified with --config;\n\
                  those are loaded after the default and override it. On top of\n\
                  the files, ATELIER_* environment variables and command-line\n\
                  flags apply, in that order."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their resolved values.
    Options,

    /// Lists the configuration files used by atelier.
    Configs,

    /// Runs the configured project command.
    Run(RunArgs),

    /// Runs the configured test command.
    Test(TestArgs),

    /// Queries, inspects or exports the project database.
    Sql(SqlArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
