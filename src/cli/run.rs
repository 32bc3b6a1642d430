// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the `run` and `test` commands.
//!
//! ```text
//! atelier run -- --release --features gui
//! atelier test -- --nocapture
//!
//! Extra args are appended after the configured [run]/[test] args.
//! ```

use clap::Args;

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Extra arguments appended to the configured command.
    #[arg(value_name = "ARG", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for the `test` command.
#[derive(Debug, Clone, Default, Args)]
pub struct TestArgs {
    /// Extra arguments appended to the configured command.
    #[arg(value_name = "ARG", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
