// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `run` and `test` command implementations.
//!
//! ```text
//! [run]/[test] config section
//!       |
//!       v
//! ProcessBuilder  inherit stdio, cwd, env, extra args
//!       |
//!       v
//! run_with_cancellation(Ctrl-C token)
//!       |
//!       v
//! report exit status (ALLOW_FAILURE: the status is the result)
//! ```

use tokio_util::sync::CancellationToken;

use crate::config::{CommandConfig, Config};
use crate::core::env::Env;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::Result;

/// Main handler for the `run` command.
///
/// # Errors
///
/// Returns an error if the `[run]` section is not configured or the process
/// cannot be spawned.
pub async fn run_run_command(extra_args: &[String], config: &Config, dry: bool) -> Result<()> {
    launch(&config.run, "run", extra_args, dry).await
}

/// Main handler for the `test` command.
///
/// # Errors
///
/// Returns an error if the `[test]` section is not configured or the process
/// cannot be spawned.
pub async fn run_test_command(extra_args: &[String], config: &Config, dry: bool) -> Result<()> {
    launch(&config.test, "test", extra_args, dry).await
}

/// Spawns a configured command section with inherited stdio.
async fn launch(section: &CommandConfig, name: &str, extra_args: &[String], dry: bool) -> Result<()> {
    let builder = build_process(section, name, extra_args)?;

    if dry {
        println!("{}", builder.command_line());
        return Ok(());
    }

    let cancel_token = CancellationToken::new();
    let signal_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, interrupting...");
            signal_token.cancel();
        }
    });

    let output = builder.run_with_cancellation(cancel_token).await?;

    if output.is_interrupted() {
        println!("{name} interrupted");
    } else if output.success() {
        println!("{name} completed (exit code 0)");
    } else {
        println!("{name} failed (exit code {})", output.exit_code());
    }
    Ok(())
}

/// Builds the process from a `[run]`/`[test]` section.
fn build_process(
    section: &CommandConfig,
    name: &str,
    extra_args: &[String],
) -> Result<ProcessBuilder> {
    let command = section.resolved_command(name)?;

    let mut builder = ProcessBuilder::new(command)
        .args(&section.args)
        .args(extra_args)
        .name(name)
        .inherit_stdio()
        // The exit status is reported, not treated as a failure of atelier.
        .flag(ProcessFlags::ALLOW_FAILURE);

    if let Some(cwd) = &section.cwd {
        builder = builder.cwd(cwd);
    }
    if !section.env.is_empty() {
        builder = builder.env(Env::from_map(section.env.clone()));
    }
    Ok(builder)
}
