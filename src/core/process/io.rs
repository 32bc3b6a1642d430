// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O streaming and output capture for processes.
//!
//! ```text
//! run_child() / run_child_with_cancellation()
//!   stdin task (optional)
//!   stdout/stderr reader tasks accumulate captured lines
//!   wait (or cancel/timeout)
//!   join readers --> ProcessOutput { stdout, stderr, exit_code, interrupted }
//! ```
//!
//! Each reader task owns its captured buffer and hands it back through its
//! `JoinHandle`. Capture must never depend on the parent draining anything
//! while the child runs; a child that emits arbitrarily much output is
//! consumed at full speed regardless of when the parent joins.

use crate::error::{ProcessError, Result};
use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};

/// Spawns a reader task for a child stream if the flags need one.
///
/// The task drains the stream to EOF and returns whatever the flags told
/// it to keep.
fn spawn_reader<R>(
    stream: Option<R>,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &'static str,
) -> Option<JoinHandle<String>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    if !flags.intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING) {
        return None;
    }
    stream.map(|stream| {
        let name = process_name.to_string();
        tokio::spawn(async move { read_stream(stream, flags, &name, stream_name).await })
    })
}

/// Joins a reader task, returning its captured output.
async fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}

impl ProcessBuilder {
    /// Runs the child process, handling I/O streaming and waiting for completion.
    pub(super) async fn run_child(&self, name: &str, child: &mut Child) -> Result<ProcessOutput> {
        let stdout_handle =
            spawn_reader(child.stdout.take(), self.stdout_stream(), name, "stdout");
        let stderr_handle =
            spawn_reader(child.stderr.take(), self.stderr_stream(), name, "stderr");

        self.write_stdin(name, child).await?;

        let exit_status = if let Some(timeout_duration) = self.timeout_duration() {
            tokio::select! {
                status = child.wait() => status?,
                () = tokio::time::sleep(timeout_duration) => {
                    warn!(process = %name, timeout = ?timeout_duration, "Process timed out");
                    child.kill().await.with_context(|| format!("failed to kill process {name}"))?;
                    child.wait().await?;
                    join_reader(stdout_handle).await;
                    join_reader(stderr_handle).await;
                    return Err(ProcessError::Timeout {
                        command: name.to_string(),
                        timeout_secs: timeout_duration.as_secs(),
                    }
                    .into());
                }
            }
        } else {
            child.wait().await?
        };

        Ok(ProcessOutput::new(
            exit_status.code().unwrap_or(-1),
            join_reader(stdout_handle).await,
            join_reader(stderr_handle).await,
            false,
        ))
    }

    /// Runs the child process with cancellation support.
    pub(super) async fn run_child_with_cancellation(
        &self,
        name: &str,
        child: &mut Child,
        token: CancellationToken,
    ) -> Result<ProcessOutput> {
        let stdout_handle =
            spawn_reader(child.stdout.take(), self.stdout_stream(), name, "stdout");
        let stderr_handle =
            spawn_reader(child.stderr.take(), self.stderr_stream(), name, "stderr");

        self.write_stdin(name, child).await?;

        let (exit_status, interrupted) = tokio::select! {
            status = child.wait() => (status?, false),
            () = token.cancelled() => {
                warn!(process = %name, "Cancellation requested, terminating process");
                child.kill().await.ok();
                let status = child.wait().await
                    .with_context(|| format!("failed waiting for process {name} to exit"))?;
                (status, true)
            }
        };

        Ok(ProcessOutput::new(
            exit_status.code().unwrap_or(-1),
            join_reader(stdout_handle).await,
            join_reader(stderr_handle).await,
            interrupted,
        ))
    }

    /// Writes stdin content to the child process if configured.
    async fn write_stdin(&self, name: &str, child: &mut Child) -> Result<()> {
        if let Some(stdin_content) = self.stdin_content()
            && let Some(mut stdin) = child.stdin.take()
        {
            use tokio::io::AsyncWriteExt;
            stdin
                .write_all(stdin_content.as_bytes())
                .await
                .map_err(|e| ProcessError::StreamError {
                    command: name.to_string(),
                    message: format!("failed to write stdin: {e}"),
                })?;
        }
        Ok(())
    }
}

/// Reads UTF-8 lines from a stream to EOF, forwarding and accumulating per
/// the flags.
async fn read_stream<R>(
    stream: R,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &str,
) -> String
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stream).lines();
    let mut captured = String::new();
    while let Ok(Some(line)) = lines.next_line().await {
        if flags.contains(StreamFlags::FORWARD_TO_LOG) {
            trace!(process = %process_name, stream = %stream_name, line = %line, "output");
        }
        if flags.contains(StreamFlags::KEEP_IN_STRING) {
            if !captured.is_empty() {
                captured.push('\n');
            }
            captured.push_str(&line);
        }
    }
    captured
}
