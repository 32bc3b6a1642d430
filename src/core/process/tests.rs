// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::builder::{ProcessBuilder, ProcessFlags};
use crate::core::env::Env;

#[tokio::test]
async fn test_process_echo() {
    // Use Write-Output in PowerShell, echo in Unix shell
    #[cfg(windows)]
    let output = ProcessBuilder::raw("Write-Output 'hello'")
        .capture_output()
        .run()
        .await
        .expect("echo should succeed");

    #[cfg(not(windows))]
    let output = ProcessBuilder::new("echo")
        .arg("hello")
        .capture_output()
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stdout().trim(), @"hello");
}

#[tokio::test]
async fn test_process_exit_code() {
    let output = ProcessBuilder::raw("exit 42")
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .await
        .expect("process should complete");

    insta::assert_snapshot!(output.exit_code().to_string(), @"42");
}

#[tokio::test]
async fn test_process_failure_reported() {
    let err = ProcessBuilder::raw("exit 3")
        .name("flaky")
        .run()
        .await
        .expect_err("non-zero exit should fail without ALLOW_FAILURE");

    insta::assert_snapshot!(err.to_string(), @"process 'flaky' exited with code 3");
}

#[tokio::test]
async fn test_process_success_codes() {
    let output = ProcessBuilder::raw("exit 3")
        .success_codes([0, 3])
        .run()
        .await
        .expect("exit code 3 is in the success set");

    assert_eq!(output.exit_code(), 3);
}

#[tokio::test]
async fn test_process_env_merged() {
    let mut env = Env::new();
    env.set("TEST_VAR", "test_value");

    // PowerShell uses $env:VAR syntax, Unix uses $VAR
    #[cfg(windows)]
    let output = ProcessBuilder::raw("Write-Output \"$env:TEST_VAR $env:PATH\"")
        .env(env)
        .capture_stdout()
        .run()
        .await
        .expect("process should succeed");

    #[cfg(not(windows))]
    let output = ProcessBuilder::raw("echo \"$TEST_VAR $PATH\"")
        .env(env)
        .capture_stdout()
        .run()
        .await
        .expect("process should succeed");

    let stdout = output.stdout().trim();
    assert!(stdout.starts_with("test_value "));
    // Inherited environment survives the merge
    assert!(stdout.len() > "test_value ".len());
}

#[tokio::test]
async fn test_capture_survives_long_output() {
    // Far more lines than any internal buffering holds; capture must keep
    // consuming while the child is still emitting.
    #[cfg(windows)]
    let run = ProcessBuilder::raw("1..500 | ForEach-Object { \"line $_\" }")
        .capture_stdout()
        .run();

    #[cfg(not(windows))]
    let run =
        ProcessBuilder::raw("i=1; while [ $i -le 500 ]; do echo \"line $i\"; i=$((i+1)); done")
            .capture_stdout()
            .run();

    let output = tokio::time::timeout(Duration::from_secs(10), run)
        .await
        .expect("capture should finish even for long output")
        .expect("process should succeed");

    assert_eq!(output.stdout().lines().count(), 500);
    assert!(output.stdout().ends_with("line 500"));
}

#[tokio::test]
async fn test_quiet_discards_output() {
    let output = ProcessBuilder::raw("echo noisy")
        .quiet()
        .run()
        .await
        .expect("process should succeed");

    assert!(output.success());
    assert!(output.stdout().is_empty());
    assert!(output.stderr().is_empty());
}

#[tokio::test]
async fn test_process_stdin() {
    #[cfg(not(windows))]
    {
        let output = ProcessBuilder::new("cat")
            .stdin("piped content")
            .capture_stdout()
            .run()
            .await
            .expect("cat should succeed");
        insta::assert_snapshot!(output.stdout(), @"piped content");
    }
}

#[tokio::test]
async fn test_process_timeout() {
    let err = ProcessBuilder::raw("sleep 10")
        .timeout(Duration::from_millis(100))
        .run()
        .await
        .expect_err("process should time out");

    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn test_process_cancellation() {
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();
    });

    let output = ProcessBuilder::raw("sleep 10")
        .run_with_cancellation(token)
        .await
        .expect("interrupted process is not an error");

    assert!(output.is_interrupted());
}

#[tokio::test]
async fn test_cancelled_before_spawn() {
    let token = CancellationToken::new();
    token.cancel();

    let output = ProcessBuilder::raw("echo never")
        .run_with_cancellation(token)
        .await
        .expect("pre-cancelled run returns interrupted output");

    assert!(output.is_interrupted());
    assert_eq!(output.exit_code(), -1);
}

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("/usr/bin/editor")
        .arg("--file")
        .arg("my data.db");
    insta::assert_snapshot!(builder.command_line(), @r#"/usr/bin/editor --file "my data.db""#);
}

#[test]
fn test_executable_lookup_found() {
    // cargo should always be available since we're running tests with cargo
    let which_result = ProcessBuilder::which("cargo");
    assert!(which_result.is_ok(), "which: cargo should be found in PATH");
    let builder = which_result.unwrap();
    assert!(
        builder.program().exists(),
        "which: returned program path should exist"
    );

    assert!(
        ProcessBuilder::exists("cargo"),
        "exists: cargo should exist in PATH"
    );

    let find_result = ProcessBuilder::find("cargo");
    assert!(find_result.is_some(), "find: cargo should be found");
    assert!(find_result.unwrap().exists(), "find: returned path should exist");

    let find_all_results: Vec<_> = ProcessBuilder::find_all("cargo").collect();
    assert!(
        !find_all_results.is_empty(),
        "find_all: should find at least one cargo"
    );
}

#[test]
fn test_executable_lookup_not_found() {
    let program = "nonexistent_program_12345";

    let which_result = ProcessBuilder::which(program);
    assert!(
        which_result.is_err(),
        "which: nonexistent program should not be found"
    );
    let err_msg = format!("{}", which_result.unwrap_err());
    assert!(
        err_msg.contains("not found") || err_msg.contains(program),
        "which: error should mention the program: {err_msg}"
    );

    assert!(!ProcessBuilder::exists(program));
    assert!(ProcessBuilder::find(program).is_none());
    assert!(ProcessBuilder::find_all(program).next().is_none());
}
