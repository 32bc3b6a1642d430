// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Run | Test | Sql | Options | Configs | Version
//! ```

use std::process::ExitCode;

use atelier::cli::global::GlobalOptions;
use atelier::cli::{self, Command};
use atelier::cmd::config::{run_configs_command, run_options_command};
use atelier::cmd::run::{run_run_command, run_test_command};
use atelier::cmd::sql::run_sql_command;
use atelier::config::Config;
use atelier::config::loader::ConfigLoader;
use atelier::logging::init_logging;
use atelier::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    // Config contributes log settings; a broken config is reported later
    // by the command itself, with logging already up.
    let early_config = build_config_loader(&cli.global).build().ok();

    let log_config = build_log_config(&cli.global, early_config.as_ref());
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

/// Merges CLI flags over the `[global]` config section.
fn build_log_config(global: &GlobalOptions, config: Option<&Config>) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .or_else(|| config.map(|c| c.global.output_log_level))
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .or_else(|| config.map(|c| c.global.file_log_level))
        .unwrap_or(console_level);

    let log_file = global.log_file.clone().or_else(|| {
        config.and_then(|c| {
            if c.global.log_file.as_os_str().is_empty() {
                None
            } else {
                Some(c.global.log_file.clone())
            }
        })
    });

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(log_file.map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            load_config(&cli.global).map(|config| run_options_command(&config))
        }
        Some(Command::Configs) => {
            let loader = build_config_loader(&cli.global);
            run_configs_command(&loader.format_loaded_files());
            Ok(())
        }
        Some(Command::Run(args)) => match load_config(&cli.global) {
            Ok(config) => run_run_command(&args.args, &config, cli.global.dry).await,
            Err(e) => Err(e),
        },
        Some(Command::Test(args)) => match load_config(&cli.global) {
            Ok(config) => run_test_command(&args.args, &config, cli.global.dry).await,
            Err(e) => Err(e),
        },
        Some(Command::Sql(args)) => match load_config(&cli.global) {
            Ok(config) => run_sql_command(args, &config, cli.global.dry).await,
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new().add_toml_file_optional("atelier.toml");
    for config_path in &global.configs {
        loader = loader.add_toml_file(config_path);
    }
    loader.with_env_prefix("ATELIER")
}

fn load_config(global: &GlobalOptions) -> atelier::error::Result<Config> {
    let loader = build_config_loader(global);
    loader.build().map_err(|e| {
        eprintln!("Failed to load config: {e}");
        e
    })
}
