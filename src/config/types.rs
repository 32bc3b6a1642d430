// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for atelier.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, ProjectConfig, CommandConfig (run/test), DatabaseConfig
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::dao::{DaoSettings, SqlScript};
use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for stdout output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file; empty disables the file layer.
    pub log_file: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::new(),
        }
    }
}

/// The managed project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Display name, used in status output.
    pub name: String,
    /// Project root; relative paths in other sections resolve against it.
    pub root: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            root: PathBuf::from("."),
        }
    }
}

/// A configured external command (`[run]` or `[test]`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandConfig {
    /// Program to execute; empty means the section is unset.
    pub command: String,
    /// Arguments passed before any extra CLI arguments.
    pub args: Vec<String>,
    /// Extra environment variables merged onto the inherited environment.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    /// Working directory; defaults to the project root.
    pub cwd: Option<PathBuf>,
}

impl CommandConfig {
    /// Returns the program, or a `MissingKey` error when the section was
    /// never filled in.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` naming `section`.
    pub fn resolved_command(&self, section: &str) -> std::result::Result<&str, ConfigError> {
        if self.command.is_empty() {
            Err(ConfigError::MissingKey {
                section: section.to_string(),
                key: "command".to_string(),
            })
        } else {
            Ok(&self.command)
        }
    }
}

/// The project database and its editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Path to the SQLite file.
    pub path: Option<PathBuf>,
    /// SQL script run once when the database file is first created.
    pub creation_script: Option<PathBuf>,
    /// External database editor program.
    pub editor: String,
    /// Arguments placed before the database path.
    pub editor_args: Vec<String>,
    /// Re-raise engine errors (false: swallow and report `false`/empty).
    pub raise_exception: bool,
    /// Re-raise warning-class conditions.
    pub raise_warning: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            creation_script: None,
            editor: String::new(),
            editor_args: Vec::new(),
            raise_exception: true,
            raise_warning: true,
        }
    }
}

impl DatabaseConfig {
    /// Builds Dao settings from this section.
    #[must_use]
    pub fn dao_settings(&self) -> DaoSettings {
        DaoSettings::builder()
            .maybe_with_creation_script(self.creation_script.clone().map(SqlScript::file))
            .with_raise_exception(self.raise_exception)
            .with_raise_warning(self.raise_warning)
            .build()
    }
}
