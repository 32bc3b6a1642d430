// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            AtelierError (~24 bytes)
//!                    |
//!   +--------+------+------+--------+------+
//!   |        |      |      |        |      |
//!   v        v      v      v        v      v
//! Bail    Config  Proc   View     Dao   Io/Other
//!          Box    Box    Box      Box   Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config  ReadError, ParseError, MissingKey, InvalidValue, NotFound
//!   Process ExecutableNotFound, SpawnFailed, NonZeroExit, Timeout, StreamError
//!   View    Closed, Host
//!   Dao     Open, Script, Sql, CloseFailed
//!
//! All variants boxed => AtelierError fits in 24 bytes.
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`AtelierError`].
pub type AtelierResult<T> = std::result::Result<T, AtelierError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum AtelierError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// View lifecycle error.
    #[error("view error: {0}")]
    View(#[from] Box<ViewError>),

    /// Database access error.
    #[error("dao error: {0}")]
    Dao(#[from] Box<DaoError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`AtelierError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> AtelierError {
    AtelierError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for AtelierError {
                fn from(err: $error) -> Self {
                    AtelierError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ProcessError => Process,
    ViewError => View,
    DaoError => Dao,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process timed out.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    /// I/O failure on a process stream (stdin write or output read).
    #[error("stream error for process '{command}': {message}")]
    StreamError { command: String, message: String },
}

// --- View Errors ---

/// View lifecycle errors.
///
/// Hook errors are never wrapped here; they propagate as-is through the
/// `anyhow` chain. These variants cover the lifecycle's own failure modes.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Build or show requested on a closed lifecycle. Closed is terminal.
    #[error("view '{name}' is closed and cannot be built again")]
    Closed { name: String },

    /// The widget host rejected an operation.
    #[error("widget host rejected {operation} for view '{name}': {message}")]
    Host {
        name: String,
        operation: String,
        message: String,
    },
}

// --- Dao Errors ---

/// Database access errors.
#[derive(Debug, Error)]
pub enum DaoError {
    /// Failed to open the database file.
    #[error("failed to open database '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Failed to load a SQL script file.
    #[error("failed to read sql script '{path}': {source}")]
    Script {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the SQL engine.
    #[error("sql error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// Explicit close failed.
    #[error("failed to close database '{path}': {source}")]
    CloseFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
}
