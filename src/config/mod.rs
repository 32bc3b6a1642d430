// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for atelier.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. atelier.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. ATELIER_* env vars
//! 5. CLI flags (log levels, --dry)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! ATELIER_GLOBAL__LOG_FILE=run.log -> global.log_file = "run.log"
//! ATELIER_PROJECT__ROOT=/work/app  -> project.root = "/work/app"
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

use loader::ConfigLoader;
pub use types::{CommandConfig, DatabaseConfig, GlobalConfig, ProjectConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// The managed project.
    pub project: ProjectConfig,
    /// The `run` command.
    pub run: CommandConfig,
    /// The `test` command.
    pub test: CommandConfig,
    /// Project database and editor.
    pub database: DatabaseConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use atelier::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("atelier.toml")
    ///     .with_env_prefix("ATELIER")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML,
    /// or does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match
    /// the `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve relative paths against the project root.
    ///
    /// # Errors
    ///
    /// Reserved for future validation; path resolution itself cannot fail.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        let root = self.project.root.clone();

        if let Some(path) = &self.database.path {
            self.database.path = Some(resolve_against(&root, path));
        }
        if let Some(script) = &self.database.creation_script {
            self.database.creation_script = Some(resolve_against(&root, script));
        }
        for section in [&mut self.run, &mut self.test] {
            match &section.cwd {
                Some(cwd) => section.cwd = Some(resolve_against(&root, cwd)),
                None => section.cwd = Some(root.clone()),
            }
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert(
            "global.output_log_level".to_string(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".to_string(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".to_string(),
            self.global.log_file.display().to_string(),
        );

        options.insert("project.name".to_string(), self.project.name.clone());
        options.insert(
            "project.root".to_string(),
            self.project.root.display().to_string(),
        );

        format_command(&mut options, "run", &self.run);
        format_command(&mut options, "test", &self.test);

        options.insert(
            "database.path".to_string(),
            self.database
                .path
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert(
            "database.creation_script".to_string(),
            self.database
                .creation_script
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("database.editor".to_string(), self.database.editor.clone());
        options.insert(
            "database.raise_exception".to_string(),
            self.database.raise_exception.to_string(),
        );
        options.insert(
            "database.raise_warning".to_string(),
            self.database.raise_warning.to_string(),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);
        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

fn format_command(options: &mut BTreeMap<String, String>, section: &str, cfg: &CommandConfig) {
    options.insert(format!("{section}.command"), cfg.command.clone());
    options.insert(format!("{section}.args"), cfg.args.join(" "));
    options.insert(
        format!("{section}.cwd"),
        cfg.cwd
            .as_ref()
            .map_or_else(String::new, |p| p.display().to_string()),
    );
}

fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
