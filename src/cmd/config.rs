// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for atelier.

use crate::config::Config;

/// Display current configuration options.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Display loaded configuration files.
pub fn run_configs_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}
