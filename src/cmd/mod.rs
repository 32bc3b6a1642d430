// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command handlers.
//!
//! ```text
//! run / test   spawn the configured [run]/[test] command
//! sql          query/inspect/export the project database, or launch an editor
//! config       options and configs listings
//! ```

pub mod config;
pub mod run;
pub mod sql;
