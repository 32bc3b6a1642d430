// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |             run / test / sql
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '-----+-------------+-------'
//!                    |             |
//!                    v             v
//!                  dao           view
//!               rusqlite    Lifecycle over
//!               policies      WidgetHost
//!
//!   +-----------------------------------------+
//!   |  core          process, env             |
//!   +-----------------------------------------+
//!   |  foundation    error, logging           |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod dao;
pub mod error;
pub mod logging;
pub mod view;
