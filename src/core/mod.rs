// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core infrastructure: subprocess execution and environment handling.

pub mod env;
pub mod process;
