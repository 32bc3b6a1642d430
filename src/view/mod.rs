// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! View lifecycle management over an abstract widget host.
//!
//! ```text
//! Lifecycle<H, V>
//!     |
//!     | build() / show()
//!     v
//! Unbuilt --> on_start, on_build, [fallback body], subscribe x3, on_display
//!     |                                   |
//!     v                                   v
//!   Built <---- build()/show() ---- cached body (idempotent)
//!     |
//!     | close()               host Destroyed notification
//!     | on_close(Requested)   on_close(HostDestroyed)
//!     | host.destroy(body)    (host already destroying)
//!     v
//!   Closed (terminal)
//! ```
//!
//! The host is an external collaborator: the crate only defines the
//! [`WidgetHost`] capability and forwards its mount/unmount/destroy
//! notifications to the view's hooks. All calls are synchronous and run on
//! the caller's thread; a lifecycle owns at most one body at a time.

mod host;
mod lifecycle;

pub use host::{HostEvent, HostEventKind, WidgetHost, WidgetId};
pub use lifecycle::{BodyKind, CloseReason, Lifecycle, LifecycleState, View};
