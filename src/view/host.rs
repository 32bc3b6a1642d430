// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Widget host capability.
//!
//! The GUI toolkit sits behind this trait. The lifecycle never touches
//! widget internals; it holds opaque [`WidgetId`] handles and asks the host
//! to create, wire, and destroy them.

use crate::error::Result;

/// Opaque handle to a widget owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Creates a handle from a raw host identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw host identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "widget#{}", self.0)
    }
}

/// Notification kinds a lifecycle subscribes to on its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEventKind {
    /// The widget became visible on screen.
    Mapped,
    /// The widget was removed from the screen without being destroyed.
    Unmapped,
    /// The widget is being destroyed by the host.
    Destroyed,
}

impl HostEventKind {
    /// Short name for log output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mapped => "mapped",
            Self::Unmapped => "unmapped",
            Self::Destroyed => "destroyed",
        }
    }
}

/// A notification delivered by the host for a subscribed widget.
///
/// Delivery is an ordinary synchronous call on the UI thread; the host's
/// event loop hands these to [`Lifecycle::notify`](super::Lifecycle::notify).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostEvent {
    /// What happened.
    pub kind: HostEventKind,
    /// The widget it happened to.
    pub widget: WidgetId,
}

impl HostEvent {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(kind: HostEventKind, widget: WidgetId) -> Self {
        Self { kind, widget }
    }
}

/// Capability the surrounding GUI toolkit must supply.
///
/// Containers come in two shapes: an embeddable frame and an independent
/// top-level window. The label/button primitives exist only for the
/// fallback body the lifecycle synthesizes when a view builds nothing.
pub trait WidgetHost {
    /// Creates an embeddable container.
    fn create_frame(&mut self) -> Result<WidgetId>;

    /// Creates an independent top-level window.
    fn create_toplevel(&mut self) -> Result<WidgetId>;

    /// Places a text label inside `parent`.
    fn place_label(&mut self, parent: WidgetId, text: &str) -> Result<WidgetId>;

    /// Places a button inside `parent` that destroys `parent` when
    /// activated. The destruction is reported through the normal
    /// `Destroyed` notification.
    fn place_close_button(&mut self, parent: WidgetId, label: &str) -> Result<WidgetId>;

    /// Subscribes the caller to `event` notifications for `widget`.
    ///
    /// Registration is additive: a new subscription must not replace any
    /// subscriber registered earlier for the same widget and event.
    fn subscribe(&mut self, widget: WidgetId, event: HostEventKind) -> Result<()>;

    /// Destroys `widget` and everything inside it.
    fn destroy(&mut self, widget: WidgetId) -> Result<()>;
}
