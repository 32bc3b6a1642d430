// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! The lifecycle state machine.
//!
//! ```text
//! Unbuilt --build()/show()--> Built --close()/Destroyed--> Closed
//!            hooks once        cached body                 terminal
//! ```

use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::error::{Result, ViewError};

use super::host::{HostEvent, HostEventKind, WidgetHost, WidgetId};

/// Why a view is being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// `close()` was called on the lifecycle.
    Requested,
    /// The host destroyed the body; teardown cannot be rolled back.
    HostDestroyed,
}

/// Shape of the fallback body synthesized when `on_build` returns nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Embeddable frame (`build()`).
    Frame,
    /// Independent top-level window (`show()`).
    Toplevel,
}

/// Public observation of the lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unbuilt,
    Built,
    Closed,
}

/// Hook contract a view must implement.
///
/// `on_start`, `on_build`, `on_display`, and `on_close` are required;
/// `on_map` and `on_unmap` default to no-ops. Hook errors are not caught
/// by the lifecycle; they propagate unchanged to whoever called
/// [`Lifecycle::build`], [`Lifecycle::show`], [`Lifecycle::close`], or
/// [`Lifecycle::notify`].
pub trait View<H: WidgetHost> {
    /// Setup that must happen before any widget exists.
    fn on_start(&mut self, host: &mut H) -> Result<()>;

    /// Constructs the root container, or `None` to let the lifecycle
    /// synthesize a diagnostic fallback body.
    fn on_build(&mut self, host: &mut H) -> Result<Option<WidgetId>>;

    /// Post-construction adjustments (sizing, positioning).
    fn on_display(&mut self, host: &mut H) -> Result<()>;

    /// Teardown logic. Runs exactly once, on whichever of `close()` or the
    /// host's destroy notification fires first.
    fn on_close(&mut self, host: &mut H, reason: CloseReason) -> Result<()>;

    /// The body became visible.
    fn on_map(&mut self, host: &mut H, event: &HostEvent) -> Result<()> {
        let _ = (host, event);
        Ok(())
    }

    /// The body was hidden without being destroyed.
    fn on_unmap(&mut self, host: &mut H, event: &HostEvent) -> Result<()> {
        let _ = (host, event);
        Ok(())
    }

    /// Display name used in logs and diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Internal state. `Built` owns the only body reference; leaving `Built`
/// releases it, which is what makes every later teardown path a no-op.
#[derive(Debug, Clone, Copy)]
enum State {
    Unbuilt,
    Built { body: WidgetId },
    Closed,
}

/// Orchestrates build, display, and teardown of one view.
///
/// Exactly one lifecycle owns exactly one body; there is no shared mutable
/// state between instances and no locking. The host is borrowed per call
/// rather than stored, so the same lifecycle works against any host
/// implementation of the right type.
pub struct Lifecycle<H: WidgetHost, V: View<H>> {
    view: V,
    state: State,
    _host: PhantomData<fn(&mut H)>,
}

impl<H: WidgetHost, V: View<H>> Lifecycle<H, V> {
    /// Wraps a view in an unbuilt lifecycle.
    pub const fn new(view: V) -> Self {
        Self {
            view,
            state: State::Unbuilt,
            _host: PhantomData,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> LifecycleState {
        match self.state {
            State::Unbuilt => LifecycleState::Unbuilt,
            State::Built { .. } => LifecycleState::Built,
            State::Closed => LifecycleState::Closed,
        }
    }

    /// Returns the root container while the view is built.
    #[must_use]
    pub const fn body(&self) -> Option<WidgetId> {
        match self.state {
            State::Built { body } => Some(body),
            State::Unbuilt | State::Closed => None,
        }
    }

    /// Borrows the wrapped view.
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Mutably borrows the wrapped view.
    pub const fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Consumes the lifecycle, returning the view.
    pub fn into_view(self) -> V {
        self.view
    }

    /// Builds the view and returns its root container.
    ///
    /// Idempotent: when already built, returns the cached body without
    /// invoking any hook. When unbuilt, runs `on_start`, `on_build`,
    /// synthesizes an embeddable fallback frame if `on_build` produced
    /// nothing, registers the mapped/unmapped/destroyed observers, and
    /// runs `on_display`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Closed`] after `close()`. Hook errors propagate
    /// unchanged; failures from the lifecycle's own host calls are reported
    /// as [`ViewError::Host`]. Either way the lifecycle stays unbuilt.
    pub fn build(&mut self, host: &mut H) -> Result<WidgetId> {
        self.mount(host, BodyKind::Frame)
    }

    /// Same as [`build`](Self::build), except a missing body is
    /// synthesized as an independent top-level window.
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn show(&mut self, host: &mut H) -> Result<WidgetId> {
        self.mount(host, BodyKind::Toplevel)
    }

    /// Closes the view: runs `on_close`, destroys the body via the host,
    /// and releases every lifecycle-held reference.
    ///
    /// Safe to call repeatedly; a no-op when no body exists.
    ///
    /// # Errors
    ///
    /// Hook errors propagate unchanged; a failed destroy is reported as
    /// [`ViewError::Host`]. The lifecycle is already `Closed` when they
    /// do; teardown does not rerun.
    pub fn close(&mut self, host: &mut H) -> Result<()> {
        self.teardown(host, CloseReason::Requested)
    }

    /// Delivers a host notification.
    ///
    /// `Mapped`/`Unmapped` on the current body forward to `on_map` /
    /// `on_unmap`. `Destroyed` on the current body runs the close sequence
    /// with [`CloseReason::HostDestroyed`]; the body is not destroyed a
    /// second time since the host already began tearing it down. Events
    /// for other widgets, or delivered outside the `Built` state, are
    /// ignored; a duplicate destroy notification after an explicit
    /// `close()` is therefore a no-op.
    ///
    /// # Errors
    ///
    /// Hook errors propagate unchanged.
    pub fn notify(&mut self, host: &mut H, event: HostEvent) -> Result<()> {
        let State::Built { body } = self.state else {
            trace!(view = %self.view.name(), event = event.kind.as_str(), "event ignored, not built");
            return Ok(());
        };
        if event.widget != body {
            trace!(view = %self.view.name(), widget = %event.widget, "event ignored, not the body");
            return Ok(());
        }

        match event.kind {
            HostEventKind::Mapped => self.view.on_map(host, &event),
            HostEventKind::Unmapped => self.view.on_unmap(host, &event),
            HostEventKind::Destroyed => self.teardown(host, CloseReason::HostDestroyed),
        }
    }

    fn mount(&mut self, host: &mut H, fallback: BodyKind) -> Result<WidgetId> {
        match self.state {
            State::Built { body } => {
                trace!(view = %self.view.name(), body = %body, "already built");
                return Ok(body);
            }
            State::Closed => {
                return Err(ViewError::Closed {
                    name: self.view.name().to_string(),
                }
                .into());
            }
            State::Unbuilt => {}
        }

        self.view.on_start(host)?;
        let body = match self.view.on_build(host)? {
            Some(body) => body,
            None => self.synthesize_fallback(host, fallback)?,
        };

        self.host_op("subscribe", host.subscribe(body, HostEventKind::Mapped))?;
        self.host_op("subscribe", host.subscribe(body, HostEventKind::Unmapped))?;
        self.host_op("subscribe", host.subscribe(body, HostEventKind::Destroyed))?;

        self.view.on_display(host)?;

        self.state = State::Built { body };
        debug!(view = %self.view.name(), body = %body, "view built");
        Ok(body)
    }

    /// Default body for views whose `on_build` returned nothing. Shows a
    /// diagnostic label and a close button instead of failing silently.
    fn synthesize_fallback(&mut self, host: &mut H, kind: BodyKind) -> Result<WidgetId> {
        let body = match kind {
            BodyKind::Frame => self.host_op("create_frame", host.create_frame())?,
            BodyKind::Toplevel => self.host_op("create_toplevel", host.create_toplevel())?,
        };
        let text = format!("view '{}' produced no body", self.view.name());
        self.host_op("place_label", host.place_label(body, &text))?;
        self.host_op("place_close_button", host.place_close_button(body, "Close"))?;
        debug!(view = %self.view.name(), body = %body, kind = ?kind, "fallback body synthesized");
        Ok(body)
    }

    fn teardown(&mut self, host: &mut H, reason: CloseReason) -> Result<()> {
        let State::Built { body } = self.state else {
            trace!(view = %self.view.name(), "close is a no-op, no body");
            return Ok(());
        };

        // Closed is set before on_close runs: teardown must not be
        // re-enterable even if the hook fails, and a destroy notification
        // arriving mid-close must find no body.
        self.state = State::Closed;
        self.view.on_close(host, reason)?;

        // On the host-destroy path the host already began destruction.
        if reason == CloseReason::Requested {
            self.host_op("destroy", host.destroy(body))?;
        }

        debug!(view = %self.view.name(), body = %body, ?reason, "view closed");
        Ok(())
    }

    /// Tags a failed host call with the view and operation that made it.
    fn host_op<T>(&self, operation: &str, result: Result<T>) -> Result<T> {
        result.map_err(|err| {
            ViewError::Host {
                name: self.view.name().to_string(),
                operation: operation.to_string(),
                message: format!("{err:#}"),
            }
            .into()
        })
    }
}

impl<H: WidgetHost, V: View<H> + std::fmt::Debug> std::fmt::Debug for Lifecycle<H, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lifecycle")
            .field("view", &self.view)
            .field("state", &self.state)
            .finish()
    }
}
