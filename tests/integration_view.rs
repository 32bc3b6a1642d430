// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the view lifecycle.
//!
//! Drives a `Lifecycle` end to end against a scripted host, the way an
//! embedding toolkit would: build, deliver notifications, close.

use atelier::view::{
    CloseReason, HostEvent, HostEventKind, Lifecycle, LifecycleState, View, WidgetHost, WidgetId,
};

// =============================================================================
// Fixtures
// =============================================================================

/// Host that records every call and hands out sequential widget ids.
#[derive(Default)]
struct ScriptedHost {
    next_id: u64,
    destroyed: Vec<WidgetId>,
    subscriptions: Vec<(WidgetId, HostEventKind)>,
}

impl ScriptedHost {
    fn allocate(&mut self) -> WidgetId {
        self.next_id += 1;
        WidgetId::new(self.next_id)
    }
}

impl WidgetHost for ScriptedHost {
    fn create_frame(&mut self) -> atelier::error::Result<WidgetId> {
        Ok(self.allocate())
    }

    fn create_toplevel(&mut self) -> atelier::error::Result<WidgetId> {
        Ok(self.allocate())
    }

    fn place_label(&mut self, _parent: WidgetId, _text: &str) -> atelier::error::Result<WidgetId> {
        Ok(self.allocate())
    }

    fn place_close_button(
        &mut self,
        _parent: WidgetId,
        _label: &str,
    ) -> atelier::error::Result<WidgetId> {
        Ok(self.allocate())
    }

    fn subscribe(
        &mut self,
        widget: WidgetId,
        event: HostEventKind,
    ) -> atelier::error::Result<()> {
        self.subscriptions.push((widget, event));
        Ok(())
    }

    fn destroy(&mut self, widget: WidgetId) -> atelier::error::Result<()> {
        self.destroyed.push(widget);
        Ok(())
    }
}

/// A panel view that builds one frame and counts its hook invocations.
#[derive(Default)]
struct Panel {
    closes: u32,
    maps: u32,
    last_reason: Option<CloseReason>,
}

impl View<ScriptedHost> for Panel {
    fn on_start(&mut self, _host: &mut ScriptedHost) -> atelier::error::Result<()> {
        Ok(())
    }

    fn on_build(&mut self, host: &mut ScriptedHost) -> atelier::error::Result<Option<WidgetId>> {
        Ok(Some(host.create_frame()?))
    }

    fn on_display(&mut self, _host: &mut ScriptedHost) -> atelier::error::Result<()> {
        Ok(())
    }

    fn on_close(
        &mut self,
        _host: &mut ScriptedHost,
        reason: CloseReason,
    ) -> atelier::error::Result<()> {
        self.closes += 1;
        self.last_reason = Some(reason);
        Ok(())
    }

    fn on_map(
        &mut self,
        _host: &mut ScriptedHost,
        _event: &HostEvent,
    ) -> atelier::error::Result<()> {
        self.maps += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "panel"
    }
}

/// A view that never produces a body, forcing the fallback.
struct EmptyView;

impl View<ScriptedHost> for EmptyView {
    fn on_start(&mut self, _host: &mut ScriptedHost) -> atelier::error::Result<()> {
        Ok(())
    }

    fn on_build(&mut self, _host: &mut ScriptedHost) -> atelier::error::Result<Option<WidgetId>> {
        Ok(None)
    }

    fn on_display(&mut self, _host: &mut ScriptedHost) -> atelier::error::Result<()> {
        Ok(())
    }

    fn on_close(
        &mut self,
        _host: &mut ScriptedHost,
        _reason: CloseReason,
    ) -> atelier::error::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Full lifecycle scenarios
// =============================================================================

#[test]
fn lifecycle_build_notify_close() {
    let mut host = ScriptedHost::default();
    let mut lifecycle = Lifecycle::new(Panel::default());

    let body = lifecycle.build(&mut host).unwrap();
    assert_eq!(lifecycle.state(), LifecycleState::Built);
    assert_eq!(lifecycle.body(), Some(body));

    // The lifecycle watches its body for map/unmap/destroy.
    let events: Vec<HostEventKind> = host
        .subscriptions
        .iter()
        .filter(|(w, _)| *w == body)
        .map(|(_, e)| *e)
        .collect();
    assert_eq!(
        events,
        vec![
            HostEventKind::Mapped,
            HostEventKind::Unmapped,
            HostEventKind::Destroyed
        ]
    );

    lifecycle
        .notify(&mut host, HostEvent::new(HostEventKind::Mapped, body))
        .unwrap();
    assert_eq!(lifecycle.view().maps, 1);

    lifecycle.close(&mut host).unwrap();
    assert_eq!(lifecycle.state(), LifecycleState::Closed);
    assert_eq!(host.destroyed, vec![body]);

    let panel = lifecycle.into_view();
    assert_eq!(panel.closes, 1);
    assert_eq!(panel.last_reason, Some(CloseReason::Requested));
}

#[test]
fn lifecycle_host_destroy_races_close() {
    let mut host = ScriptedHost::default();
    let mut lifecycle = Lifecycle::new(Panel::default());
    let body = lifecycle.build(&mut host).unwrap();

    // Host tears the body down first (user closed the window).
    lifecycle
        .notify(&mut host, HostEvent::new(HostEventKind::Destroyed, body))
        .unwrap();
    assert_eq!(lifecycle.state(), LifecycleState::Closed);
    assert!(host.destroyed.is_empty());
    assert_eq!(lifecycle.view().last_reason, Some(CloseReason::HostDestroyed));

    // A late explicit close and a duplicate notification change nothing.
    lifecycle.close(&mut host).unwrap();
    lifecycle
        .notify(&mut host, HostEvent::new(HostEventKind::Destroyed, body))
        .unwrap();
    assert_eq!(lifecycle.view().closes, 1);
}

#[test]
fn lifecycle_build_is_idempotent_and_terminal_after_close() {
    let mut host = ScriptedHost::default();
    let mut lifecycle = Lifecycle::new(Panel::default());

    let first = lifecycle.build(&mut host).unwrap();
    let second = lifecycle.build(&mut host).unwrap();
    assert_eq!(first, second);

    lifecycle.close(&mut host).unwrap();
    let err = lifecycle.build(&mut host).unwrap_err();
    assert!(err.to_string().contains("closed"));
}

#[test]
fn lifecycle_synthesizes_fallback_for_empty_view() {
    let mut host = ScriptedHost::default();

    let mut embedded = Lifecycle::new(EmptyView);
    let body = embedded.build(&mut host).unwrap();
    assert_eq!(embedded.state(), LifecycleState::Built);
    // Frame + label + close button were created by the host.
    assert!(host.next_id >= 3);
    assert_eq!(embedded.body(), Some(body));

    let mut windowed = Lifecycle::new(EmptyView);
    assert!(windowed.show(&mut host).is_ok());
}
