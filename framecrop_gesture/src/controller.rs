// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use framecrop_geometry::{ChangeNotifier, CropGeometry};
use kurbo::Size;

use crate::drag::DragSession;
use crate::pointer::{PointerEvent, PointerPhase};

/// Zoom step applied per wheel event unless configured otherwise.
pub const DEFAULT_ZOOM_STEP: f64 = 0.01;

bitflags::bitflags! {
    /// Host listeners that should currently be attached.
    ///
    /// Mirrors the listener set onto whatever event source the host uses;
    /// the controller ignores events whose listener is not attached.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Listeners: u8 {
        /// Press events on the content.
        const START = 0b0000_0001;
        /// Move events, only during a drag.
        const MOVE  = 0b0000_0010;
        /// Release events, only during a drag.
        const STOP  = 0b0000_0100;
        /// Wheel events, while wheel zoom is enabled.
        const WHEEL = 0b0000_1000;
    }
}

/// What the host should do with the event it just forwarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Response {
    /// The controller acted on the event.
    pub handled: bool,
    /// Suppress the platform's default action.
    pub prevent_default: bool,
    /// Stop the event from propagating further.
    pub stop_propagation: bool,
    /// `Some(true)` when a drag began, `Some(false)` when it ended.
    ///
    /// Hosts use this to toggle any drag-active styling.
    pub drag_active: Option<bool>,
}

impl Response {
    /// The event was not for this controller.
    pub const IGNORED: Self = Self {
        handled: false,
        prevent_default: false,
        stop_propagation: false,
        drag_active: None,
    };

    const fn handled(prevent_default: bool) -> Self {
        Self {
            handled: true,
            prevent_default,
            stop_propagation: false,
            drag_active: None,
        }
    }

    const fn with_drag_active(mut self, active: bool) -> Self {
        self.drag_active = Some(active);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum DragPhase {
    Idle,
    Dragging(DragSession),
}

/// Turns pointer and wheel input into [`CropGeometry`] operations.
///
/// The drag state machine has two states. A qualifying press on ready geometry
/// moves it from idle to dragging; every move then pans by the pointer's
/// frame-to-frame movement, normalized by the rendered wrapper size; a release
/// returns it to idle. Wheel zoom is a separate toggle.
///
/// The controller never touches geometry state directly, only through the
/// geometry's own operations.
#[derive(Clone, Debug)]
pub struct GestureController {
    phase: DragPhase,
    attached: Listeners,
    zoom_step: f64,
}

impl GestureController {
    /// Creates a detached controller with the default zoom step.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: DragPhase::Idle,
            attached: Listeners::empty(),
            zoom_step: DEFAULT_ZOOM_STEP,
        }
    }

    /// Sets the relative zoom applied per wheel event.
    ///
    /// Steps outside `(0, 1)` are ignored.
    #[must_use]
    pub fn with_zoom_step(mut self, step: f64) -> Self {
        if step > 0.0 && step < 1.0 {
            self.zoom_step = step;
        } else {
            log::warn!("ignoring zoom step {step}, keeping {}", self.zoom_step);
        }
        self
    }

    /// Relative zoom applied per wheel event.
    #[must_use]
    pub fn zoom_step(&self) -> f64 {
        self.zoom_step
    }

    /// Listeners the host should have attached right now.
    #[must_use]
    pub fn attached(&self) -> Listeners {
        self.attached
    }

    /// Returns `true` while a drag session is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// Returns the active drag session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match &self.phase {
            DragPhase::Dragging(session) => Some(session),
            DragPhase::Idle => None,
        }
    }

    /// Starts listening for presses.
    pub fn attach(&mut self) {
        self.attached |= Listeners::START;
    }

    /// Stops listening for everything, ending any drag in progress.
    pub fn detach(&mut self) -> Response {
        let was_dragging = self.is_dragging();
        self.phase = DragPhase::Idle;
        self.attached = Listeners::empty();
        if was_dragging {
            Response::handled(false).with_drag_active(false)
        } else {
            Response::IGNORED
        }
    }

    /// Enables or disables wheel zoom.
    pub fn set_zoom_enabled(&mut self, enabled: bool) {
        self.attached.set(Listeners::WHEEL, enabled);
    }

    /// Returns `true` while wheel zoom is enabled.
    #[must_use]
    pub fn is_zoom_enabled(&self) -> bool {
        self.attached.contains(Listeners::WHEEL)
    }

    /// Feeds a pointer event through the drag state machine.
    ///
    /// `wrapper` is the rendered viewport size in device pixels, used to
    /// normalize pointer movement.
    pub fn handle_pointer<N: ChangeNotifier>(
        &mut self,
        event: &PointerEvent,
        geometry: &mut CropGeometry<N>,
        wrapper: Size,
    ) -> Response {
        match event.phase {
            PointerPhase::Start => self.press(event, geometry),
            PointerPhase::Move => self.drag(event, geometry, wrapper),
            PointerPhase::Stop => self.release(),
        }
    }

    /// Zooms in for a positive `delta` and out for a negative one.
    ///
    /// While enabled, every wheel event is consumed, including zero deltas.
    pub fn handle_wheel<N: ChangeNotifier>(
        &mut self,
        delta: f64,
        geometry: &mut CropGeometry<N>,
    ) -> Response {
        if !self.is_zoom_enabled() {
            return Response::IGNORED;
        }
        if delta > 0.0 {
            geometry.zoom(1.0 + self.zoom_step);
        } else if delta < 0.0 {
            geometry.zoom(1.0 - self.zoom_step);
        }
        Response {
            handled: true,
            prevent_default: true,
            stop_propagation: true,
            drag_active: None,
        }
    }

    fn press<N: ChangeNotifier>(
        &mut self,
        event: &PointerEvent,
        geometry: &CropGeometry<N>,
    ) -> Response {
        if !self.attached.contains(Listeners::START)
            || !geometry.is_ready()
            || !event.can_start_drag()
        {
            return Response::IGNORED;
        }
        let was_dragging = self.is_dragging();
        self.phase = DragPhase::Dragging(DragSession::start(event.page));
        self.attached |= Listeners::MOVE | Listeners::STOP;
        log::trace!("drag start at {:?}", event.page);
        let response = Response::handled(true);
        if was_dragging {
            response
        } else {
            response.with_drag_active(true)
        }
    }

    fn drag<N: ChangeNotifier>(
        &mut self,
        event: &PointerEvent,
        geometry: &mut CropGeometry<N>,
        wrapper: Size,
    ) -> Response {
        let DragPhase::Dragging(session) = &mut self.phase else {
            return Response::IGNORED;
        };
        let delta = session.update(event.page);
        let offset = geometry.offset();
        let left = (wrapper.width > 0.0).then(|| offset.x - delta.x / wrapper.width);
        let top = (wrapper.height > 0.0).then(|| offset.y - delta.y / wrapper.height);
        geometry.set_offset(left, top);
        Response::handled(true)
    }

    fn release(&mut self) -> Response {
        let DragPhase::Dragging(session) = self.phase else {
            return Response::IGNORED;
        };
        log::trace!("drag end, moved {:?}", session.total_offset());
        self.phase = DragPhase::Idle;
        self.attached -= Listeners::MOVE | Listeners::STOP;
        Response::handled(false).with_drag_active(false)
    }
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}
