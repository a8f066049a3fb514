// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// Device that produced a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse or other button-based pointer.
    Mouse,
    /// Touch screen.
    Touch,
}

/// Role of a pointer event in the drag state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Press: `touchstart` / `mousedown`.
    Start,
    /// Movement: `touchmove` / `mousemove`.
    Move,
    /// Release: `touchend` / `mouseup`.
    Stop,
}

/// Maps a DOM-style event type name onto its kind and phase.
///
/// Returns `None` for event types the gesture controller does not bind.
#[must_use]
pub fn classify_event_type(name: &str) -> Option<(PointerKind, PointerPhase)> {
    let class = match name {
        "touchstart" => (PointerKind::Touch, PointerPhase::Start),
        "mousedown" => (PointerKind::Mouse, PointerPhase::Start),
        "touchmove" => (PointerKind::Touch, PointerPhase::Move),
        "mousemove" => (PointerKind::Mouse, PointerPhase::Move),
        "touchend" => (PointerKind::Touch, PointerPhase::Stop),
        "mouseup" => (PointerKind::Mouse, PointerPhase::Stop),
        _ => return None,
    };
    Some(class)
}

bitflags::bitflags! {
    /// Mouse buttons held during an event.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u8 {
        /// Primary (usually left) button.
        const PRIMARY   = 0b0000_0001;
        /// Secondary (usually right) button.
        const SECONDARY = 0b0000_0010;
        /// Auxiliary (usually middle) button.
        const AUXILIARY = 0b0000_0100;
    }
}

/// A pointer event in page coordinates.
///
/// For touch events `page` is the first changed touch and `touches` the number
/// of simultaneous touch points; for mouse events `touches` is zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Producing device.
    pub kind: PointerKind,
    /// Role in the state machine.
    pub phase: PointerPhase,
    /// Position in device pixels.
    pub page: Point,
    /// Simultaneous touch points.
    pub touches: u32,
    /// Mouse buttons held.
    pub buttons: Buttons,
}

impl PointerEvent {
    /// A mouse event at `page`.
    #[must_use]
    pub fn mouse(phase: PointerPhase, page: Point, buttons: Buttons) -> Self {
        Self {
            kind: PointerKind::Mouse,
            phase,
            page,
            touches: 0,
            buttons,
        }
    }

    /// A touch event whose first changed touch is at `page`.
    #[must_use]
    pub fn touch(phase: PointerPhase, page: Point, touches: u32) -> Self {
        Self {
            kind: PointerKind::Touch,
            phase,
            page,
            touches,
            buttons: Buttons::empty(),
        }
    }

    /// Returns `true` if this press may begin a drag: a single touch point or
    /// the primary mouse button.
    #[must_use]
    pub fn can_start_drag(&self) -> bool {
        match self.kind {
            PointerKind::Touch => self.touches == 1,
            PointerKind::Mouse => self.buttons.contains(Buttons::PRIMARY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_bound_event_types() {
        assert_eq!(
            classify_event_type("touchstart"),
            Some((PointerKind::Touch, PointerPhase::Start))
        );
        assert_eq!(
            classify_event_type("mousemove"),
            Some((PointerKind::Mouse, PointerPhase::Move))
        );
        assert_eq!(
            classify_event_type("mouseup"),
            Some((PointerKind::Mouse, PointerPhase::Stop))
        );
        assert_eq!(classify_event_type("touchcancel"), None);
        assert_eq!(classify_event_type("wheel"), None);
    }

    #[test]
    fn drag_start_requires_single_touch() {
        let p = Point::new(1.0, 2.0);
        assert!(PointerEvent::touch(PointerPhase::Start, p, 1).can_start_drag());
        assert!(!PointerEvent::touch(PointerPhase::Start, p, 2).can_start_drag());
        assert!(!PointerEvent::touch(PointerPhase::Start, p, 0).can_start_drag());
    }

    #[test]
    fn drag_start_requires_primary_button() {
        let p = Point::new(1.0, 2.0);
        assert!(PointerEvent::mouse(PointerPhase::Start, p, Buttons::PRIMARY).can_start_drag());
        assert!(
            PointerEvent::mouse(PointerPhase::Start, p, Buttons::PRIMARY | Buttons::SECONDARY)
                .can_start_drag()
        );
        assert!(!PointerEvent::mouse(PointerPhase::Start, p, Buttons::SECONDARY).can_start_drag());
        assert!(!PointerEvent::mouse(PointerPhase::Start, p, Buttons::empty()).can_start_drag());
    }
}
