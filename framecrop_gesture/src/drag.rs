// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session: the pointer anchor kept between a press and its release.
//!
//! ## Usage
//!
//! 1) Create a session with [`DragSession::start`] at the press position.
//! 2) On each move, call [`DragSession::update`] to get the movement since the
//!    previous position; the anchor then moves to the new position.
//! 3) Drop the session on release.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use framecrop_gesture::drag::DragSession;
//!
//! let mut session = DragSession::start(Point::new(10.0, 20.0));
//!
//! // Frame-to-frame deltas, not deltas from the press.
//! assert_eq!(session.update(Point::new(15.0, 25.0)), Vec2::new(5.0, 5.0));
//! assert_eq!(session.update(Point::new(16.0, 25.0)), Vec2::new(1.0, 0.0));
//!
//! // The total distance from the press is still available.
//! assert_eq!(session.total_offset(), Vec2::new(6.0, 5.0));
//! ```

use kurbo::{Point, Vec2};

/// Pointer positions tracked for one press-to-release interaction, in device
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    start_pos: Point,
    last_pos: Point,
}

impl DragSession {
    /// Starts a session anchored at `pos`.
    #[must_use]
    pub fn start(pos: Point) -> Self {
        Self {
            start_pos: pos,
            last_pos: pos,
        }
    }

    /// Moves the anchor to `pos`, returning the movement since the last anchor.
    pub fn update(&mut self, pos: Point) -> Vec2 {
        let delta = pos - self.last_pos;
        self.last_pos = pos;
        delta
    }

    /// Position the session started at.
    #[must_use]
    pub fn start_pos(&self) -> Point {
        self.start_pos
    }

    /// Current anchor.
    #[must_use]
    pub fn last_pos(&self) -> Point {
        self.last_pos
    }

    /// Distance from the press to the current anchor.
    #[must_use]
    pub fn total_offset(&self) -> Vec2 {
        self.last_pos - self.start_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_anchors_both_positions() {
        let start = Point::new(10.0, 20.0);
        let session = DragSession::start(start);
        assert_eq!(session.start_pos(), start);
        assert_eq!(session.last_pos(), start);
        assert_eq!(session.total_offset(), Vec2::ZERO);
    }

    #[test]
    fn multiple_updates_track_incremental_deltas() {
        let mut session = DragSession::start(Point::new(0.0, 0.0));

        assert_eq!(session.update(Point::new(5.0, 3.0)), Vec2::new(5.0, 3.0));
        assert_eq!(session.update(Point::new(8.0, 7.0)), Vec2::new(3.0, 4.0));
        assert_eq!(session.update(Point::new(10.0, 10.0)), Vec2::new(2.0, 3.0));
        assert_eq!(session.total_offset(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn negative_movement_deltas() {
        let mut session = DragSession::start(Point::new(100.0, 100.0));
        assert_eq!(session.update(Point::new(90.0, 85.0)), Vec2::new(-10.0, -15.0));
    }

    #[test]
    fn zero_movement_delta() {
        let start = Point::new(50.0, 50.0);
        let mut session = DragSession::start(start);
        assert_eq!(session.update(start), Vec2::ZERO);
    }

    #[test]
    fn large_coordinate_values() {
        let mut session = DragSession::start(Point::new(1000000.0, 2000000.0));
        assert_eq!(
            session.update(Point::new(1000001.0, 2000002.0)),
            Vec2::new(1.0, 2.0)
        );
    }
}
