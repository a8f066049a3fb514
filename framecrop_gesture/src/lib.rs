// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=framecrop_gesture --heading-base-level=0

//! Framecrop Gesture: pointer and wheel input for crop geometry.
//!
//! This crate turns raw pointer and wheel events into pan and zoom operations
//! on a [`CropGeometry`](framecrop_geometry::CropGeometry). It handles:
//!
//! - [`drag`]: the press-to-release [`DragSession`](drag::DragSession) and its
//!   frame-to-frame deltas.
//! - [`GestureController`]: the idle/dragging state machine, wrapper-size
//!   normalization, and the wheel-zoom toggle.
//! - [`PointerEvent`]: a device-neutral pointer event, with
//!   [`classify_event_type`] for hosts that receive DOM-style type names.
//!
//! The crate does not assume any event loop. Hosts forward events and act on
//! the returned [`Response`]: suppress defaults, stop propagation, toggle
//! drag-active styling, and keep the [`Listeners`] set mirrored.
//!
//! ## Dragging
//!
//! ```rust
//! use framecrop_geometry::{CropGeometry, NaturalSize, ViewportConfig};
//! use framecrop_gesture::{Buttons, GestureController, PointerEvent, PointerPhase};
//! use kurbo::{Point, Size};
//!
//! let mut geometry = CropGeometry::new(ViewportConfig::DEFAULT);
//! geometry
//!     .initialize_from_natural_size(NaturalSize::new(800.0, 600.0))
//!     .unwrap();
//!
//! let mut gestures = GestureController::new();
//! gestures.attach();
//! let wrapper = Size::new(400.0, 300.0);
//!
//! let press = PointerEvent::mouse(PointerPhase::Start, Point::new(200.0, 150.0), Buttons::PRIMARY);
//! assert_eq!(gestures.handle_pointer(&press, &mut geometry, wrapper).drag_active, Some(true));
//!
//! // Dragging 40px to the left moves the viewport a tenth of its width right.
//! let motion = PointerEvent::mouse(PointerPhase::Move, Point::new(160.0, 150.0), Buttons::PRIMARY);
//! gestures.handle_pointer(&motion, &mut geometry, wrapper);
//! assert!((geometry.offset().x - 0.1).abs() < 1e-12);
//!
//! let release = PointerEvent::mouse(PointerPhase::Stop, Point::new(160.0, 150.0), Buttons::empty());
//! assert_eq!(gestures.handle_pointer(&release, &mut geometry, wrapper).drag_active, Some(false));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;

mod controller;
mod pointer;

pub use controller::{DEFAULT_ZOOM_STEP, GestureController, Listeners, Response};
pub use pointer::{Buttons, PointerEvent, PointerKind, PointerPhase, classify_event_type};
